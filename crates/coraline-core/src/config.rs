//! Segmentation configuration (§3). A single immutable value owned by the
//! orchestrator for the duration of one `segment` call, built with
//! `with_*` setters over a `Default` impl.

/// Which solver the orchestrator (C7) invokes for the band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    /// Min-cut over a grid flow network (C5).
    #[default]
    GraphCut,
    /// Two-source shortest-path labelling (C6).
    Geodesic,
}

/// Immutable configuration for one `segment` call.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    method: Method,
    radius: f64,
    quantization_stride: u32,
    lambda: f64,
    grow: f64,
    conservative: f64,
    depth_weight: f64,
    epsilon: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            method: Method::GraphCut,
            radius: 30.0,
            quantization_stride: 16,
            lambda: 0.1,
            grow: 0.0,
            conservative: 0.2,
            depth_weight: 0.0,
            epsilon: 1e-11,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_quantization_stride(mut self, q: u32) -> Self {
        self.quantization_stride = q.max(1);
        self
    }

    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }

    pub fn with_grow(mut self, grow: f64) -> Self {
        self.grow = grow;
        self
    }

    pub fn with_conservative(mut self, conservative: f64) -> Self {
        self.conservative = conservative;
        self
    }

    /// Sets the weight of depth gradient in the smoothness term. The color
    /// gradient's weight is derived as `1.0 - depth_weight` (see
    /// [`Self::img_weight`]) rather than tracked as an independent field,
    /// so the two can never disagree.
    pub fn with_depth_weight(mut self, depth_weight: f64) -> Self {
        self.depth_weight = depth_weight.clamp(0.0, 1.0);
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    #[inline]
    pub fn method(&self) -> Method {
        self.method
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn quantization_stride(&self) -> u32 {
        self.quantization_stride
    }

    #[inline]
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    #[inline]
    pub fn grow(&self) -> f64 {
        self.grow
    }

    #[inline]
    pub fn conservative(&self) -> f64 {
        self.conservative
    }

    #[inline]
    pub fn depth_weight(&self) -> f64 {
        self.depth_weight
    }

    /// Weight of color gradient in the smoothness term, `1.0 - depth_weight`.
    #[inline]
    pub fn img_weight(&self) -> f64 {
        1.0 - self.depth_weight
    }

    #[inline]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Number of quantization bins per channel, `256 / q`.
    #[inline]
    pub fn bins_per_channel(&self) -> u32 {
        256 / self.quantization_stride
    }
}
