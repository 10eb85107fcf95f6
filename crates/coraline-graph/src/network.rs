//! The flow network solver (C2): generic s-t min-cut on a sparse directed
//! graph with non-negative `f64` capacities, solved by Dinic's blocking-flow
//! algorithm over an index-based, packed-arc residual graph (no per-node
//! heap allocation beyond the adjacency lists themselves).
//!
//! Arcs are always added in sibling pairs at consecutive indices, so an
//! arc's reverse/residual counterpart is always `index ^ 1`. This mirrors
//! the arc representation the literal source's external maxflow library
//! uses, without requiring that library.

use std::collections::VecDeque;

use crate::error::{GraphError, GraphResult};

/// A node's classification after `maxflow`, matching the spec's `SOURCE`/
/// `SINK` terminal labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// Reachable from the source in the final residual graph.
    Source,
    /// Not reachable from the source in the final residual graph.
    Sink,
}

/// Capacities below this are treated as closed arcs, avoiding floating
/// point noise from keeping a residual edge technically open.
const EPS: f64 = 1e-15;

#[derive(Debug, Clone, Copy)]
struct Arc {
    to: usize,
    cap: f64,
}

struct Solved {
    flow: f64,
    source_reachable: Vec<bool>,
}

/// A sparse directed graph with two implicit terminals (`SOURCE`, `SINK`),
/// built once and solved once per [`FlowNetwork::maxflow`] call.
pub struct FlowNetwork {
    num_nodes: usize,
    tweights: Vec<(f64, f64)>,
    adj: Vec<Vec<usize>>,
    arcs: Vec<Arc>,
    solved: Option<Solved>,
}

impl Default for FlowNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowNetwork {
    pub fn new() -> Self {
        Self {
            num_nodes: 0,
            tweights: Vec::new(),
            adj: Vec::new(),
            arcs: Vec::new(),
            solved: None,
        }
    }

    /// Pre-allocate storage for `nodes` nodes and roughly `edges` edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            num_nodes: 0,
            tweights: Vec::with_capacity(nodes),
            adj: Vec::with_capacity(nodes),
            arcs: Vec::with_capacity(edges * 2),
            solved: None,
        }
    }

    /// Append one node and return its index.
    pub fn add_node(&mut self) -> usize {
        let id = self.num_nodes;
        self.num_nodes += 1;
        self.tweights.push((0.0, 0.0));
        self.adj.push(Vec::new());
        id
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Accumulate terminal capacities for node `k`. Either may be zero;
    /// negative values are a caller bug and are rejected.
    pub fn add_tweights(&mut self, k: usize, cap_source: f64, cap_sink: f64) -> GraphResult<()> {
        self.check_node(k)?;
        validate(cap_source)?;
        validate(cap_sink)?;
        self.tweights[k].0 += cap_source;
        self.tweights[k].1 += cap_sink;
        Ok(())
    }

    /// Add a bidirectional pair of arcs between `k` and `l` with
    /// independently settable forward and reverse capacities.
    pub fn add_edge(&mut self, k: usize, l: usize, cap_kl: f64, cap_lk: f64) -> GraphResult<()> {
        self.check_node(k)?;
        self.check_node(l)?;
        validate(cap_kl)?;
        validate(cap_lk)?;
        let idx = self.arcs.len();
        self.arcs.push(Arc { to: l, cap: cap_kl });
        self.arcs.push(Arc { to: k, cap: cap_lk });
        self.adj[k].push(idx);
        self.adj[l].push(idx + 1);
        Ok(())
    }

    fn check_node(&self, k: usize) -> GraphResult<()> {
        if k >= self.num_nodes {
            Err(GraphError::InvalidNode(k, self.num_nodes))
        } else {
            Ok(())
        }
    }

    /// Compute the max flow (== min s-t cut cost) and record the
    /// source-reachable set for subsequent [`Self::what_segment`] queries.
    pub fn maxflow(&mut self) -> GraphResult<f64> {
        let n = self.num_nodes;
        let source = n;
        let sink = n + 1;
        let total = n + 2;

        let mut adj = self.adj.clone();
        adj.resize(total, Vec::new());
        let mut arcs = self.arcs.clone();

        for k in 0..n {
            let (cap_source, cap_sink) = self.tweights[k];
            if cap_source > 0.0 {
                let idx = arcs.len();
                arcs.push(Arc { to: k, cap: cap_source });
                arcs.push(Arc { to: source, cap: 0.0 });
                adj[source].push(idx);
                adj[k].push(idx + 1);
            }
            if cap_sink > 0.0 {
                let idx = arcs.len();
                arcs.push(Arc { to: sink, cap: cap_sink });
                arcs.push(Arc { to: k, cap: 0.0 });
                adj[k].push(idx);
                adj[sink].push(idx + 1);
            }
        }

        let mut flow = 0.0;
        loop {
            let level = bfs_levels(&adj, &arcs, source, total);
            if level[sink] < 0 {
                break;
            }
            let mut cursor = vec![0usize; total];
            loop {
                let pushed = dfs_blocking(
                    source,
                    sink,
                    f64::INFINITY,
                    &adj,
                    &mut arcs,
                    &level,
                    &mut cursor,
                );
                if pushed <= EPS {
                    break;
                }
                flow += pushed;
            }
        }

        let reach = bfs_reachable(&adj, &arcs, source, total);
        self.solved = Some(Solved {
            flow,
            source_reachable: reach[0..n].to_vec(),
        });
        Ok(flow)
    }

    /// Classify node `k` after [`Self::maxflow`] has run.
    pub fn what_segment(&self, k: usize) -> GraphResult<Segment> {
        self.check_node(k)?;
        let solved = self.solved.as_ref().ok_or(GraphError::NotSolved)?;
        Ok(if solved.source_reachable[k] {
            Segment::Source
        } else {
            Segment::Sink
        })
    }

    /// The max flow value computed by the last [`Self::maxflow`] call.
    pub fn flow_value(&self) -> Option<f64> {
        self.solved.as_ref().map(|s| s.flow)
    }
}

fn validate(cap: f64) -> GraphResult<()> {
    if !cap.is_finite() {
        return Err(GraphError::CapacityOverflow);
    }
    if cap < 0.0 {
        return Err(GraphError::NegativeCapacity(cap));
    }
    Ok(())
}

fn bfs_levels(adj: &[Vec<usize>], arcs: &[Arc], source: usize, total: usize) -> Vec<i32> {
    let mut level = vec![-1i32; total];
    level[source] = 0;
    let mut queue = VecDeque::new();
    queue.push_back(source);
    while let Some(u) = queue.pop_front() {
        for &eid in &adj[u] {
            let arc = &arcs[eid];
            if arc.cap > EPS && level[arc.to] < 0 {
                level[arc.to] = level[u] + 1;
                queue.push_back(arc.to);
            }
        }
    }
    level
}

fn bfs_reachable(adj: &[Vec<usize>], arcs: &[Arc], source: usize, total: usize) -> Vec<bool> {
    let mut seen = vec![false; total];
    seen[source] = true;
    let mut queue = VecDeque::new();
    queue.push_back(source);
    while let Some(u) = queue.pop_front() {
        for &eid in &adj[u] {
            let arc = &arcs[eid];
            if arc.cap > EPS && !seen[arc.to] {
                seen[arc.to] = true;
                queue.push_back(arc.to);
            }
        }
    }
    seen
}

/// DFS blocking-flow phase of Dinic's algorithm: finds one augmenting path
/// respecting the BFS level graph, pushes as much flow as the path allows,
/// and advances `cursor` so dead-end arcs are never retried in this phase.
fn dfs_blocking(
    u: usize,
    sink: usize,
    pushed_in: f64,
    adj: &[Vec<usize>],
    arcs: &mut [Arc],
    level: &[i32],
    cursor: &mut [usize],
) -> f64 {
    if u == sink {
        return pushed_in;
    }
    while cursor[u] < adj[u].len() {
        let eid = adj[u][cursor[u]];
        let (to, cap) = (arcs[eid].to, arcs[eid].cap);
        if cap > EPS && level[to] == level[u] + 1 {
            let bottleneck = dfs_blocking(to, sink, pushed_in.min(cap), adj, arcs, level, cursor);
            if bottleneck > EPS {
                arcs[eid].cap -= bottleneck;
                arcs[eid ^ 1].cap += bottleneck;
                return bottleneck;
            }
        }
        cursor[u] += 1;
    }
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_edge_bottleneck() {
        let mut g = FlowNetwork::new();
        let s = g.add_node();
        let t = g.add_node();
        g.add_tweights(s, 5.0, 0.0).unwrap();
        g.add_tweights(t, 0.0, 5.0).unwrap();
        g.add_edge(s, t, 3.0, 0.0).unwrap();
        let flow = g.maxflow().unwrap();
        assert!((flow - 3.0).abs() < 1e-9);
        assert_eq!(g.what_segment(s).unwrap(), Segment::Source);
        assert_eq!(g.what_segment(t).unwrap(), Segment::Sink);
    }

    #[test]
    fn rejects_negative_capacity() {
        let mut g = FlowNetwork::new();
        let k = g.add_node();
        assert!(g.add_tweights(k, -1.0, 0.0).is_err());
    }

    #[test]
    fn rejects_non_finite_capacity() {
        let mut g = FlowNetwork::new();
        let k = g.add_node();
        assert!(g.add_tweights(k, f64::NAN, 0.0).is_err());
    }

    #[test]
    fn what_segment_before_maxflow_errors() {
        let mut g = FlowNetwork::new();
        let k = g.add_node();
        g.add_tweights(k, 1.0, 0.0).unwrap();
        assert!(matches!(g.what_segment(k), Err(GraphError::NotSolved)));
    }

    #[test]
    fn diamond_graph_saturates_min_cut() {
        // s -> a -> t, s -> b -> t, with a bottleneck at a->t.
        let mut g = FlowNetwork::with_capacity(2, 4);
        let a = g.add_node();
        let b = g.add_node();
        g.add_tweights(a, 10.0, 0.0).unwrap();
        g.add_tweights(b, 10.0, 0.0).unwrap();
        g.add_tweights(a, 0.0, 1.0).unwrap();
        g.add_tweights(b, 0.0, 10.0).unwrap();
        let flow = g.maxflow().unwrap();
        assert!((flow - 11.0).abs() < 1e-9);
    }

    #[test]
    fn symmetric_capacities_give_symmetric_flow() {
        let mut g = FlowNetwork::new();
        let a = g.add_node();
        let b = g.add_node();
        g.add_tweights(a, 4.0, 0.0).unwrap();
        g.add_tweights(b, 0.0, 4.0).unwrap();
        g.add_edge(a, b, 2.0, 2.0).unwrap();
        let flow = g.maxflow().unwrap();
        assert!((flow - 2.0).abs() < 1e-9);
    }
}
