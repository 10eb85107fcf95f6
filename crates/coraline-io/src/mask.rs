//! Conversions between an RGB segmentation overlay and a [`Mask`], and a
//! border-highlight overlay for visual review.

use coraline_core::{Mask, RgbImage};

/// Classify an RGB segmentation image into a binary [`Mask`]: pure black is
/// background, pure white or the source's amber highlight
/// (`0xd5a500`, `(213, 165, 0)`) is foreground, and anything else defaults
/// to background.
pub fn rgb_to_mask(image: &RgbImage) -> Mask {
    let pixel_count = image.dims().pixel_count();
    let mut data = vec![0u8; pixel_count];
    for i in 0..pixel_count {
        let [r, g, b] = image.pixel(i);
        let foreground = (r == 255 && g == 255 && b == 255) || (r == 213 && g == 165 && b == 0);
        data[i] = foreground as u8;
    }
    Mask::new(image.width(), image.height(), data).expect("same dims as source image")
}

/// Blend `color` into every foreground pixel of `image` that borders a
/// background pixel, averaging the existing color with `color` in place.
pub fn draw_border(image: &mut RgbImage, mask: &Mask, color: [u8; 3]) {
    let dims = mask.dims();
    for i in dims.interior_indices() {
        if mask.get(i) != 1 {
            continue;
        }
        let on_border = dims.neighbors(i).iter().any(|&n| mask.get(n) == 0);
        if !on_border {
            continue;
        }
        let rgb = image.pixel(i);
        let blended = [
            average(rgb[0], color[0]),
            average(rgb[1], color[1]),
            average(rgb[2], color[2]),
        ];
        image.set_pixel(i, blended);
    }
}

fn average(a: u8, b: u8) -> u8 {
    ((a as u16 + b as u16) / 2) as u8
}
