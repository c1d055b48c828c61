//! Pixel-level demo effects over grayscale bitmaps.

use super::bitmap::GrayImage;

/// Invert every pixel.
pub fn negative(src: &GrayImage) -> GrayImage {
    let pixels = src.pixels().iter().map(|&p| 255 - p).collect();
    GrayImage::new(src.width(), src.height(), pixels).expect("dimensions unchanged")
}

/// Flip left-to-right.
pub fn mirror_horizontal(src: &GrayImage) -> GrayImage {
    let (w, h) = (src.width(), src.height());
    let mut pixels = Vec::with_capacity(src.pixels().len());
    for y in 0..h {
        for x in 0..w {
            pixels.push(src.get(w - 1 - x, y));
        }
    }
    GrayImage::new(w, h, pixels).expect("dimensions unchanged")
}

/// Flip top-to-bottom.
pub fn mirror_vertical(src: &GrayImage) -> GrayImage {
    let (w, h) = (src.width(), src.height());
    let mut pixels = Vec::with_capacity(src.pixels().len());
    for y in 0..h {
        for x in 0..w {
            pixels.push(src.get(x, h - 1 - y));
        }
    }
    GrayImage::new(w, h, pixels).expect("dimensions unchanged")
}

/// Rotate a quarter turn clockwise; width and height swap.
pub fn rotate90(src: &GrayImage) -> GrayImage {
    let (w, h) = (src.width(), src.height());
    let mut pixels = vec![0u8; src.pixels().len()];
    for y in 0..h {
        for x in 0..w {
            // (x, y) lands at (h - 1 - y, x) in the rotated image.
            pixels[(x as usize) * (h as usize) + (h - 1 - y) as usize] = src.get(x, y);
        }
    }
    GrayImage::new(h, w, pixels).expect("dimensions swapped")
}

/// Rotate by `rotations` quarter turns; negative counts turn the other
/// way.
pub fn rotate_multiple_90(src: &GrayImage, rotations: i32) -> GrayImage {
    let turns = ((rotations % 4) + 4) % 4;
    let mut result = src.clone();
    for _ in 0..turns {
        result = rotate90(&result);
    }
    result
}

/// Add `delta` to every pixel, clamped to [0, 255].
pub fn adjust_brightness(src: &GrayImage, delta: i32) -> GrayImage {
    let pixels = src
        .pixels()
        .iter()
        .map(|&p| (p as i32 + delta).clamp(0, 255) as u8)
        .collect();
    GrayImage::new(src.width(), src.height(), pixels).expect("dimensions unchanged")
}
