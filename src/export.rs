//! PNG export for palette-indexed bitmaps
//!
//! Renders opaque palette indices through a fixed 16-color palette (indices
//! wrap past 15) and transparent pixels as fully transparent RGBA. This is a
//! preview surface for the CLI, not a general palette system.

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::bitmap::{Bitmap, Pixel};

/// Fixed preview palette, one RGB triple per index 0-15.
const PREVIEW_PALETTE: [[u8; 3]; 16] = [
    [0x00, 0x00, 0x00], // black
    [0xFF, 0xFF, 0xFF], // white
    [0xFF, 0x00, 0x4D], // red
    [0xFF, 0xA3, 0x00], // orange
    [0xFF, 0xEC, 0x27], // yellow
    [0x00, 0xE4, 0x36], // green
    [0x29, 0xAD, 0xFF], // blue
    [0x83, 0x76, 0x9C], // lavender
    [0xFF, 0x77, 0xA8], // pink
    [0xFF, 0xCC, 0xAA], // peach
    [0x7E, 0x25, 0x53], // dark purple
    [0x00, 0x87, 0x51], // dark green
    [0xAB, 0x52, 0x36], // brown
    [0x5F, 0x57, 0x4F], // dark gray
    [0xC2, 0xC3, 0xC7], // light gray
    [0x1D, 0x2B, 0x53], // navy
];

/// Convert a bitmap to RGBA through the preview palette.
pub fn to_rgba(bitmap: &Bitmap) -> RgbaImage {
    let mut rgba = RgbaImage::new(bitmap.width(), bitmap.height());
    for (x, y, pixel) in bitmap.enumerate_pixels() {
        let color = match pixel {
            Pixel::Transparent => Rgba([0, 0, 0, 0]),
            Pixel::Opaque(index) => {
                let [r, g, b] = PREVIEW_PALETTE[index as usize % PREVIEW_PALETTE.len()];
                Rgba([r, g, b, 255])
            }
        };
        rgba.put_pixel(x, y, color);
    }
    rgba
}

/// Render a bitmap to a PNG file.
pub fn save_png(bitmap: &Bitmap, path: &Path) -> Result<(), image::ImageError> {
    to_rgba(bitmap).save(path)
}
