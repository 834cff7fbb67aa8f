//! Rotation and flip transforms for palette-indexed bitmaps
//!
//! All functions are pure: they take a source [`Bitmap`] and return a freshly
//! allocated result. Rotation uses inverse mapping (destination → source) so
//! the output has no holes, with nearest-neighbor sampling - no interpolation,
//! jaggies at pixel-art scale are the accepted tradeoff.
//!
//! Both source and destination use their own geometric center (`width / 2`,
//! `height / 2` as reals) as the rotation pivot. A destination pixel samples
//! the source pixel whose cell contains the inverse-rotated position of its
//! center; transparent source samples leave the destination transparent.

use crate::bitmap::Bitmap;

/// Treat sin/cos values this close to 0 or ±1 as exact.
///
/// `f64::to_radians` cannot represent multiples of 90° exactly, which would
/// otherwise inflate the bounding box by one pixel (e.g. `cos 90° ≈ 6e-17`
/// makes `ceil` round 2.0000000000000004 up to 3) and break axis-aligned
/// round trips.
const TRIG_SNAP_EPSILON: f64 = 1e-9;

/// Normalize an angle in degrees to `[0, 360)`.
///
/// Works for any finite input, including negatives: `-90` → `270`.
pub fn normalize_degrees(angle: f64) -> f64 {
    ((angle % 360.0) + 360.0) % 360.0
}

/// Bearing in degrees from `(x1, y1)` to `(x2, y2)`.
///
/// 0° points along +x, 90° along +y. Coincident points yield 0.
pub fn bearing_degrees(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    (y2 - y1).atan2(x2 - x1).to_degrees()
}

/// Sine and cosine of an angle in degrees, snapped to exact values near
/// multiples of 90°.
fn sin_cos_snapped(degrees: f64) -> (f64, f64) {
    let radians = degrees.to_radians();
    let snap = |value: f64| {
        for exact in [0.0, 1.0, -1.0] {
            if (value - exact).abs() < TRIG_SNAP_EPSILON {
                return exact;
            }
        }
        value
    };
    (snap(radians.sin()), snap(radians.cos()))
}

/// Inverse-map every destination pixel back into the source and copy opaque
/// samples. Shared by [`rotate`] and [`rotate_with_margin`]; the only
/// difference between them is how the destination canvas is sized.
fn inverse_map_into(source: &Bitmap, destination: &mut Bitmap, degrees: f64) {
    let (sin, cos) = sin_cos_snapped(normalize_degrees(degrees));

    let src_cx = f64::from(source.width()) / 2.0;
    let src_cy = f64::from(source.height()) / 2.0;
    let dst_cx = f64::from(destination.width()) / 2.0;
    let dst_cy = f64::from(destination.height()) / 2.0;

    for y in 0..destination.height() {
        for x in 0..destination.width() {
            // Offset of this pixel's center from the destination center,
            // rotated by -θ to land in source-centered space.
            let dx = f64::from(x) + 0.5 - dst_cx;
            let dy = f64::from(y) + 0.5 - dst_cy;
            let sx = (dx * cos + dy * sin + src_cx).floor();
            let sy = (-dx * sin + dy * cos + src_cy).floor();

            if sx >= 0.0
                && sx < f64::from(source.width())
                && sy >= 0.0
                && sy < f64::from(source.height())
            {
                let pixel = source.get_pixel(sx as u32, sy as u32);
                if !pixel.is_transparent() {
                    destination.put_pixel(x, y, pixel);
                }
            }
        }
    }
}

/// Rotate a bitmap by an arbitrary angle in degrees.
///
/// The output is sized to the smallest bounding box containing the rotated
/// footprint: `ceil(|w·cosθ| + |h·sinθ|)` × `ceil(|w·sinθ| + |h·cosθ|)`.
/// Any finite angle is accepted; it is normalized to `[0, 360)` first.
pub fn rotate(image: &Bitmap, degrees: f64) -> Bitmap {
    let degrees = normalize_degrees(degrees);
    let (sin, cos) = sin_cos_snapped(degrees);

    let w = f64::from(image.width());
    let h = f64::from(image.height());
    let new_width = (w * cos.abs() + h * sin.abs()).ceil() as u32;
    let new_height = (w * sin.abs() + h * cos.abs()).ceil() as u32;

    let mut destination = Bitmap::new(new_width, new_height);
    inverse_map_into(image, &mut destination, degrees);
    destination
}

/// Flip a bitmap top-to-bottom. Output has the source dimensions.
pub fn flip_vertical(image: &Bitmap) -> Bitmap {
    let mut destination = Bitmap::new(image.width(), image.height());
    for (x, y, pixel) in image.enumerate_pixels() {
        destination.put_pixel(x, image.height() - 1 - y, pixel);
    }
    destination
}

/// Rotate onto a fixed `(w + 2·margin) × (h + 2·margin)` canvas.
///
/// Unlike [`rotate`], the output size never depends on the angle, so repeated
/// callers get a predictably sized canvas for fixed-layout compositing.
/// Corners of the rotated footprint that fall outside the canvas are clipped.
pub fn rotate_with_margin(image: &Bitmap, degrees: f64, margin: u32) -> Bitmap {
    let mut destination = Bitmap::new(image.width() + 2 * margin, image.height() + 2 * margin);
    inverse_map_into(image, &mut destination, degrees);
    destination
}

/// Rotate a bitmap to face from `(x1, y1)` towards `(x2, y2)`, plus an offset,
/// on a margin canvas.
///
/// Coincident points have no defined bearing; the result is then the
/// unrotated image centered on the margin canvas.
pub fn rotate_towards_point(
    image: &Bitmap,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    offset_degrees: f64,
    margin: u32,
) -> Bitmap {
    if x1 == x2 && y1 == y2 {
        return rotate_with_margin(image, 0.0, margin);
    }
    let degrees = bearing_degrees(x1, y1, x2, y2) + offset_degrees;
    rotate_with_margin(image, degrees, margin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::Pixel;

    /// Fully opaque w x h bitmap with pixel values x + y * w.
    fn numbered(width: u32, height: u32) -> Bitmap {
        let mut bitmap = Bitmap::new(width, height);
        for y in 0..height {
            for x in 0..width {
                bitmap.put_pixel(x, y, Pixel::Opaque((x + y * width) as u8));
            }
        }
        bitmap
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(450.0), 90.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(-450.0), 270.0);
        assert_eq!(normalize_degrees(723.5), 3.5);
    }

    #[test]
    fn test_rotate_zero_is_identity() {
        let source = numbered(3, 2);
        assert_eq!(rotate(&source, 0.0), source);
        assert_eq!(rotate(&source, 360.0), source);
    }

    #[test]
    fn test_rotate_90_dimensions() {
        // 4x2 rotated 90 degrees yields exactly 2x4
        let source = numbered(4, 2);
        let rotated = rotate(&source, 90.0);
        assert_eq!(rotated.dimensions(), (2, 4));
    }

    #[test]
    fn test_rotate_90_content() {
        // 2x1: [0, 1] rotated 90 degrees (bearing convention, +y down)
        let source = numbered(2, 1);
        let rotated = rotate(&source, 90.0);
        assert_eq!(rotated.dimensions(), (1, 2));
        assert_eq!(rotated.get_pixel(0, 0), Pixel::Opaque(0));
        assert_eq!(rotated.get_pixel(0, 1), Pixel::Opaque(1));
    }

    #[test]
    fn test_rotate_180_content() {
        let source = numbered(2, 2);
        let rotated = rotate(&source, 180.0);
        assert_eq!(rotated.dimensions(), (2, 2));
        assert_eq!(rotated.get_pixel(0, 0), Pixel::Opaque(3));
        assert_eq!(rotated.get_pixel(1, 0), Pixel::Opaque(2));
        assert_eq!(rotated.get_pixel(0, 1), Pixel::Opaque(1));
        assert_eq!(rotated.get_pixel(1, 1), Pixel::Opaque(0));
    }

    #[test]
    fn test_rotate_45_bounding_box() {
        // 10x10 at 45 degrees: ceil(10·cos45 + 10·sin45) = ceil(14.14...) = 15
        let source = numbered(10, 10);
        let rotated = rotate(&source, 45.0);
        assert_eq!(rotated.dimensions(), (15, 15));
    }

    #[test]
    fn test_axis_aligned_round_trips_are_exact() {
        let source = numbered(4, 2);
        for degrees in [90.0, 180.0, 270.0] {
            let back = rotate(&rotate(&source, degrees), 360.0 - degrees);
            assert_eq!(back, source, "round trip at {degrees} degrees");
        }
    }

    #[test]
    fn test_oblique_round_trip_never_invents_values() {
        // Nearest-neighbor sampling may drop pixels on an oblique round trip,
        // but every surviving opaque value must come from the source.
        let source = numbered(8, 5);
        let back = rotate(&rotate(&source, 30.0), 330.0);
        assert!(back.width() >= source.width());
        assert!(back.height() >= source.height());
        for (_, _, pixel) in back.enumerate_pixels() {
            if let Pixel::Opaque(value) = pixel {
                assert!(u32::from(value) < 8 * 5);
            }
        }
    }

    #[test]
    fn test_rotate_preserves_transparency() {
        // Lone opaque pixel; everything else must stay transparent
        let mut source = Bitmap::new(3, 3);
        source.put_pixel(1, 1, Pixel::Opaque(5));
        let rotated = rotate(&source, 90.0);
        let opaque: Vec<_> = rotated
            .enumerate_pixels()
            .filter(|(_, _, pixel)| !pixel.is_transparent())
            .collect();
        assert_eq!(opaque, vec![(1, 1, Pixel::Opaque(5))]);
    }

    #[test]
    fn test_flip_vertical() {
        let source = numbered(2, 3);
        let flipped = flip_vertical(&source);
        assert_eq!(flipped.dimensions(), (2, 3));
        assert_eq!(flipped.get_pixel(0, 0), Pixel::Opaque(4));
        assert_eq!(flipped.get_pixel(1, 2), Pixel::Opaque(1));
    }

    #[test]
    fn test_flip_vertical_round_trip() {
        let mut source = numbered(3, 4);
        source.put_pixel(2, 1, Pixel::Transparent);
        assert_eq!(flip_vertical(&flip_vertical(&source)), source);
    }

    #[test]
    fn test_margin_canvas_size_is_angle_independent() {
        let source = numbered(6, 6);
        for degrees in [0.0, 37.0, 90.0, 215.5] {
            let result = rotate_with_margin(&source, degrees, 3);
            assert_eq!(result.dimensions(), (12, 12), "at {degrees} degrees");
        }
    }

    #[test]
    fn test_margin_zero_rotation_centers_source() {
        let source = numbered(2, 2);
        let result = rotate_with_margin(&source, 0.0, 1);
        assert_eq!(result.dimensions(), (4, 4));
        assert_eq!(result.get_pixel(1, 1), Pixel::Opaque(0));
        assert_eq!(result.get_pixel(2, 2), Pixel::Opaque(3));
        assert!(result.get_pixel(0, 0).is_transparent());
        assert!(result.get_pixel(3, 3).is_transparent());
    }

    #[test]
    fn test_bearing_degrees() {
        let close = |a: f64, b: f64| (a - b).abs() < 1e-9;
        assert_eq!(bearing_degrees(0.0, 0.0, 10.0, 0.0), 0.0);
        assert!(close(bearing_degrees(0.0, 0.0, 0.0, 10.0), 90.0));
        assert!(close(bearing_degrees(0.0, 0.0, -10.0, 0.0), 180.0));
        assert!(close(bearing_degrees(5.0, 5.0, 5.0, -5.0), -90.0));
    }

    #[test]
    fn test_rotate_towards_point_coincident_is_unrotated() {
        let source = numbered(2, 2);
        let result = rotate_towards_point(&source, 3.0, 3.0, 3.0, 3.0, 45.0, 1);
        assert_eq!(result, rotate_with_margin(&source, 0.0, 1));
    }

    #[test]
    fn test_rotate_towards_point_matches_bearing() {
        let source = numbered(3, 3);
        let faced = rotate_towards_point(&source, 0.0, 0.0, 0.0, 8.0, 0.0, 2);
        assert_eq!(faced, rotate_with_margin(&source, 90.0, 2));
    }

    #[test]
    fn test_degenerate_sizes() {
        let empty = Bitmap::new(0, 0);
        assert_eq!(rotate(&empty, 33.0).dimensions(), (0, 0));
        assert_eq!(flip_vertical(&empty).dimensions(), (0, 0));
        assert_eq!(rotate_with_margin(&empty, 33.0, 2).dimensions(), (4, 4));
    }
}
