//! Palette-indexed bitmap model
//!
//! A [`Bitmap`] is a width × height grid of [`Pixel`] values. Transparency is
//! a distinct variant rather than a reserved palette index, so index 0 stays
//! usable as a real color. Transform outputs are always freshly allocated;
//! nothing in this crate hands out shared pixel buffers.

use serde::{Deserialize, Serialize};

/// A single pixel: either transparent or an opaque palette index.
///
/// Serializes as `null` for transparent and a number for opaque, so a JSON
/// pixel buffer reads as `[null, 0, 3, null, ...]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<u8>", into = "Option<u8>")]
pub enum Pixel {
    Transparent,
    Opaque(u8),
}

impl Pixel {
    /// True if this pixel is the transparent variant.
    pub fn is_transparent(self) -> bool {
        matches!(self, Pixel::Transparent)
    }
}

impl From<Option<u8>> for Pixel {
    fn from(value: Option<u8>) -> Self {
        match value {
            Some(index) => Pixel::Opaque(index),
            None => Pixel::Transparent,
        }
    }
}

impl From<Pixel> for Option<u8> {
    fn from(value: Pixel) -> Self {
        match value {
            Pixel::Opaque(index) => Some(index),
            Pixel::Transparent => None,
        }
    }
}

/// Errors from constructing or deserializing a bitmap
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    /// A grid row had a different width than the first row
    #[error("row {row} has {got} pixels, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    /// Pixel buffer length does not match the declared dimensions
    #[error("pixel buffer has {got} entries, expected {expected} for {width}x{height}")]
    DimensionMismatch {
        width: u32,
        height: u32,
        expected: usize,
        got: usize,
    },
}

/// Serde wire form; [`Bitmap`] validates the buffer length on the way in.
#[derive(Serialize, Deserialize)]
struct RawBitmap {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

/// A 2D grid of palette-index pixels, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBitmap", into = "RawBitmap")]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Bitmap {
    /// Allocate an all-transparent canvas of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Bitmap {
            width,
            height,
            pixels: vec![Pixel::Transparent; width as usize * height as usize],
        }
    }

    /// Build a bitmap from rows of `Option<u8>` (None = transparent).
    ///
    /// All rows must have the width of the first row. An empty slice yields a
    /// 0x0 bitmap.
    pub fn from_rows(rows: &[Vec<Option<u8>>]) -> Result<Self, BitmapError> {
        let width = rows.first().map_or(0, |row| row.len());
        let mut pixels = Vec::with_capacity(width * rows.len());
        for (index, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(BitmapError::RaggedRow {
                    row: index,
                    expected: width,
                    got: row.len(),
                });
            }
            pixels.extend(row.iter().map(|value| Pixel::from(*value)));
        }
        Ok(Bitmap {
            width: width as u32,
            height: rows.len() as u32,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Read the pixel at `(x, y)`.
    ///
    /// # Panics
    /// Panics if the coordinate is outside the bitmap, matching the
    /// `image` crate's `get_pixel` contract.
    pub fn get_pixel(&self, x: u32, y: u32) -> Pixel {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for {}x{} bitmap",
            self.width,
            self.height
        );
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Write the pixel at `(x, y)`.
    ///
    /// # Panics
    /// Panics if the coordinate is outside the bitmap.
    pub fn put_pixel(&mut self, x: u32, y: u32, pixel: Pixel) {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for {}x{} bitmap",
            self.width,
            self.height
        );
        self.pixels[y as usize * self.width as usize + x as usize] = pixel;
    }

    /// Iterate pixels row-major with their coordinates.
    pub fn enumerate_pixels(&self) -> impl Iterator<Item = (u32, u32, Pixel)> + '_ {
        let width = self.width;
        self.pixels.iter().enumerate().map(move |(index, pixel)| {
            let index = index as u32;
            (index % width, index / width, *pixel)
        })
    }
}

impl TryFrom<RawBitmap> for Bitmap {
    type Error = BitmapError;

    fn try_from(raw: RawBitmap) -> Result<Self, Self::Error> {
        let expected = raw.width as usize * raw.height as usize;
        if raw.pixels.len() != expected {
            return Err(BitmapError::DimensionMismatch {
                width: raw.width,
                height: raw.height,
                expected,
                got: raw.pixels.len(),
            });
        }
        Ok(Bitmap {
            width: raw.width,
            height: raw.height,
            pixels: raw.pixels,
        })
    }
}

impl From<Bitmap> for RawBitmap {
    fn from(bitmap: Bitmap) -> Self {
        RawBitmap {
            width: bitmap.width,
            height: bitmap.height,
            pixels: bitmap.pixels,
        }
    }
}
