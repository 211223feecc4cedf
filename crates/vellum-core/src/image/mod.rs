// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! In-memory bitmaps handed to texture uploads.
//!
//! Decoding images is the job of the asset layer; these types only carry
//! already-decoded pixels.

use crate::math::Rgba;
use std::fmt;

/// An error raised when a bitmap is built from pixel data of the wrong size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitmapError {
    /// The pixel buffer length does not equal `width * height`.
    SizeMismatch {
        /// The expected number of pixels.
        expected: usize,
        /// The number of pixels actually provided.
        actual: usize,
    },
}

impl fmt::Display for BitmapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitmapError::SizeMismatch { expected, actual } => {
                write!(f, "Bitmap expects {expected} pixels, got {actual}")
            }
        }
    }
}

impl std::error::Error for BitmapError {}

/// A 32-bit-per-pixel bitmap of packed [`Rgba`] colors, stored row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap32 {
    width: u32,
    height: u32,
    data: Vec<Rgba>,
}

impl Bitmap32 {
    /// Creates a bitmap filled with [`Rgba::TRANSPARENT`].
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba::TRANSPARENT)
    }

    /// Creates a bitmap filled with `color`.
    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        Self {
            width,
            height,
            data: vec![color; width as usize * height as usize],
        }
    }

    /// Wraps existing pixel data.
    pub fn from_pixels(width: u32, height: u32, data: Vec<Rgba>) -> Result<Self, BitmapError> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(BitmapError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (`width * height`).
    pub fn area(&self) -> usize {
        self.data.len()
    }

    /// The pixels, row by row.
    pub fn pixels(&self) -> &[Rgba] {
        &self.data
    }

    /// Returns the pixel at `(x, y)`, or `None` when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        self.index(x, y).map(|i| self.data[i])
    }

    /// Sets the pixel at `(x, y)`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, color: Rgba) {
        if let Some(i) = self.index(x, y) {
            self.data[i] = color;
        }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }
}

/// An 8-bit-per-pixel bitmap (luminance or palette indices), stored row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap8 {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Bitmap8 {
    /// Creates a zero-filled bitmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    /// Wraps existing pixel data.
    pub fn from_pixels(width: u32, height: u32, data: Vec<u8>) -> Result<Self, BitmapError> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(BitmapError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (`width * height`).
    pub fn area(&self) -> usize {
        self.data.len()
    }

    /// The pixels, row by row.
    pub fn pixels(&self) -> &[u8] {
        &self.data
    }

    /// Returns the pixel at `(x, y)`, or `None` when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        (x < self.width && y < self.height)
            .then(|| self.data[y as usize * self.width as usize + x as usize])
    }

    /// Sets the pixel at `(x, y)`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, value: u8) {
        if x < self.width && y < self.height {
            self.data[y as usize * self.width as usize + x as usize] = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitmap32_rejects_wrong_pixel_count() {
        let err = Bitmap32::from_pixels(2, 2, vec![Rgba::WHITE; 3]).unwrap_err();
        assert_eq!(
            err,
            BitmapError::SizeMismatch {
                expected: 4,
                actual: 3
            }
        );
        assert_eq!(format!("{err}"), "Bitmap expects 4 pixels, got 3");
    }

    #[test]
    fn bitmap32_get_set_are_row_major() {
        let mut bmp = Bitmap32::new(3, 2);
        bmp.set(2, 1, Rgba::RED);
        assert_eq!(bmp.pixels()[5], Rgba::RED);
        assert_eq!(bmp.get(2, 1), Some(Rgba::RED));
        assert_eq!(bmp.get(3, 0), None);
        assert_eq!(bmp.area(), 6);
    }

    #[test]
    fn bitmap8_ignores_out_of_bounds_writes() {
        let mut bmp = Bitmap8::new(2, 2);
        bmp.set(5, 5, 9);
        bmp.set(1, 0, 7);
        assert_eq!(bmp.pixels(), &[0, 7, 0, 0]);
    }
}
