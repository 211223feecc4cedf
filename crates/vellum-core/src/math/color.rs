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

//! Defines the packed `Rgba` color type.

use serde::{Deserialize, Serialize};

/// A color packed into a single `u32` as `0xAABBGGRR`.
///
/// Red lives in the lowest byte, so on little-endian targets the in-memory byte
/// order of a pixel is `R, G, B, A`, which is exactly what an `RGBA` /
/// `UNSIGNED_BYTE` texture upload expects.
///
/// `#[repr(transparent)]` lets a slice of `Rgba` be reinterpreted as raw bytes
/// with `bytemuck`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
)]
#[repr(transparent)]
pub struct Rgba(pub u32);

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self(0x0000_0000);
    /// Opaque black.
    pub const BLACK: Self = Self(0xFF00_0000);
    /// Opaque white.
    pub const WHITE: Self = Self(0xFFFF_FFFF);
    /// Opaque red.
    pub const RED: Self = Self(0xFF00_00FF);
    /// Opaque green.
    pub const GREEN: Self = Self(0xFF00_FF00);
    /// Opaque blue.
    pub const BLUE: Self = Self(0xFFFF_0000);

    /// Packs four 8-bit channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self((r as u32) | ((g as u32) << 8) | ((b as u32) << 16) | ((a as u32) << 24))
    }

    /// Packs four normalized float channels, clamping each to `[0.0, 1.0]`.
    pub fn from_f32(r: f32, g: f32, b: f32, a: f32) -> Self {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(q(r), q(g), q(b), q(a))
    }

    /// The red channel.
    #[inline]
    pub const fn r(self) -> u8 {
        self.0 as u8
    }

    /// The green channel.
    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// The blue channel.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// The alpha channel.
    #[inline]
    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// The red channel normalized to `[0.0, 1.0]`.
    #[inline]
    pub fn r_f32(self) -> f32 {
        self.r() as f32 / 255.0
    }

    /// The green channel normalized to `[0.0, 1.0]`.
    #[inline]
    pub fn g_f32(self) -> f32 {
        self.g() as f32 / 255.0
    }

    /// The blue channel normalized to `[0.0, 1.0]`.
    #[inline]
    pub fn b_f32(self) -> f32 {
        self.b() as f32 / 255.0
    }

    /// The alpha channel normalized to `[0.0, 1.0]`.
    #[inline]
    pub fn a_f32(self) -> f32 {
        self.a() as f32 / 255.0
    }

    /// Returns the four channels normalized to `[0.0, 1.0]`, in `[r, g, b, a]` order.
    pub fn to_f32_array(self) -> [f32; 4] {
        [self.r_f32(), self.g_f32(), self.b_f32(), self.a_f32()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn channels_are_packed_red_lowest() {
        let c = Rgba::new(0x11, 0x22, 0x33, 0x44);
        assert_eq!(c.0, 0x4433_2211);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (0x11, 0x22, 0x33, 0x44));
    }

    #[test]
    fn named_colors_match_their_channels() {
        assert_eq!(Rgba::RED, Rgba::new(255, 0, 0, 255));
        assert_eq!(Rgba::GREEN, Rgba::new(0, 255, 0, 255));
        assert_eq!(Rgba::BLUE, Rgba::new(0, 0, 255, 255));
        assert_eq!(Rgba::BLACK.a(), 255);
    }

    #[test]
    fn float_accessors_are_normalized() {
        let c = Rgba::new(255, 0, 51, 102);
        assert_relative_eq!(c.r_f32(), 1.0);
        assert_relative_eq!(c.g_f32(), 0.0);
        assert_relative_eq!(c.b_f32(), 0.2);
        assert_relative_eq!(c.a_f32(), 0.4);
    }

    #[test]
    fn from_f32_clamps_out_of_range_channels() {
        let c = Rgba::from_f32(2.0, -1.0, 0.5, 1.0);
        assert_eq!(c.r(), 255);
        assert_eq!(c.g(), 0);
        assert_eq!(c.b(), 128);
        assert_eq!(c.a(), 255);
    }

    #[test]
    fn byte_view_is_rgba_order() {
        let pixels = [Rgba::new(1, 2, 3, 4)];
        let bytes: &[u8] = bytemuck::cast_slice(&pixels);
        assert_eq!(bytes.len(), 4);
        if cfg!(target_endian = "little") {
            assert_eq!(bytes, &[1, 2, 3, 4]);
        }
    }
}
