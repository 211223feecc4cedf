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

//! Blend state and primitive topology.

/// A multiplier applied to the source or destination color when blending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    /// Destination alpha.
    DestinationAlpha,
    /// Destination color.
    DestinationColor,
    /// `1`.
    One,
    /// `1 - destination alpha`.
    OneMinusDestinationAlpha,
    /// `1 - destination color`.
    OneMinusDestinationColor,
    /// `1 - source alpha`.
    OneMinusSourceAlpha,
    /// `1 - source color`.
    OneMinusSourceColor,
    /// Source alpha.
    SourceAlpha,
    /// Source color.
    SourceColor,
    /// `0`.
    Zero,
}

impl BlendFactor {
    /// Every blend factor, in declaration order.
    pub const ALL: [BlendFactor; 10] = [
        BlendFactor::DestinationAlpha,
        BlendFactor::DestinationColor,
        BlendFactor::One,
        BlendFactor::OneMinusDestinationAlpha,
        BlendFactor::OneMinusDestinationColor,
        BlendFactor::OneMinusSourceAlpha,
        BlendFactor::OneMinusSourceColor,
        BlendFactor::SourceAlpha,
        BlendFactor::SourceColor,
        BlendFactor::Zero,
    ];
}

/// Separate RGB and alpha blend factors for the source and destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendFactors {
    /// Multiplier of the source RGB channels.
    pub src_rgb: BlendFactor,
    /// Multiplier of the destination RGB channels.
    pub dst_rgb: BlendFactor,
    /// Multiplier of the source alpha channel.
    pub src_a: BlendFactor,
    /// Multiplier of the destination alpha channel.
    pub dst_a: BlendFactor,
}

impl BlendFactors {
    /// Source replaces destination; equivalent to blending turned off.
    pub const DISABLED: Self = Self::new(
        BlendFactor::One,
        BlendFactor::Zero,
        BlendFactor::One,
        BlendFactor::Zero,
    );

    /// Classic "source over" alpha blending.
    pub const NORMAL: Self = Self::new(
        BlendFactor::SourceAlpha,
        BlendFactor::OneMinusSourceAlpha,
        BlendFactor::One,
        BlendFactor::OneMinusSourceAlpha,
    );

    /// Additive blending.
    pub const ADD: Self = Self::new(
        BlendFactor::SourceAlpha,
        BlendFactor::DestinationAlpha,
        BlendFactor::One,
        BlendFactor::One,
    );

    /// Creates a blend state from its four factors.
    pub const fn new(
        src_rgb: BlendFactor,
        dst_rgb: BlendFactor,
        src_a: BlendFactor,
        dst_a: BlendFactor,
    ) -> Self {
        Self {
            src_rgb,
            dst_rgb,
            src_a,
            dst_a,
        }
    }

    /// Returns `true` if these factors leave the source untouched and ignore the destination.
    pub fn is_disabled(&self) -> bool {
        *self == Self::DISABLED
    }
}

impl Default for BlendFactors {
    fn default() -> Self {
        Self::DISABLED
    }
}

/// How consecutive indices are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawType {
    /// Every three indices form a triangle.
    Triangles,
    /// Every index after the first two forms a triangle with the previous two.
    TriangleStrip,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_one_zero_one_zero_is_disabled() {
        assert!(BlendFactors::DISABLED.is_disabled());
        assert!(BlendFactors::default().is_disabled());
        assert!(!BlendFactors::NORMAL.is_disabled());
        assert!(!BlendFactors::ADD.is_disabled());
    }

    #[test]
    fn all_lists_every_factor_once() {
        let unique: std::collections::HashSet<_> = BlendFactor::ALL.iter().collect();
        assert_eq!(unique.len(), BlendFactor::ALL.len());
    }
}
