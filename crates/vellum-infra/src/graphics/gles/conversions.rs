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

use vellum_core::renderer::{BlendFactor, BufferKind, DrawType, ShaderStage, TextureKind, VarType};

/// `GL_LUMINANCE`. Part of GLES 2 but absent from desktop core profiles.
pub const LUMINANCE: u32 = 0x1909;

/// A local extension trait to convert our engine's types into GLES enum values.
/// This avoids Rust's orphan rules while keeping an idiomatic `.into_gl()` syntax.
pub trait IntoGl<T> {
    /// Consumes self and converts it into the GLES value.
    fn into_gl(self) -> T;
}

// --- Pipeline state ---

impl IntoGl<u32> for BlendFactor {
    fn into_gl(self) -> u32 {
        match self {
            BlendFactor::DestinationAlpha => glow::DST_ALPHA,
            BlendFactor::DestinationColor => glow::DST_COLOR,
            BlendFactor::One => glow::ONE,
            BlendFactor::OneMinusDestinationAlpha => glow::ONE_MINUS_DST_ALPHA,
            BlendFactor::OneMinusDestinationColor => glow::ONE_MINUS_DST_COLOR,
            BlendFactor::OneMinusSourceAlpha => glow::ONE_MINUS_SRC_ALPHA,
            BlendFactor::OneMinusSourceColor => glow::ONE_MINUS_SRC_COLOR,
            BlendFactor::SourceAlpha => glow::SRC_ALPHA,
            BlendFactor::SourceColor => glow::SRC_COLOR,
            BlendFactor::Zero => glow::ZERO,
        }
    }
}

impl IntoGl<u32> for DrawType {
    fn into_gl(self) -> u32 {
        match self {
            DrawType::Triangles => glow::TRIANGLES,
            DrawType::TriangleStrip => glow::TRIANGLE_STRIP,
        }
    }
}

// --- Resources ---

impl IntoGl<u32> for ShaderStage {
    fn into_gl(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl IntoGl<u32> for BufferKind {
    fn into_gl(self) -> u32 {
        match self {
            BufferKind::Vertex => glow::ARRAY_BUFFER,
            BufferKind::Index => glow::ELEMENT_ARRAY_BUFFER,
        }
    }
}

impl IntoGl<u32> for TextureKind {
    fn into_gl(self) -> u32 {
        match self {
            TextureKind::Rgba => glow::RGBA,
            TextureKind::Luminance => LUMINANCE,
        }
    }
}

/// The component type of a vertex attribute.
impl IntoGl<u32> for VarType {
    fn into_gl(self) -> u32 {
        match self {
            VarType::Int1 | VarType::TextureUnit => glow::INT,
            VarType::Float1 | VarType::Float2 | VarType::Float3 | VarType::Float4 | VarType::Mat4 => {
                glow::FLOAT
            }
            VarType::Bool1 | VarType::Byte4 => glow::UNSIGNED_BYTE,
        }
    }
}

// --- Helpers ---

/// The `glClear` mask selecting the given planes.
pub fn clear_mask(color: bool, depth: bool, stencil: bool) -> u32 {
    let mut mask = 0;
    if color {
        mask |= glow::COLOR_BUFFER_BIT;
    }
    if depth {
        mask |= glow::DEPTH_BUFFER_BIT;
    }
    if stencil {
        mask |= glow::STENCIL_BUFFER_BIT;
    }
    mask
}

/// The minification filter for a texture with or without mipmaps.
pub fn min_filter(mipmaps: bool, linear: bool) -> u32 {
    match (mipmaps, linear) {
        (true, true) => glow::LINEAR_MIPMAP_NEAREST,
        (true, false) => glow::NEAREST_MIPMAP_NEAREST,
        (false, true) => glow::LINEAR,
        (false, false) => glow::NEAREST,
    }
}

/// The magnification filter.
pub fn mag_filter(linear: bool) -> u32 {
    if linear {
        glow::LINEAR
    } else {
        glow::NEAREST
    }
}
