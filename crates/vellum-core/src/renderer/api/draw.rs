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

//! The inputs of one indexed draw call.

use crate::renderer::api::pipeline::{BlendFactors, DrawType};
use crate::renderer::api::shader::Program;
use crate::renderer::api::uniform::UniformBindings;
use crate::renderer::api::vertex::VertexLayout;

/// Everything a device needs to issue one indexed draw.
///
/// `B` is the backend's buffer type and `T` its texture type. The buffers are
/// borrowed mutably because resolving their native handle may allocate or
/// upload.
pub struct DrawCommand<'a, B, T> {
    /// Interleaved vertex data; must be a vertex buffer.
    pub vertices: &'a mut B,
    /// 16-bit indices; must be an index buffer.
    pub indices: &'a mut B,
    /// The program to draw with, compiled on first use.
    pub program: &'a Program,
    /// Primitive topology.
    pub draw_type: DrawType,
    /// How `vertices` is laid out.
    pub layout: &'a VertexLayout,
    /// Number of indices to draw.
    pub vertex_count: i32,
    /// Byte offset into the index buffer.
    pub offset: i32,
    /// Blend state.
    pub blending: BlendFactors,
    /// Uniform values for this draw only.
    pub uniforms: &'a UniformBindings<'a, T>,
}
