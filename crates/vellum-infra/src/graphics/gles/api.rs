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

//! The subset of the OpenGL ES 2 API the binding drives.
//!
//! Object names are raw `u32`s where `0` means "none", and variable locations
//! are `i32`s where a negative value means the variable is not active in the
//! program, exactly as the native API reports them.

/// A native OpenGL ES 2 context.
///
/// Every method maps one-to-one onto a native entry point. Implementations
/// must only be used on the thread the context is current on.
pub trait GlesApi {
    // --- Frame ---

    /// `glClearColor`.
    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32);
    /// `glClearDepthf`.
    fn clear_depth(&self, depth: f32);
    /// `glClearStencil`.
    fn clear_stencil(&self, stencil: i32);
    /// `glClear`.
    fn clear(&self, mask: u32);
    /// `glViewport`.
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);

    // --- Buffers ---

    /// `glGenBuffers` for a single buffer.
    fn create_buffer(&self) -> Result<u32, String>;
    /// `glDeleteBuffers` for a single buffer.
    fn delete_buffer(&self, buffer: u32);
    /// `glBindBuffer`.
    fn bind_buffer(&self, target: u32, buffer: u32);
    /// `glBufferData`.
    fn buffer_data(&self, target: u32, data: &[u8], usage: u32);

    // --- Textures ---

    /// `glGenTextures` for a single texture.
    fn create_texture(&self) -> Result<u32, String>;
    /// `glDeleteTextures` for a single texture.
    fn delete_texture(&self, texture: u32);
    /// `glBindTexture`.
    fn bind_texture(&self, target: u32, texture: u32);
    /// `glActiveTexture`.
    fn active_texture(&self, unit: u32);
    /// `glTexParameteri`.
    fn tex_parameter_i32(&self, target: u32, parameter: u32, value: i32);
    /// `glTexImage2D` with level 0 and no border.
    #[allow(clippy::too_many_arguments)]
    fn tex_image_2d(
        &self,
        target: u32,
        internal_format: i32,
        width: i32,
        height: i32,
        format: u32,
        ty: u32,
        pixels: &[u8],
    );

    // --- Shaders and programs ---

    /// `glCreateShader`.
    fn create_shader(&self, shader_type: u32) -> Result<u32, String>;
    /// `glShaderSource` with a single string.
    fn shader_source(&self, shader: u32, source: &str);
    /// `glCompileShader`.
    fn compile_shader(&self, shader: u32);
    /// `GL_COMPILE_STATUS` of `shader`.
    fn shader_compile_status(&self, shader: u32) -> bool;
    /// `glGetShaderInfoLog`.
    fn shader_info_log(&self, shader: u32) -> String;
    /// `glDeleteShader`.
    fn delete_shader(&self, shader: u32);
    /// `glCreateProgram`.
    fn create_program(&self) -> Result<u32, String>;
    /// `glAttachShader`.
    fn attach_shader(&self, program: u32, shader: u32);
    /// `glLinkProgram`.
    fn link_program(&self, program: u32);
    /// `GL_LINK_STATUS` of `program`.
    fn program_link_status(&self, program: u32) -> bool;
    /// `glGetProgramInfoLog`.
    fn program_info_log(&self, program: u32) -> String;
    /// `glDeleteProgram`.
    fn delete_program(&self, program: u32);
    /// `glUseProgram`.
    fn use_program(&self, program: u32);

    // --- Attributes and uniforms ---

    /// `glGetAttribLocation`; negative when the attribute is not active.
    fn attrib_location(&self, program: u32, name: &str) -> i32;
    /// `glGetUniformLocation`; negative when the uniform is not active.
    fn uniform_location(&self, program: u32, name: &str) -> i32;
    /// `glEnableVertexAttribArray`.
    fn enable_vertex_attrib_array(&self, index: u32);
    /// `glDisableVertexAttribArray`.
    fn disable_vertex_attrib_array(&self, index: u32);
    /// `glVertexAttribPointer` with a byte offset into the bound array buffer.
    fn vertex_attrib_pointer(
        &self,
        index: u32,
        size: i32,
        ty: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    );
    /// `glUniform1i`.
    fn uniform_1_i32(&self, location: i32, value: i32);
    /// `glUniform1f`.
    fn uniform_1_f32(&self, location: i32, value: f32);
    /// `glUniformMatrix4fv` for a single column-major matrix.
    fn uniform_matrix_4_f32(&self, location: i32, transpose: bool, value: &[f32; 16]);

    // --- Pipeline state and drawing ---

    /// `glEnable`.
    fn enable(&self, capability: u32);
    /// `glDisable`.
    fn disable(&self, capability: u32);
    /// `glBlendFuncSeparate`.
    fn blend_func_separate(&self, src_rgb: u32, dst_rgb: u32, src_alpha: u32, dst_alpha: u32);
    /// `glDrawElements` with a byte offset into the bound element buffer.
    fn draw_elements(&self, mode: u32, count: i32, element_type: u32, offset: i32);
}
