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

//! [`GlesApi`] on top of a real `glow` context.

use std::marker::PhantomData;
use std::num::NonZeroU32;

use glow::HasContext;

use super::api::GlesApi;

/// A native OpenGL ES context driven through `glow`.
///
/// The type is neither `Send` nor `Sync`: a GL context is only valid on the
/// thread it was made current on.
pub struct GlowGles {
    gl: glow::Context,
    _not_send: PhantomData<*const ()>,
}

impl GlowGles {
    /// Wraps a `glow` context.
    ///
    /// # Safety
    ///
    /// The context must be current on the calling thread for the whole
    /// lifetime of the returned value, and every method must be called from
    /// that thread.
    pub unsafe fn new(gl: glow::Context) -> Self {
        log::info!("GlowGles: Wrapping native GLES context.");
        Self {
            gl,
            _not_send: PhantomData,
        }
    }

    /// The wrapped `glow` context.
    pub fn context(&self) -> &glow::Context {
        &self.gl
    }
}

fn buffer(id: u32) -> Option<glow::NativeBuffer> {
    NonZeroU32::new(id).map(glow::NativeBuffer)
}

fn texture(id: u32) -> Option<glow::NativeTexture> {
    NonZeroU32::new(id).map(glow::NativeTexture)
}

fn shader(id: u32) -> Option<glow::NativeShader> {
    NonZeroU32::new(id).map(glow::NativeShader)
}

fn program(id: u32) -> Option<glow::NativeProgram> {
    NonZeroU32::new(id).map(glow::NativeProgram)
}

fn location(location: i32) -> Option<glow::NativeUniformLocation> {
    u32::try_from(location).ok().map(glow::NativeUniformLocation)
}

// SAFETY (all blocks below): `GlowGles::new` requires the context to be current
// on this thread, and the type cannot leave it.
impl GlesApi for GlowGles {
    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        unsafe { self.gl.clear_color(r, g, b, a) }
    }

    fn clear_depth(&self, depth: f32) {
        unsafe { self.gl.clear_depth_f32(depth) }
    }

    fn clear_stencil(&self, stencil: i32) {
        unsafe { self.gl.clear_stencil(stencil) }
    }

    fn clear(&self, mask: u32) {
        unsafe { self.gl.clear(mask) }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.viewport(x, y, width, height) }
    }

    fn create_buffer(&self) -> Result<u32, String> {
        unsafe { self.gl.create_buffer() }.map(|b| b.0.get())
    }

    fn delete_buffer(&self, id: u32) {
        if let Some(b) = buffer(id) {
            unsafe { self.gl.delete_buffer(b) }
        }
    }

    fn bind_buffer(&self, target: u32, id: u32) {
        unsafe { self.gl.bind_buffer(target, buffer(id)) }
    }

    fn buffer_data(&self, target: u32, data: &[u8], usage: u32) {
        unsafe { self.gl.buffer_data_u8_slice(target, data, usage) }
    }

    fn create_texture(&self) -> Result<u32, String> {
        unsafe { self.gl.create_texture() }.map(|t| t.0.get())
    }

    fn delete_texture(&self, id: u32) {
        if let Some(t) = texture(id) {
            unsafe { self.gl.delete_texture(t) }
        }
    }

    fn bind_texture(&self, target: u32, id: u32) {
        unsafe { self.gl.bind_texture(target, texture(id)) }
    }

    fn active_texture(&self, unit: u32) {
        unsafe { self.gl.active_texture(unit) }
    }

    fn tex_parameter_i32(&self, target: u32, parameter: u32, value: i32) {
        unsafe { self.gl.tex_parameter_i32(target, parameter, value) }
    }

    fn tex_image_2d(
        &self,
        target: u32,
        internal_format: i32,
        width: i32,
        height: i32,
        format: u32,
        ty: u32,
        pixels: &[u8],
    ) {
        unsafe {
            self.gl.tex_image_2d(
                target,
                0,
                internal_format,
                width,
                height,
                0,
                format,
                ty,
                Some(pixels),
            )
        }
    }

    fn create_shader(&self, shader_type: u32) -> Result<u32, String> {
        unsafe { self.gl.create_shader(shader_type) }.map(|s| s.0.get())
    }

    fn shader_source(&self, id: u32, source: &str) {
        if let Some(s) = shader(id) {
            unsafe { self.gl.shader_source(s, source) }
        }
    }

    fn compile_shader(&self, id: u32) {
        if let Some(s) = shader(id) {
            unsafe { self.gl.compile_shader(s) }
        }
    }

    fn shader_compile_status(&self, id: u32) -> bool {
        shader(id).is_some_and(|s| unsafe { self.gl.get_shader_compile_status(s) })
    }

    fn shader_info_log(&self, id: u32) -> String {
        shader(id)
            .map(|s| unsafe { self.gl.get_shader_info_log(s) })
            .unwrap_or_default()
    }

    fn delete_shader(&self, id: u32) {
        if let Some(s) = shader(id) {
            unsafe { self.gl.delete_shader(s) }
        }
    }

    fn create_program(&self) -> Result<u32, String> {
        unsafe { self.gl.create_program() }.map(|p| p.0.get())
    }

    fn attach_shader(&self, program_id: u32, shader_id: u32) {
        if let (Some(p), Some(s)) = (program(program_id), shader(shader_id)) {
            unsafe { self.gl.attach_shader(p, s) }
        }
    }

    fn link_program(&self, id: u32) {
        if let Some(p) = program(id) {
            unsafe { self.gl.link_program(p) }
        }
    }

    fn program_link_status(&self, id: u32) -> bool {
        program(id).is_some_and(|p| unsafe { self.gl.get_program_link_status(p) })
    }

    fn program_info_log(&self, id: u32) -> String {
        program(id)
            .map(|p| unsafe { self.gl.get_program_info_log(p) })
            .unwrap_or_default()
    }

    fn delete_program(&self, id: u32) {
        if let Some(p) = program(id) {
            unsafe { self.gl.delete_program(p) }
        }
    }

    fn use_program(&self, id: u32) {
        unsafe { self.gl.use_program(program(id)) }
    }

    fn attrib_location(&self, program_id: u32, name: &str) -> i32 {
        program(program_id)
            .and_then(|p| unsafe { self.gl.get_attrib_location(p, name) })
            .and_then(|loc| i32::try_from(loc).ok())
            .unwrap_or(-1)
    }

    fn uniform_location(&self, program_id: u32, name: &str) -> i32 {
        program(program_id)
            .and_then(|p| unsafe { self.gl.get_uniform_location(p, name) })
            .and_then(|loc| i32::try_from(loc.0).ok())
            .unwrap_or(-1)
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(index) }
    }

    fn disable_vertex_attrib_array(&self, index: u32) {
        unsafe { self.gl.disable_vertex_attrib_array(index) }
    }

    fn vertex_attrib_pointer(
        &self,
        index: u32,
        size: i32,
        ty: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        unsafe {
            self.gl
                .vertex_attrib_pointer_f32(index, size, ty, normalized, stride, offset)
        }
    }

    fn uniform_1_i32(&self, loc: i32, value: i32) {
        unsafe { self.gl.uniform_1_i32(location(loc).as_ref(), value) }
    }

    fn uniform_1_f32(&self, loc: i32, value: f32) {
        unsafe { self.gl.uniform_1_f32(location(loc).as_ref(), value) }
    }

    fn uniform_matrix_4_f32(&self, loc: i32, transpose: bool, value: &[f32; 16]) {
        unsafe {
            self.gl
                .uniform_matrix_4_f32_slice(location(loc).as_ref(), transpose, value)
        }
    }

    fn enable(&self, capability: u32) {
        unsafe { self.gl.enable(capability) }
    }

    fn disable(&self, capability: u32) {
        unsafe { self.gl.disable(capability) }
    }

    fn blend_func_separate(&self, src_rgb: u32, dst_rgb: u32, src_alpha: u32, dst_alpha: u32) {
        unsafe {
            self.gl
                .blend_func_separate(src_rgb, dst_rgb, src_alpha, dst_alpha)
        }
    }

    fn draw_elements(&self, mode: u32, count: i32, element_type: u32, offset: i32) {
        unsafe { self.gl.draw_elements(mode, count, element_type, offset) }
    }
}
