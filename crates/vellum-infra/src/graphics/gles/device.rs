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

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use vellum_core::math::Rgba;
use vellum_core::renderer::{
    check_buffers, BlendFactors, BufferKind, DrawCommand, GraphicsDevice, Program, RenderError,
    ResourceError, Texture, UniformBindings, UniformValue, VarType, VertexLayout,
};

use super::api::GlesApi;
use super::buffer::GlesBuffer;
use super::conversions::{clear_mask, IntoGl};
use super::program::GlesProgram;
use super::queue::RepaintSignal;
use super::texture::GlesTexture;

/// The OpenGL ES 2 implementation of [`GraphicsDevice`].
///
/// The device shares the native context with every resource it creates
/// through an `Rc`, which keeps all of them on the render thread. Compiled
/// programs are cached by name for the lifetime of the device.
pub struct GlesDevice<G: GlesApi> {
    gl: Rc<G>,
    repaint: RepaintSignal,
    back_size: (u32, u32),
    programs: HashMap<String, GlesProgram<G>>,
}

impl<G: GlesApi> GlesDevice<G> {
    /// Creates a device on top of `gl`. Repaint requests go to `repaint`.
    pub fn new(gl: Rc<G>, repaint: RepaintSignal) -> Self {
        log::info!("GlesDevice: Created OpenGL ES 2.0 device.");
        Self {
            gl,
            repaint,
            back_size: (0, 0),
            programs: HashMap::new(),
        }
    }

    /// The native context.
    pub fn api(&self) -> &G {
        &self.gl
    }

    pub(crate) fn set_back_size(&mut self, width: u32, height: u32) {
        self.back_size = (width, height);
    }

    /// Stores the new back-buffer size and points the viewport at all of it.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.back_size = (width, height);
        self.gl.viewport(0, 0, width as i32, height as i32);
    }

    /// Returns the compiled program for `program.name()`, compiling it on first use.
    ///
    /// The name is the only cache key: a later program with the same name and
    /// different sources gets the instance compiled first.
    pub fn get_program(&mut self, program: &Program) -> Result<&GlesProgram<G>, ResourceError> {
        match self.programs.entry(program.name().to_owned()) {
            Entry::Occupied(entry) => {
                log::trace!("GlesDevice: Program cache hit for '{}'.", program.name());
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                log::debug!("GlesDevice: Compiling program '{}'.", program.name());
                let compiled = GlesProgram::new(self.gl.clone(), program)?;
                Ok(entry.insert(compiled))
            }
        }
    }

    /// Number of cached programs.
    pub fn program_count(&self) -> usize {
        self.programs.len()
    }

    /// Releases every cached program.
    pub fn close_programs(&mut self) {
        for (_, mut program) in self.programs.drain() {
            program.close();
        }
    }

    fn bind_attributes(&self, program_id: u32, layout: &VertexLayout, enabled: &mut Vec<u32>) {
        let stride = layout.total_size() as i32;
        for (attribute, position) in layout.iter() {
            let location = self.gl.attrib_location(program_id, attribute.name());
            if location < 0 {
                log::trace!(
                    "GlesDevice: Attribute '{}' is not active, skipped.",
                    attribute.name()
                );
                continue;
            }
            let location = location as u32;
            let ty = attribute.var_type();
            self.gl.enable_vertex_attrib_array(location);
            self.gl.vertex_attrib_pointer(
                location,
                ty.element_count(),
                ty.into_gl(),
                attribute.is_normalized(),
                stride,
                position as i32,
            );
            enabled.push(location);
        }
    }

    fn bind_uniforms(
        &self,
        program_id: u32,
        uniforms: &UniformBindings<'_, GlesTexture<G>>,
    ) -> Result<(), RenderError> {
        let mut unit = 0u32;
        for (uniform, value) in uniforms.iter() {
            let location = self.gl.uniform_location(program_id, uniform.name());
            match (uniform.var_type(), value) {
                (VarType::TextureUnit, UniformValue::TextureUnit(binding)) => {
                    self.gl.active_texture(glow::TEXTURE0 + unit);
                    if let Some(texture) = binding.texture {
                        texture.bind();
                        texture.set_filter(binding.linear);
                    }
                    self.gl.uniform_1_i32(location, unit as i32);
                    unit += 1;
                }
                (VarType::Mat4, UniformValue::Mat4(matrix)) => {
                    self.gl
                        .uniform_matrix_4_f32(location, false, &matrix.to_cols_array());
                }
                (VarType::Float1, UniformValue::Number(number)) => {
                    self.gl.uniform_1_f32(location, *number as f32);
                }
                (ty @ (VarType::TextureUnit | VarType::Mat4 | VarType::Float1), _) => {
                    return Err(RenderError::UniformValueMismatch {
                        uniform: uniform.name().to_owned(),
                        expected: ty,
                    });
                }
                (ty, _) => return Err(RenderError::UnsupportedUniformType(ty)),
            }
        }
        Ok(())
    }

    fn apply_blending(&self, blending: BlendFactors) {
        if blending.is_disabled() {
            self.gl.disable(glow::BLEND);
        } else {
            self.gl.enable(glow::BLEND);
            self.gl.blend_func_separate(
                blending.src_rgb.into_gl(),
                blending.dst_rgb.into_gl(),
                blending.src_a.into_gl(),
                blending.dst_a.into_gl(),
            );
        }
    }
}

impl<G: GlesApi> GraphicsDevice for GlesDevice<G> {
    type Buffer = GlesBuffer<G>;
    type Texture = GlesTexture<G>;

    fn backend_name(&self) -> &'static str {
        "OpenGL ES 2.0"
    }

    fn clear(
        &mut self,
        color: bool,
        depth: bool,
        stencil: bool,
        clear_color: Rgba,
        clear_depth: f32,
        clear_stencil: i32,
    ) {
        let [r, g, b, a] = clear_color.to_f32_array();
        self.gl.clear_color(r, g, b, a);
        self.gl.clear_depth(clear_depth);
        self.gl.clear_stencil(clear_stencil);
        self.gl.clear(clear_mask(color, depth, stencil));
    }

    fn create_buffer(&mut self, kind: BufferKind) -> GlesBuffer<G> {
        GlesBuffer::new(self.gl.clone(), kind)
    }

    fn create_texture(&mut self) -> Result<GlesTexture<G>, ResourceError> {
        GlesTexture::new(self.gl.clone())
    }

    fn draw(
        &mut self,
        command: DrawCommand<'_, GlesBuffer<G>, GlesTexture<G>>,
    ) -> Result<(), RenderError> {
        let DrawCommand {
            vertices,
            indices,
            program,
            draw_type,
            layout,
            vertex_count,
            offset,
            blending,
            uniforms,
        } = command;

        check_buffers(&*vertices, &*indices)?;
        let program_id = self.get_program(program)?.native_handle()?;
        vertices.bind()?;
        indices.bind()?;
        self.gl.use_program(program_id);

        let mut enabled = Vec::with_capacity(layout.attributes().len());
        self.bind_attributes(program_id, layout, &mut enabled);
        let result = self.bind_uniforms(program_id, uniforms).map(|()| {
            self.apply_blending(blending);
            self.gl.draw_elements(
                draw_type.into_gl(),
                vertex_count,
                glow::UNSIGNED_SHORT,
                offset,
            );
        });

        // Runs on the error path too, so a failed draw leaves no attribute enabled.
        self.gl.active_texture(glow::TEXTURE0);
        for location in enabled {
            self.gl.disable_vertex_attrib_array(location);
        }
        result
    }

    fn repaint(&self) {
        self.repaint.request();
    }

    fn back_size(&self) -> (u32, u32) {
        self.back_size
    }
}

impl<G: GlesApi> Drop for GlesDevice<G> {
    fn drop(&mut self) {
        if !self.programs.is_empty() {
            log::debug!(
                "GlesDevice: Releasing {} cached program(s).",
                self.programs.len()
            );
        }
        self.close_programs();
    }
}

impl<G: GlesApi> fmt::Debug for GlesDevice<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlesDevice")
            .field("back_size", &self.back_size)
            .field("programs", &self.programs.keys().collect::<Vec<_>>())
            .finish()
    }
}
