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

//! A headless [`GlesApi`] that records every call.
//!
//! `RecordingGles` behaves like a well-formed driver: it hands out fresh,
//! non-zero object names, tracks which objects are alive, and answers status
//! and location queries. It can be told to fail shader compilation, program
//! linking or allocations, and to report variables as inactive, which makes it
//! the backbone of the crate's tests and of offline tools.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap, HashSet};

use super::api::GlesApi;

/// One recorded native call.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum GlCall {
    ClearColor(f32, f32, f32, f32),
    ClearDepth(f32),
    ClearStencil(i32),
    Clear(u32),
    Viewport(i32, i32, i32, i32),
    CreateBuffer(u32),
    DeleteBuffer(u32),
    BindBuffer {
        target: u32,
        buffer: u32,
    },
    BufferData {
        target: u32,
        data: Vec<u8>,
        usage: u32,
    },
    CreateTexture(u32),
    DeleteTexture(u32),
    BindTexture {
        target: u32,
        texture: u32,
    },
    ActiveTexture(u32),
    TexParameter {
        target: u32,
        parameter: u32,
        value: i32,
    },
    TexImage2D {
        target: u32,
        internal_format: i32,
        width: i32,
        height: i32,
        format: u32,
        ty: u32,
        pixels: Vec<u8>,
    },
    CreateShader {
        id: u32,
        shader_type: u32,
    },
    ShaderSource(u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader {
        program: u32,
        shader: u32,
    },
    LinkProgram(u32),
    DeleteProgram(u32),
    UseProgram(u32),
    AttribLocation {
        program: u32,
        name: String,
    },
    UniformLocation {
        program: u32,
        name: String,
    },
    EnableVertexAttribArray(u32),
    DisableVertexAttribArray(u32),
    VertexAttribPointer {
        index: u32,
        size: i32,
        ty: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    },
    Uniform1i(i32, i32),
    Uniform1f(i32, f32),
    UniformMatrix4 {
        location: i32,
        transpose: bool,
        value: [f32; 16],
    },
    Enable(u32),
    Disable(u32),
    BlendFuncSeparate(u32, u32, u32, u32),
    DrawElements {
        mode: u32,
        count: i32,
        element_type: u32,
        offset: i32,
    },
}

/// A recording, headless OpenGL ES context.
#[derive(Debug)]
pub struct RecordingGles {
    calls: RefCell<Vec<GlCall>>,
    next_id: Cell<u32>,
    buffers: RefCell<BTreeSet<u32>>,
    textures: RefCell<BTreeSet<u32>>,
    shaders: RefCell<BTreeSet<u32>>,
    programs: RefCell<BTreeSet<u32>>,
    shader_sources: RefCell<HashMap<u32, String>>,
    locations: RefCell<HashMap<String, i32>>,
    inactive: RefCell<HashSet<String>>,
    compile_failure_marker: RefCell<Option<String>>,
    fail_links: Cell<bool>,
    fail_allocations: Cell<bool>,
}

impl Default for RecordingGles {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingGles {
    /// A context that succeeds at everything.
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            buffers: RefCell::new(BTreeSet::new()),
            textures: RefCell::new(BTreeSet::new()),
            shaders: RefCell::new(BTreeSet::new()),
            programs: RefCell::new(BTreeSet::new()),
            shader_sources: RefCell::new(HashMap::new()),
            locations: RefCell::new(HashMap::new()),
            inactive: RefCell::new(HashSet::new()),
            compile_failure_marker: RefCell::new(None),
            fail_links: Cell::new(false),
            fail_allocations: Cell::new(false),
        }
    }

    /// Makes every shader whose source contains `marker` fail to compile.
    pub fn set_compile_failure_marker(&self, marker: Option<&str>) {
        *self.compile_failure_marker.borrow_mut() = marker.map(str::to_owned);
    }

    /// Makes every subsequent link fail (or succeed again).
    pub fn set_fail_links(&self, fail: bool) {
        self.fail_links.set(fail);
    }

    /// Makes every subsequent `create_*` call fail (or succeed again).
    pub fn set_fail_allocations(&self, fail: bool) {
        self.fail_allocations.set(fail);
    }

    /// Reports the attribute or uniform `name` as not active in any program.
    pub fn set_inactive(&self, name: &str) {
        self.inactive.borrow_mut().insert(name.to_owned());
    }

    /// A copy of every call recorded so far.
    pub fn calls(&self) -> Vec<GlCall> {
        self.calls.borrow().clone()
    }

    /// Returns the recorded calls and starts a fresh log.
    pub fn take_calls(&self) -> Vec<GlCall> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }

    /// Number of recorded calls for which `predicate` holds.
    pub fn count(&self, predicate: impl Fn(&GlCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| predicate(c)).count()
    }

    /// Number of buffers created and not yet deleted.
    pub fn live_buffers(&self) -> usize {
        self.buffers.borrow().len()
    }

    /// Number of textures created and not yet deleted.
    pub fn live_textures(&self) -> usize {
        self.textures.borrow().len()
    }

    /// Number of shaders created and not yet deleted.
    pub fn live_shaders(&self) -> usize {
        self.shaders.borrow().len()
    }

    /// Number of programs created and not yet deleted.
    pub fn live_programs(&self) -> usize {
        self.programs.borrow().len()
    }

    fn record(&self, call: GlCall) {
        self.calls.borrow_mut().push(call);
    }

    fn allocate(&self, what: &str, live: &RefCell<BTreeSet<u32>>) -> Result<u32, String> {
        if self.fail_allocations.get() {
            return Err(format!("out of memory while creating a {what}"));
        }
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        live.borrow_mut().insert(id);
        Ok(id)
    }

    fn location_of(&self, name: &str) -> i32 {
        if self.inactive.borrow().contains(name) {
            return -1;
        }
        let mut locations = self.locations.borrow_mut();
        let next = locations.len() as i32;
        *locations.entry(name.to_owned()).or_insert(next)
    }
}

impl GlesApi for RecordingGles {
    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.record(GlCall::ClearColor(r, g, b, a));
    }

    fn clear_depth(&self, depth: f32) {
        self.record(GlCall::ClearDepth(depth));
    }

    fn clear_stencil(&self, stencil: i32) {
        self.record(GlCall::ClearStencil(stencil));
    }

    fn clear(&self, mask: u32) {
        self.record(GlCall::Clear(mask));
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(GlCall::Viewport(x, y, width, height));
    }

    fn create_buffer(&self) -> Result<u32, String> {
        let id = self.allocate("buffer", &self.buffers)?;
        self.record(GlCall::CreateBuffer(id));
        Ok(id)
    }

    fn delete_buffer(&self, buffer: u32) {
        self.buffers.borrow_mut().remove(&buffer);
        self.record(GlCall::DeleteBuffer(buffer));
    }

    fn bind_buffer(&self, target: u32, buffer: u32) {
        self.record(GlCall::BindBuffer { target, buffer });
    }

    fn buffer_data(&self, target: u32, data: &[u8], usage: u32) {
        self.record(GlCall::BufferData {
            target,
            data: data.to_vec(),
            usage,
        });
    }

    fn create_texture(&self) -> Result<u32, String> {
        let id = self.allocate("texture", &self.textures)?;
        self.record(GlCall::CreateTexture(id));
        Ok(id)
    }

    fn delete_texture(&self, texture: u32) {
        self.textures.borrow_mut().remove(&texture);
        self.record(GlCall::DeleteTexture(texture));
    }

    fn bind_texture(&self, target: u32, texture: u32) {
        self.record(GlCall::BindTexture { target, texture });
    }

    fn active_texture(&self, unit: u32) {
        self.record(GlCall::ActiveTexture(unit));
    }

    fn tex_parameter_i32(&self, target: u32, parameter: u32, value: i32) {
        self.record(GlCall::TexParameter {
            target,
            parameter,
            value,
        });
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
        self.record(GlCall::TexImage2D {
            target,
            internal_format,
            width,
            height,
            format,
            ty,
            pixels: pixels.to_vec(),
        });
    }

    fn create_shader(&self, shader_type: u32) -> Result<u32, String> {
        let id = self.allocate("shader", &self.shaders)?;
        self.record(GlCall::CreateShader { id, shader_type });
        Ok(id)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        self.shader_sources
            .borrow_mut()
            .insert(shader, source.to_owned());
        self.record(GlCall::ShaderSource(shader));
    }

    fn compile_shader(&self, shader: u32) {
        self.record(GlCall::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        let marker = self.compile_failure_marker.borrow();
        match (marker.as_deref(), self.shader_sources.borrow().get(&shader)) {
            (Some(marker), Some(source)) => !source.contains(marker),
            _ => true,
        }
    }

    fn shader_info_log(&self, shader: u32) -> String {
        if self.shader_compile_status(shader) {
            String::new()
        } else {
            format!("0:1: error: shader {shader} rejected by the driver")
        }
    }

    fn delete_shader(&self, shader: u32) {
        self.shaders.borrow_mut().remove(&shader);
        self.shader_sources.borrow_mut().remove(&shader);
        self.record(GlCall::DeleteShader(shader));
    }

    fn create_program(&self) -> Result<u32, String> {
        let id = self.allocate("program", &self.programs)?;
        self.record(GlCall::CreateProgram(id));
        Ok(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.record(GlCall::AttachShader { program, shader });
    }

    fn link_program(&self, program: u32) {
        self.record(GlCall::LinkProgram(program));
    }

    fn program_link_status(&self, _program: u32) -> bool {
        !self.fail_links.get()
    }

    fn program_info_log(&self, program: u32) -> String {
        if self.fail_links.get() {
            format!("program {program}: vertex and fragment varyings do not match")
        } else {
            String::new()
        }
    }

    fn delete_program(&self, program: u32) {
        self.programs.borrow_mut().remove(&program);
        self.record(GlCall::DeleteProgram(program));
    }

    fn use_program(&self, program: u32) {
        self.record(GlCall::UseProgram(program));
    }

    fn attrib_location(&self, program: u32, name: &str) -> i32 {
        self.record(GlCall::AttribLocation {
            program,
            name: name.to_owned(),
        });
        self.location_of(name)
    }

    fn uniform_location(&self, program: u32, name: &str) -> i32 {
        self.record(GlCall::UniformLocation {
            program,
            name: name.to_owned(),
        });
        self.location_of(name)
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(GlCall::EnableVertexAttribArray(index));
    }

    fn disable_vertex_attrib_array(&self, index: u32) {
        self.record(GlCall::DisableVertexAttribArray(index));
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
        self.record(GlCall::VertexAttribPointer {
            index,
            size,
            ty,
            normalized,
            stride,
            offset,
        });
    }

    fn uniform_1_i32(&self, location: i32, value: i32) {
        self.record(GlCall::Uniform1i(location, value));
    }

    fn uniform_1_f32(&self, location: i32, value: f32) {
        self.record(GlCall::Uniform1f(location, value));
    }

    fn uniform_matrix_4_f32(&self, location: i32, transpose: bool, value: &[f32; 16]) {
        self.record(GlCall::UniformMatrix4 {
            location,
            transpose,
            value: *value,
        });
    }

    fn enable(&self, capability: u32) {
        self.record(GlCall::Enable(capability));
    }

    fn disable(&self, capability: u32) {
        self.record(GlCall::Disable(capability));
    }

    fn blend_func_separate(&self, src_rgb: u32, dst_rgb: u32, src_alpha: u32, dst_alpha: u32) {
        self.record(GlCall::BlendFuncSeparate(
            src_rgb, dst_rgb, src_alpha, dst_alpha,
        ));
    }

    fn draw_elements(&self, mode: u32, count: i32, element_type: u32, offset: i32) {
        self.record(GlCall::DrawElements {
            mode,
            count,
            element_type,
            offset,
        });
    }
}
