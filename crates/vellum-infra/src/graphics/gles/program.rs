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

use std::fmt;
use std::rc::Rc;

use vellum_core::renderer::{Program, ResourceError, ShaderError, ShaderStage};

use super::api::GlesApi;
use super::conversions::IntoGl;

/// Owns one native shader object.
struct ShaderHandle<G: GlesApi> {
    gl: Rc<G>,
    id: u32,
}

impl<G: GlesApi> ShaderHandle<G> {
    fn compile(gl: &Rc<G>, stage: ShaderStage, source: &str) -> Result<Self, ResourceError> {
        let id = gl
            .create_shader(stage.into_gl())
            .map_err(ResourceError::AllocationFailed)?;
        let shader = Self { gl: gl.clone(), id };

        gl.shader_source(id, source);
        gl.compile_shader(id);
        if !gl.shader_compile_status(id) {
            let log = gl.shader_info_log(id);
            log::error!("GlesProgram: Failed to compile {stage} shader: {log}");
            return Err(ShaderError::Compile {
                stage,
                log,
                source: source.to_owned(),
            }
            .into());
        }
        Ok(shader)
    }
}

impl<G: GlesApi> Drop for ShaderHandle<G> {
    fn drop(&mut self) {
        self.gl.delete_shader(self.id);
    }
}

/// Owns one native program object.
struct ProgramHandle<G: GlesApi> {
    gl: Rc<G>,
    id: u32,
}

impl<G: GlesApi> Drop for ProgramHandle<G> {
    fn drop(&mut self) {
        self.gl.delete_program(self.id);
    }
}

struct LinkedProgram<G: GlesApi> {
    program: ProgramHandle<G>,
    // Kept alive for as long as the program; released together with it.
    _vertex: ShaderHandle<G>,
    _fragment: ShaderHandle<G>,
}

/// A linked vertex + fragment program.
///
/// All three native objects are released together by [`GlesProgram::close`]
/// or on drop. If construction fails, whatever had been created is released
/// before the error is returned.
pub struct GlesProgram<G: GlesApi> {
    name: String,
    linked: Option<LinkedProgram<G>>,
}

impl<G: GlesApi> GlesProgram<G> {
    /// Compiles and links `program`.
    ///
    /// The fragment stage is compiled before the vertex stage.
    ///
    /// # Errors
    ///
    /// * `ResourceError::Shader(ShaderError::Compile)` carrying the stage, the
    ///   driver log and the source verbatim.
    /// * `ResourceError::Shader(ShaderError::Link)` carrying the driver log and
    ///   the native program id.
    /// * `ResourceError::AllocationFailed` if a native object cannot be created.
    pub fn new(gl: Rc<G>, program: &Program) -> Result<Self, ResourceError> {
        let id = gl
            .create_program()
            .map_err(ResourceError::AllocationFailed)?;
        let handle = ProgramHandle { gl: gl.clone(), id };

        let fragment = ShaderHandle::compile(
            &gl,
            ShaderStage::Fragment,
            program.source(ShaderStage::Fragment),
        )?;
        let vertex = ShaderHandle::compile(
            &gl,
            ShaderStage::Vertex,
            program.source(ShaderStage::Vertex),
        )?;

        gl.attach_shader(id, fragment.id);
        gl.attach_shader(id, vertex.id);
        gl.link_program(id);
        if !gl.program_link_status(id) {
            let log = gl.program_info_log(id);
            log::error!(
                "GlesProgram: Failed to link program '{}': {log}",
                program.name()
            );
            return Err(ShaderError::Link {
                log,
                program_id: id,
            }
            .into());
        }

        log::info!(
            "GlesProgram: Linked program '{}' as {id}.",
            program.name()
        );
        Ok(Self {
            name: program.name().to_owned(),
            linked: Some(LinkedProgram {
                program: handle,
                _vertex: vertex,
                _fragment: fragment,
            }),
        })
    }

    /// The name the program was compiled under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The native program name.
    ///
    /// # Errors
    ///
    /// `ResourceError::InvalidHandle` once the program has been closed.
    pub fn native_handle(&self) -> Result<u32, ResourceError> {
        self.linked
            .as_ref()
            .map(|linked| linked.program.id)
            .ok_or(ResourceError::InvalidHandle)
    }

    /// Makes this the current program.
    pub fn use_program(&self) -> Result<(), ResourceError> {
        let id = self.native_handle()?;
        if let Some(linked) = &self.linked {
            linked.program.gl.use_program(id);
        }
        Ok(())
    }

    /// Clears the current program, whichever it is.
    pub fn unuse(&self) {
        if let Some(linked) = &self.linked {
            linked.program.gl.use_program(0);
        }
    }

    /// Releases the program and both shaders. Calling it again is a no-op.
    pub fn close(&mut self) {
        if let Some(linked) = self.linked.take() {
            log::debug!(
                "GlesProgram: Deleting program '{}' ({}).",
                self.name,
                linked.program.id
            );
        }
    }

    /// Returns `true` once the program has been closed.
    pub fn is_closed(&self) -> bool {
        self.linked.is_none()
    }
}

impl<G: GlesApi> fmt::Debug for GlesProgram<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlesProgram")
            .field("name", &self.name)
            .field("handle", &self.native_handle().ok())
            .finish()
    }
}
