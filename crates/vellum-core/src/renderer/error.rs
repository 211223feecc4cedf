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

//! Defines the hierarchy of error types for the rendering subsystem.

use crate::renderer::api::buffer::BufferKind;
use crate::renderer::api::shader::{ShaderStage, VarType};
use std::fmt;

/// An error related to the compilation or linking of a shader program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderError {
    /// A shader stage failed to compile.
    Compile {
        /// The stage that failed.
        stage: ShaderStage,
        /// The diagnostic log reported by the native compiler.
        log: String,
        /// The source text that was handed to the compiler, verbatim.
        source: String,
    },
    /// The compiled stages failed to link into a program.
    Link {
        /// The diagnostic log reported by the native linker.
        log: String,
        /// The native id of the program that failed to link.
        program_id: u32,
    },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Compile { stage, log, source } => {
                write!(f, "Error compiling {stage} shader: {log}\n{source}")
            }
            ShaderError::Link { log, program_id } => {
                write!(f, "Error linking program: '{log}' programId={program_id}")
            }
        }
    }
}

impl std::error::Error for ShaderError {}

/// An error related to the creation or use of a GPU resource (buffers, textures, programs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// A shader-specific error occurred.
    Shader(ShaderError),
    /// The native API refused to allocate a new object.
    AllocationFailed(String),
    /// The resource was used after it was closed.
    InvalidHandle,
    /// The data handed to an upload is smaller than the region it describes.
    OutOfBounds {
        /// The number of bytes the upload needs.
        expected: usize,
        /// The number of bytes provided.
        actual: usize,
    },
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::Shader(err) => write!(f, "Shader resource error: {err}"),
            ResourceError::AllocationFailed(msg) => {
                write!(f, "Native resource allocation failed: {msg}")
            }
            ResourceError::InvalidHandle => write!(f, "Resource used after it was closed."),
            ResourceError::OutOfBounds { expected, actual } => write!(
                f,
                "Resource access out of bounds: needs {expected} bytes, got {actual}"
            ),
        }
    }
}

impl std::error::Error for ResourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResourceError::Shader(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ShaderError> for ResourceError {
    fn from(err: ShaderError) -> Self {
        ResourceError::Shader(err)
    }
}

/// A high-level error that can occur while driving a graphics device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// An error occurred while managing a GPU resource.
    Resource(ResourceError),
    /// A uniform was declared with a type the backend has no upload path for.
    UnsupportedUniformType(VarType),
    /// A uniform value does not have the shape its declared type requires.
    UniformValueMismatch {
        /// The name of the offending uniform.
        uniform: String,
        /// The type the uniform was declared with.
        expected: VarType,
    },
    /// A buffer of the wrong kind was handed to a draw call.
    BufferKindMismatch {
        /// The kind the draw call requires in that slot.
        expected: BufferKind,
        /// The kind of the buffer actually provided.
        actual: BufferKind,
    },
    /// The surface or device could not be initialized.
    InitializationFailed(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Resource(err) => {
                write!(f, "Graphics resource operation failed: {err}")
            }
            RenderError::UnsupportedUniformType(ty) => {
                write!(f, "Don't know how to set uniform {ty:?}")
            }
            RenderError::UniformValueMismatch { uniform, expected } => {
                write!(f, "Uniform '{uniform}' expects a {expected:?} value")
            }
            RenderError::BufferKindMismatch { expected, actual } => {
                write!(f, "Expected a {expected:?} buffer, got a {actual:?} buffer")
            }
            RenderError::InitializationFailed(msg) => {
                write!(f, "Failed to initialize graphics backend: {msg}")
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Resource(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ResourceError> for RenderError {
    fn from(err: ResourceError) -> Self {
        RenderError::Resource(err)
    }
}

impl From<ShaderError> for RenderError {
    fn from(err: ShaderError) -> Self {
        RenderError::Resource(ResourceError::Shader(err))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn shader_compile_error_display_carries_source() {
        let err = ShaderError::Compile {
            stage: ShaderStage::Fragment,
            log: "0:1: syntax error".to_string(),
            source: "void main() { oops }".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "Error compiling fragment shader: 0:1: syntax error\nvoid main() { oops }"
        );
    }

    #[test]
    fn shader_link_error_display_carries_program_id() {
        let err = ShaderError::Link {
            log: "missing main".to_string(),
            program_id: 7,
        };
        assert_eq!(
            format!("{err}"),
            "Error linking program: 'missing main' programId=7"
        );
    }

    #[test]
    fn render_error_wraps_shader_error_with_source_chain() {
        let shader_err = ShaderError::Link {
            log: "x".to_string(),
            program_id: 1,
        };
        let render_err: RenderError = shader_err.into();
        assert_eq!(
            format!("{render_err}"),
            "Graphics resource operation failed: Shader resource error: Error linking program: 'x' programId=1"
        );
        assert!(render_err.source().is_some());
        assert!(render_err.source().unwrap().source().is_some());
    }

    #[test]
    fn unsupported_uniform_type_names_the_type() {
        let err = RenderError::UnsupportedUniformType(VarType::Float3);
        assert_eq!(format!("{err}"), "Don't know how to set uniform Float3");
    }
}
