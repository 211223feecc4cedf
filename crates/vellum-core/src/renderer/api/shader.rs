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

//! Shader programs, stages, uniforms and the variable types they use.

use std::fmt;

/// A programmable stage of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Runs once per vertex.
    Vertex,
    /// Runs once per fragment.
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// The type of a shader variable (vertex attribute or uniform).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarType {
    /// One 32-bit signed integer.
    Int1,
    /// One 32-bit float.
    Float1,
    /// Two 32-bit floats.
    Float2,
    /// Three 32-bit floats.
    Float3,
    /// Four 32-bit floats.
    Float4,
    /// A 4x4 float matrix.
    Mat4,
    /// One boolean stored as an unsigned byte.
    Bool1,
    /// Four unsigned bytes (typically a packed color).
    Byte4,
    /// A sampler bound to a texture unit.
    TextureUnit,
}

impl VarType {
    /// Number of scalar components.
    pub fn element_count(self) -> i32 {
        match self {
            VarType::Int1 | VarType::Float1 | VarType::Bool1 | VarType::TextureUnit => 1,
            VarType::Float2 => 2,
            VarType::Float3 => 3,
            VarType::Float4 | VarType::Byte4 => 4,
            VarType::Mat4 => 16,
        }
    }

    /// Size in bytes of one scalar component.
    pub fn element_size(self) -> usize {
        match self {
            VarType::Bool1 | VarType::Byte4 => 1,
            _ => 4,
        }
    }

    /// Total size in bytes.
    pub fn bytes_size(self) -> usize {
        self.element_count() as usize * self.element_size()
    }
}

/// A named, typed input supplied to a program for one draw call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Uniform {
    name: String,
    var_type: VarType,
}

impl Uniform {
    /// Declares a uniform.
    pub fn new(name: impl Into<String>, var_type: VarType) -> Self {
        Self {
            name: name.into(),
            var_type,
        }
    }

    /// The name the program declares the uniform under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type.
    pub fn var_type(&self) -> VarType {
        self.var_type
    }
}

/// A pair of shader stages identified by name.
///
/// The name is the program's identity: backends cache compiled programs by name
/// and never look at the sources again once a name has been compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    name: String,
    vertex: String,
    fragment: String,
}

impl Program {
    /// Creates a program from its GLSL sources.
    pub fn new(
        name: impl Into<String>,
        vertex: impl Into<String>,
        fragment: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// The program's identity.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source of the vertex stage.
    pub fn vertex_source(&self) -> &str {
        &self.vertex
    }

    /// Source of the fragment stage.
    pub fn fragment_source(&self) -> &str {
        &self.fragment
    }

    /// Source of the given stage.
    pub fn source(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Fragment => &self.fragment,
        }
    }
}
