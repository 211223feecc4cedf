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

//! Vertex attributes and the byte layout they are packed with.

use crate::renderer::api::shader::VarType;

/// One per-vertex input of a program.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute {
    name: String,
    var_type: VarType,
    normalized: bool,
}

impl Attribute {
    /// Declares an attribute whose integer components are passed through unchanged.
    pub fn new(name: impl Into<String>, var_type: VarType) -> Self {
        Self {
            name: name.into(),
            var_type,
            normalized: false,
        }
    }

    /// Declares an attribute whose integer components are normalized to `[0, 1]` / `[-1, 1]`.
    pub fn normalized(name: impl Into<String>, var_type: VarType) -> Self {
        Self {
            normalized: true,
            ..Self::new(name, var_type)
        }
    }

    /// The name the program declares the attribute under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The attribute type.
    pub fn var_type(&self) -> VarType {
        self.var_type
    }

    /// Whether integer components are normalized when fetched.
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }
}

/// The byte-level description of interleaved vertex data.
///
/// Attributes are packed in declaration order; each one starts at the next
/// multiple of its component size. The stride is rounded up to the largest
/// component size, so it matches the size of the equivalent `#[repr(C)]` struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    attributes: Vec<Attribute>,
    positions: Vec<usize>,
    total_size: usize,
}

impl VertexLayout {
    /// Computes the layout of `attributes`.
    pub fn new(attributes: Vec<Attribute>) -> Self {
        let mut positions = Vec::with_capacity(attributes.len());
        let mut total_size = 0usize;
        let mut max_align = 1usize;
        for attribute in &attributes {
            let align = attribute.var_type().element_size();
            max_align = max_align.max(align);
            total_size = align_up(total_size, align);
            positions.push(total_size);
            total_size += attribute.var_type().bytes_size();
        }
        let total_size = align_up(total_size, max_align);
        Self {
            attributes,
            positions,
            total_size,
        }
    }

    /// The attributes, in declaration order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// The byte offset of every attribute inside one vertex.
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// The stride between consecutive vertices, in bytes.
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    /// Iterates `(attribute, byte offset)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&Attribute, usize)> {
        self.attributes.iter().zip(self.positions.iter().copied())
    }
}

fn align_up(offset: usize, align: usize) -> usize {
    offset.div_ceil(align) * align
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_packs_attributes_in_order() {
        let layout = VertexLayout::new(vec![
            Attribute::new("a_Pos", VarType::Float2),
            Attribute::normalized("a_Col", VarType::Byte4),
            Attribute::new("a_Tex", VarType::Float2),
        ]);
        assert_eq!(layout.positions(), &[0, 8, 12]);
        assert_eq!(layout.total_size(), 20);
        assert!(layout.attributes()[1].is_normalized());
    }

    #[test]
    fn layout_aligns_floats_after_bytes() {
        let layout = VertexLayout::new(vec![
            Attribute::new("a_Flag", VarType::Bool1),
            Attribute::new("a_Pos", VarType::Float3),
        ]);
        assert_eq!(layout.positions(), &[0, 4]);
        assert_eq!(layout.total_size(), 16);
    }

    #[test]
    fn stride_is_padded_to_the_widest_component() {
        #[repr(C)]
        struct FlaggedVertex {
            _pos: [f32; 2],
            _flag: u8,
        }

        let layout = VertexLayout::new(vec![
            Attribute::new("a_Pos", VarType::Float2),
            Attribute::new("a_Flag", VarType::Bool1),
        ]);
        assert_eq!(layout.positions(), &[0, 8]);
        assert_eq!(layout.total_size(), 12);
        assert_eq!(layout.total_size(), std::mem::size_of::<FlaggedVertex>());
    }

    #[test]
    fn byte_only_layout_is_not_padded() {
        let layout = VertexLayout::new(vec![
            Attribute::new("a_Flag", VarType::Bool1),
            Attribute::normalized("a_Col", VarType::Byte4),
        ]);
        assert_eq!(layout.total_size(), 5);
    }

    #[test]
    fn empty_layout_has_zero_stride() {
        let layout = VertexLayout::new(Vec::new());
        assert_eq!(layout.total_size(), 0);
        assert_eq!(layout.iter().count(), 0);
    }
}
