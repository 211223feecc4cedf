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

//! The set of uniform values bound for a single draw call.

use crate::math::Mat4;
use crate::renderer::api::shader::Uniform;

/// A texture bound to the next free texture unit.
///
/// `texture` may be `None`: the unit is still consumed and the sampler uniform
/// still written, only the bind is skipped.
#[derive(Debug)]
pub struct TextureUnit<'a, T> {
    /// The texture to sample, if any.
    pub texture: Option<&'a T>,
    /// Linear (`true`) or nearest (`false`) filtering.
    pub linear: bool,
}

impl<'a, T> TextureUnit<'a, T> {
    /// A unit sampling `texture`.
    pub fn new(texture: &'a T, linear: bool) -> Self {
        Self {
            texture: Some(texture),
            linear,
        }
    }

    /// A unit with no texture bound.
    pub fn empty(linear: bool) -> Self {
        Self {
            texture: None,
            linear,
        }
    }
}

impl<T> Clone for TextureUnit<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TextureUnit<'_, T> {}

/// A value bound to a uniform.
#[derive(Debug)]
pub enum UniformValue<'a, T> {
    /// A generic number, narrowed to the uniform's scalar type on upload.
    Number(f64),
    /// A 4x4 matrix.
    Mat4(Mat4),
    /// A sampler's texture unit.
    TextureUnit(TextureUnit<'a, T>),
}

impl<T> Clone for UniformValue<'_, T> {
    fn clone(&self) -> Self {
        match self {
            UniformValue::Number(n) => UniformValue::Number(*n),
            UniformValue::Mat4(m) => UniformValue::Mat4(*m),
            UniformValue::TextureUnit(unit) => UniformValue::TextureUnit(*unit),
        }
    }
}

impl<T> From<f64> for UniformValue<'_, T> {
    fn from(value: f64) -> Self {
        UniformValue::Number(value)
    }
}

impl<T> From<f32> for UniformValue<'_, T> {
    fn from(value: f32) -> Self {
        UniformValue::Number(value as f64)
    }
}

impl<T> From<Mat4> for UniformValue<'_, T> {
    fn from(value: Mat4) -> Self {
        UniformValue::Mat4(value)
    }
}

impl<'a, T> From<TextureUnit<'a, T>> for UniformValue<'a, T> {
    fn from(value: TextureUnit<'a, T>) -> Self {
        UniformValue::TextureUnit(value)
    }
}

/// An insertion-ordered mapping from uniform to value.
///
/// Texture units are numbered in insertion order when the set is applied, so
/// the order is part of the contract.
#[derive(Debug)]
pub struct UniformBindings<'a, T> {
    entries: Vec<(Uniform, UniformValue<'a, T>)>,
}

impl<'a, T> UniformBindings<'a, T> {
    /// An empty binding set.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builder form of [`UniformBindings::insert`].
    pub fn with(mut self, uniform: Uniform, value: impl Into<UniformValue<'a, T>>) -> Self {
        self.insert(uniform, value);
        self
    }

    /// Binds `value` to `uniform`.
    ///
    /// Rebinding a uniform replaces its value but keeps its original position.
    pub fn insert(&mut self, uniform: Uniform, value: impl Into<UniformValue<'a, T>>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(u, _)| *u == uniform) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((uniform, value)),
        }
    }

    /// The value bound to `uniform`, if any.
    pub fn get(&self, uniform: &Uniform) -> Option<&UniformValue<'a, T>> {
        self.entries
            .iter()
            .find(|(u, _)| u == uniform)
            .map(|(_, v)| v)
    }

    /// Iterates bindings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Uniform, &UniformValue<'a, T>)> {
        self.entries.iter().map(|(u, v)| (u, v))
    }

    /// Number of bound uniforms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for UniformBindings<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}
