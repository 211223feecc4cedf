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

//! Backend-agnostic rendering API.
//!
//! - **[`buffer`]**: buffer kinds and the CPU-side memory a buffer mirrors.
//! - **[`texture`]**: texture pixel formats.
//! - **[`shader`]**: programs, shader stages, uniforms and variable types.
//! - **[`vertex`]**: vertex attributes and their byte layout.
//! - **[`pipeline`]**: blend state and primitive topology.
//! - **[`uniform`]**: the per-draw uniform binding set.
//! - **[`draw`]**: the bundle of inputs handed to a draw call.
//! - **[`settings`]**: surface configuration.

pub mod buffer;
pub mod draw;
pub mod pipeline;
pub mod settings;
pub mod shader;
pub mod texture;
pub mod uniform;
pub mod vertex;

pub use self::buffer::*;
pub use self::draw::*;
pub use self::pipeline::*;
pub use self::settings::*;
pub use self::shader::*;
pub use self::texture::*;
pub use self::uniform::*;
pub use self::vertex::*;
