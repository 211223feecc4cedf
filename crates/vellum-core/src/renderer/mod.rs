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

//! Provides the public, backend-agnostic rendering contracts.
//!
//! This module defines the "common language" every graphics backend speaks: the
//! abstract [`GraphicsDevice`] trait and its resource traits ([`Buffer`],
//! [`Texture`]), the data handed to a draw call (programs, vertex layouts,
//! uniforms, blend state) and the error types.
//!
//! This module defines the 'what' of rendering; the 'how' lives in a concrete
//! backend in the `vellum-infra` crate (e.g. the OpenGL ES binding) which
//! implements these traits.

pub mod api;
pub mod error;
pub mod traits;

// Re-export the most important traits and types for easier use.
pub use self::api::*;
pub use self::error::{RenderError, ResourceError, ShaderError};
pub use self::traits::{check_buffers, Buffer, GraphicsDevice, GraphicsDeviceFactory, Texture};
