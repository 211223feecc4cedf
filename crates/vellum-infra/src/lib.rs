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

//! # Vellum Infra
//!
//! Concrete implementations of the contracts defined in `vellum-core`.
//!
//! The only backend is the OpenGL ES 2 binding in [`graphics::gles`]. It talks to
//! the native API through the [`graphics::gles::GlesApi`] seam, which is
//! implemented on top of `glow` for real contexts and by a recording,
//! headless implementation for tests and offline tools.

#![warn(missing_docs)]

pub mod graphics;

pub use graphics::gles::{
    frame_channel, FrameRequests, GlesBuffer, GlesDevice, GlesDeviceFactory, GlesProgram,
    GlesSurface, GlesTexture, InitLatch, RecordingGles, RenderQueue, RepaintSignal,
};

#[cfg(not(target_arch = "wasm32"))]
pub use graphics::gles::GlowGles;
