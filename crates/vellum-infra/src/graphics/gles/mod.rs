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

//! The OpenGL ES 2 backend.
//!
//! [`GlesDevice`] implements the core [`GraphicsDevice`] contract by translating
//! each operation into [`GlesApi`] calls. [`GlesSurface`] drives it from the
//! native surface callbacks and owns the channels other threads use to reach
//! the render thread ([`RepaintSignal`], [`RenderQueue`]).
//!
//! [`GraphicsDevice`]: vellum_core::renderer::GraphicsDevice

mod api;
mod buffer;
mod conversions;
mod device;
mod factory;
mod latch;
#[cfg(not(target_arch = "wasm32"))]
mod native;
mod program;
mod queue;
mod recording;
mod surface;
mod texture;

pub use self::api::GlesApi;
pub use self::buffer::GlesBuffer;
pub use self::conversions::{clear_mask, mag_filter, min_filter, IntoGl, LUMINANCE};
pub use self::device::GlesDevice;
pub use self::factory::GlesDeviceFactory;
pub use self::latch::{InitLatch, LatchState};
#[cfg(not(target_arch = "wasm32"))]
pub use self::native::GlowGles;
pub use self::program::GlesProgram;
pub use self::queue::{frame_channel, FrameRequests, RenderJob, RenderQueue, RepaintSignal};
pub use self::recording::{GlCall, RecordingGles};
pub use self::surface::{GlesSurface, ReadyCallback, RenderCallback};
pub use self::texture::GlesTexture;
