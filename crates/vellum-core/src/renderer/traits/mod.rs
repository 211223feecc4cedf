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

//! Defines the core architectural traits for the rendering subsystem.
//!
//! These contracts decouple upper layers from any specific native graphics API.
//!
//! - [`GraphicsDevice`]: clears, creates resources, draws and requests repaints.
//! - [`Buffer`] and [`Texture`]: the resources a device hands out.
//! - [`GraphicsDeviceFactory`]: describes and instantiates a backend.

mod factory;
mod graphics_device;

pub use self::factory::GraphicsDeviceFactory;
pub use self::graphics_device::{check_buffers, Buffer, GraphicsDevice, Texture};
