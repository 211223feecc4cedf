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

use crate::renderer::error::RenderError;
use crate::renderer::traits::GraphicsDevice;

/// Describes a graphics backend and builds devices for it.
///
/// Hosts that can drive several backends pick the available factory with the
/// highest [`priority`](GraphicsDeviceFactory::priority).
pub trait GraphicsDeviceFactory {
    /// The device this factory builds.
    type Device: GraphicsDevice;
    /// What the factory needs from the host to build a device (typically a native context).
    type Context;

    /// A short name of the backend.
    fn name(&self) -> &'static str;

    /// Returns `true` if the backend can run on this platform.
    fn available(&self) -> bool;

    /// Relative preference; higher wins.
    fn priority(&self) -> i32;

    /// Builds a device on top of `context`.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::InitializationFailed` if the device cannot be set up.
    fn create(&self, context: Self::Context) -> Result<Self::Device, RenderError>;
}
