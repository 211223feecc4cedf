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

//! Surface configuration.

use serde::{Deserialize, Serialize};

use crate::math::Rgba;
use crate::renderer::error::RenderError;

/// When the surface produces frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RenderMode {
    /// Only after a repaint has been requested.
    #[default]
    WhenDirty,
    /// Every native paint cycle.
    Continuously,
}

/// Settings a rendering surface is created with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceSettings {
    /// The requested GLES client version. Only `2` is supported.
    pub client_version: u32,
    /// When frames are produced.
    pub render_mode: RenderMode,
    /// Back-buffer width until the first size change.
    pub initial_width: u32,
    /// Back-buffer height until the first size change.
    pub initial_height: u32,
    /// The color hosts typically clear to at the start of a frame.
    pub clear_color: Rgba,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            client_version: 2,
            render_mode: RenderMode::WhenDirty,
            initial_width: 800,
            initial_height: 600,
            clear_color: Rgba::BLACK,
        }
    }
}

impl SurfaceSettings {
    /// Checks the settings describe a surface the backend can create.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.client_version != 2 {
            return Err(RenderError::InitializationFailed(format!(
                "unsupported GLES client version {}",
                self.client_version
            )));
        }
        if self.initial_width == 0 || self.initial_height == 0 {
            return Err(RenderError::InitializationFailed(format!(
                "invalid initial surface size {}x{}",
                self.initial_width, self.initial_height
            )));
        }
        Ok(())
    }

    /// Parses settings from JSON. Missing fields take their default value.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Self = serde_json::from_str(json)?;
        log::debug!("SurfaceSettings: loaded {settings:?}");
        Ok(settings)
    }

    /// Serializes the settings to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
