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

use std::marker::PhantomData;
use std::rc::Rc;

use vellum_core::renderer::{GraphicsDeviceFactory, RenderError};

use super::api::GlesApi;
use super::device::GlesDevice;
use super::queue::RepaintSignal;

/// Builds [`GlesDevice`]s on top of a native context.
#[derive(Debug)]
pub struct GlesDeviceFactory<G: GlesApi> {
    repaint: RepaintSignal,
    _api: PhantomData<fn() -> G>,
}

impl<G: GlesApi> GlesDeviceFactory<G> {
    /// Devices built by this factory send their repaint requests to `repaint`.
    pub fn new(repaint: RepaintSignal) -> Self {
        Self {
            repaint,
            _api: PhantomData,
        }
    }
}

impl<G: GlesApi> GraphicsDeviceFactory for GlesDeviceFactory<G> {
    type Device = GlesDevice<G>;
    type Context = Rc<G>;

    fn name(&self) -> &'static str {
        "gles"
    }

    fn available(&self) -> bool {
        true
    }

    fn priority(&self) -> i32 {
        1500
    }

    fn create(&self, context: Rc<G>) -> Result<GlesDevice<G>, RenderError> {
        log::debug!("GlesDeviceFactory: Creating device.");
        Ok(GlesDevice::new(context, self.repaint.clone()))
    }
}
