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

use std::fmt;
use std::rc::Rc;

use vellum_core::renderer::{Buffer, BufferKind, BufferState, ResourceError};

use super::api::GlesApi;
use super::conversions::IntoGl;

/// A GLES buffer object mirroring CPU memory.
///
/// The native name is allocated the first time it is needed and the attached
/// memory is uploaded lazily whenever the buffer is dirty. Dropping the buffer
/// deletes the native object.
pub struct GlesBuffer<G: GlesApi> {
    gl: Rc<G>,
    state: BufferState,
    handle: Option<u32>,
}

impl<G: GlesApi> GlesBuffer<G> {
    pub(crate) fn new(gl: Rc<G>, kind: BufferKind) -> Self {
        Self {
            gl,
            state: BufferState::new(kind),
            handle: None,
        }
    }

    /// Returns the native buffer name, allocating and uploading as needed.
    ///
    /// The name is allocated on the first call only. While the buffer is dirty
    /// and has memory attached, the memory window is uploaded with
    /// `STATIC_DRAW` and the buffer is marked clean. A buffer without memory is
    /// valid and uploads nothing.
    pub fn native_handle(&mut self) -> Result<u32, ResourceError> {
        let handle = match self.handle {
            Some(handle) => handle,
            None => {
                let handle = self
                    .gl
                    .create_buffer()
                    .map_err(ResourceError::AllocationFailed)?;
                log::debug!(
                    "GlesBuffer: Allocated {:?} buffer {handle}.",
                    self.state.kind()
                );
                self.handle = Some(handle);
                handle
            }
        };

        if self.state.is_dirty() {
            if let Some(memory) = self.state.memory() {
                let target = self.state.kind().into_gl();
                self.gl.bind_buffer(target, handle);
                self.gl
                    .buffer_data(target, memory.as_slice(), glow::STATIC_DRAW);
                log::trace!(
                    "GlesBuffer: Uploaded {} bytes to buffer {handle}.",
                    memory.len()
                );
                self.state.mark_clean();
            }
        }

        Ok(handle)
    }

    /// Binds the buffer to its target, resolving the native name first.
    pub fn bind(&mut self) -> Result<(), ResourceError> {
        let handle = self.native_handle()?;
        self.gl.bind_buffer(self.state.kind().into_gl(), handle);
        Ok(())
    }

    /// Whether a native buffer currently exists.
    pub fn is_allocated(&self) -> bool {
        self.handle.is_some()
    }
}

impl<G: GlesApi> Buffer for GlesBuffer<G> {
    fn state(&self) -> &BufferState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut BufferState {
        &mut self.state
    }

    fn close(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.gl.delete_buffer(handle);
            log::debug!("GlesBuffer: Deleted buffer {handle}.");
        }
    }
}

impl<G: GlesApi> Drop for GlesBuffer<G> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<G: GlesApi> fmt::Debug for GlesBuffer<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlesBuffer")
            .field("kind", &self.state.kind())
            .field("handle", &self.handle)
            .field("dirty", &self.state.is_dirty())
            .finish()
    }
}
