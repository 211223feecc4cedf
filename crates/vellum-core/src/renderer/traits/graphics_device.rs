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

use crate::image::{Bitmap32, Bitmap8};
use crate::math::Rgba;
use crate::renderer::api::*;
use crate::renderer::error::{RenderError, ResourceError};

/// A device-side buffer mirroring a block of CPU memory.
///
/// The backend-independent part of a buffer lives in a [`BufferState`]; the
/// provided methods operate on it so backends only implement the native side.
pub trait Buffer {
    /// The shared buffer state.
    fn state(&self) -> &BufferState;

    /// Mutable access to the shared buffer state.
    fn state_mut(&mut self) -> &mut BufferState;

    /// Whether this is a vertex or an index buffer.
    fn kind(&self) -> BufferKind {
        self.state().kind()
    }

    /// The CPU memory the buffer mirrors, if any.
    fn memory(&self) -> Option<&BufferMemory> {
        self.state().memory()
    }

    /// Attaches (or detaches) CPU memory and marks the buffer dirty.
    ///
    /// Nothing reaches the device until the backend next resolves the native handle.
    fn set_memory(&mut self, memory: Option<BufferMemory>) {
        self.state_mut().set_memory(memory);
    }

    /// Shorthand for attaching `memory`.
    fn upload(&mut self, memory: BufferMemory) {
        self.set_memory(Some(memory));
    }

    /// Returns `true` if the attached memory has not reached the device yet.
    fn is_dirty(&self) -> bool {
        self.state().is_dirty()
    }

    /// Releases the native buffer. Calling it again is a no-op.
    fn close(&mut self);
}

/// A 2D texture.
pub trait Texture {
    /// Whether sampling uses mipmapped minification filters.
    fn mipmaps(&self) -> bool;

    /// Changes the mipmap flag. Takes effect on the next [`Texture::set_filter`].
    fn set_mipmaps(&mut self, mipmaps: bool);

    /// Uploads a 32-bit bitmap as RGBA.
    ///
    /// ## Errors
    /// * `ResourceError::InvalidHandle` - If the texture was closed.
    fn upload_bitmap32(&mut self, bitmap: &Bitmap32) -> Result<(), ResourceError>;

    /// Uploads an 8-bit bitmap as luminance.
    ///
    /// ## Errors
    /// * `ResourceError::InvalidHandle` - If the texture was closed.
    fn upload_bitmap8(&mut self, bitmap: &Bitmap8) -> Result<(), ResourceError>;

    /// Uploads raw pixel bytes laid out according to `kind`.
    ///
    /// ## Errors
    /// * `ResourceError::OutOfBounds` - If `data` is shorter than `width * height` pixels.
    /// * `ResourceError::InvalidHandle` - If the texture was closed.
    fn upload_buffer(
        &mut self,
        data: &[u8],
        width: u32,
        height: u32,
        kind: TextureKind,
    ) -> Result<(), ResourceError>;

    /// Tries to build the mipmap chain. Returns `true` only if mipmaps were generated.
    fn create_mipmaps(&mut self) -> bool;

    /// Applies linear or nearest filtering, honoring the mipmap flag.
    fn set_filter(&self, linear: bool);

    /// Releases the native texture. Calling it again is a no-op.
    fn close(&mut self);
}

/// The abstract graphics device every backend implements.
///
/// A device is bound to the thread its native context lives on; implementations
/// are not required to be `Send`.
pub trait GraphicsDevice {
    /// The backend's buffer type.
    type Buffer: Buffer;
    /// The backend's texture type.
    type Texture: Texture;

    /// A human readable name of the native API.
    fn backend_name(&self) -> &'static str;

    /// Clears the selected planes of the back buffer.
    ///
    /// The three clear values are always set, even for planes that are not cleared.
    /// With all three flags `false` the native clear is still issued with an empty mask.
    fn clear(
        &mut self,
        color: bool,
        depth: bool,
        stencil: bool,
        clear_color: Rgba,
        clear_depth: f32,
        clear_stencil: i32,
    );

    /// Creates a buffer. Its native handle is allocated on first use.
    fn create_buffer(&mut self, kind: BufferKind) -> Self::Buffer;

    /// Creates a texture, allocating its native handle immediately.
    ///
    /// ## Errors
    /// * `ResourceError::AllocationFailed` - If the native API refuses the allocation.
    fn create_texture(&mut self) -> Result<Self::Texture, ResourceError>;

    /// Issues one indexed draw.
    ///
    /// ## Errors
    /// * `RenderError::BufferKindMismatch` - If the buffers are swapped or of the same kind.
    /// * `RenderError::Resource` - If the program fails to compile or link.
    /// * `RenderError::UnsupportedUniformType` - If a uniform type has no upload path.
    /// * `RenderError::UniformValueMismatch` - If a value does not fit its uniform type.
    fn draw(
        &mut self,
        command: DrawCommand<'_, Self::Buffer, Self::Texture>,
    ) -> Result<(), RenderError>;

    /// Requests one future frame. Never blocks and never renders synchronously.
    fn repaint(&self);

    /// The current back-buffer size in pixels.
    fn back_size(&self) -> (u32, u32);
}

/// Verifies a draw received a vertex buffer and an index buffer, in that order.
pub fn check_buffers<B: Buffer>(vertices: &B, indices: &B) -> Result<(), RenderError> {
    if vertices.kind() != BufferKind::Vertex {
        return Err(RenderError::BufferKindMismatch {
            expected: BufferKind::Vertex,
            actual: vertices.kind(),
        });
    }
    if indices.kind() != BufferKind::Index {
        return Err(RenderError::BufferKindMismatch {
            expected: BufferKind::Index,
            actual: indices.kind(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StateOnly(BufferState);

    impl Buffer for StateOnly {
        fn state(&self) -> &BufferState {
            &self.0
        }

        fn state_mut(&mut self) -> &mut BufferState {
            &mut self.0
        }

        fn close(&mut self) {}
    }

    fn buffer(kind: BufferKind) -> StateOnly {
        StateOnly(BufferState::new(kind))
    }

    #[test]
    fn check_buffers_accepts_vertex_then_index() {
        assert!(check_buffers(&buffer(BufferKind::Vertex), &buffer(BufferKind::Index)).is_ok());
    }

    #[test]
    fn check_buffers_rejects_swapped_buffers() {
        let err = check_buffers(&buffer(BufferKind::Index), &buffer(BufferKind::Vertex)).unwrap_err();
        assert_eq!(
            err,
            RenderError::BufferKindMismatch {
                expected: BufferKind::Vertex,
                actual: BufferKind::Index,
            }
        );
    }

    #[test]
    fn check_buffers_rejects_two_vertex_buffers() {
        let err =
            check_buffers(&buffer(BufferKind::Vertex), &buffer(BufferKind::Vertex)).unwrap_err();
        assert!(matches!(
            err,
            RenderError::BufferKindMismatch {
                expected: BufferKind::Index,
                ..
            }
        ));
    }

    #[test]
    fn provided_upload_marks_dirty() {
        let mut b = buffer(BufferKind::Vertex);
        b.upload(BufferMemory::new(vec![1, 2, 3]));
        assert!(b.is_dirty());
        assert_eq!(b.memory().map(BufferMemory::len), Some(3));
    }
}
