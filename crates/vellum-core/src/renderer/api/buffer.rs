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

//! Defines data structures related to GPU buffer resources.

use crate::renderer::error::ResourceError;

/// What a buffer is bound as when drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferKind {
    /// Per-vertex attribute data.
    Vertex,
    /// 16-bit element indices.
    Index,
}

/// A window of CPU-side bytes that a buffer mirrors on the device.
///
/// Only `bytes[offset..offset + length]` is uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferMemory {
    bytes: Vec<u8>,
    offset: usize,
    length: usize,
}

impl BufferMemory {
    /// Wraps `bytes`, exposing all of them.
    pub fn new(bytes: Vec<u8>) -> Self {
        let length = bytes.len();
        Self {
            bytes,
            offset: 0,
            length,
        }
    }

    /// Wraps `bytes`, exposing only `length` bytes starting at `offset`.
    pub fn with_range(bytes: Vec<u8>, offset: usize, length: usize) -> Result<Self, ResourceError> {
        let end = offset.checked_add(length).unwrap_or(usize::MAX);
        if end > bytes.len() {
            return Err(ResourceError::OutOfBounds {
                expected: end,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            bytes,
            offset,
            length,
        })
    }

    /// Copies a slice of plain-old-data values (vertices, `u16` indices...) into a new memory block.
    pub fn from_pod<T: bytemuck::Pod>(data: &[T]) -> Self {
        Self::new(bytemuck::cast_slice(data).to_vec())
    }

    /// The exposed window.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[self.offset..self.offset + self.length]
    }

    /// Offset of the window inside the backing bytes.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the window in bytes.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` when the window is empty.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

/// Backend-independent state every buffer carries: its kind, the memory it
/// mirrors and whether that memory changed since the last device upload.
#[derive(Debug, Clone)]
pub struct BufferState {
    kind: BufferKind,
    memory: Option<BufferMemory>,
    dirty: bool,
}

impl BufferState {
    /// Creates the state of a fresh buffer: no memory attached, not dirty.
    pub fn new(kind: BufferKind) -> Self {
        Self {
            kind,
            memory: None,
            dirty: false,
        }
    }

    /// The buffer kind.
    pub fn kind(&self) -> BufferKind {
        self.kind
    }

    /// The attached memory, if any.
    pub fn memory(&self) -> Option<&BufferMemory> {
        self.memory.as_ref()
    }

    /// Replaces the attached memory and marks the buffer dirty.
    pub fn set_memory(&mut self, memory: Option<BufferMemory>) {
        self.memory = memory;
        self.dirty = true;
    }

    /// Returns `true` if the memory has not been mirrored to the device yet.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Records that the device copy matches the attached memory.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_window_exposes_only_the_range() {
        let mem = BufferMemory::with_range(vec![0, 1, 2, 3, 4, 5], 2, 3).unwrap();
        assert_eq!(mem.as_slice(), &[2, 3, 4]);
        assert_eq!(mem.offset(), 2);
        assert_eq!(mem.len(), 3);
    }

    #[test]
    fn memory_window_past_the_end_is_rejected() {
        let err = BufferMemory::with_range(vec![0; 4], 2, 3).unwrap_err();
        assert_eq!(
            err,
            ResourceError::OutOfBounds {
                expected: 5,
                actual: 4
            }
        );
    }

    #[test]
    fn from_pod_copies_index_data() {
        let mem = BufferMemory::from_pod(&[0u16, 1, 2]);
        assert_eq!(mem.len(), 6);
        assert!(!mem.is_empty());
    }

    #[test]
    fn state_starts_clean_and_becomes_dirty_on_set_memory() {
        let mut state = BufferState::new(BufferKind::Index);
        assert!(!state.is_dirty());
        assert!(state.memory().is_none());

        state.set_memory(Some(BufferMemory::new(vec![1, 2])));
        assert!(state.is_dirty());

        state.mark_clean();
        assert!(!state.is_dirty());
        assert_eq!(state.kind(), BufferKind::Index);
    }
}
