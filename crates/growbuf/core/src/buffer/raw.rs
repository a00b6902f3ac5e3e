// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Owned heap block backing a [`GrowableBuffer`](super::GrowableBuffer).

use std::alloc::{Layout, alloc, dealloc, realloc};
use std::ptr::{self, NonNull};

use tracing::{trace, warn};

use super::error::{BufferError, BufferResult};

/// A single resizable byte allocation.
///
/// `ptr` is `None` exactly when `capacity == 0`. The bytes themselves are
/// not initialized by this type; the owning buffer tracks which prefix is
/// meaningful.
pub(crate) struct RawStorage {
    ptr: Option<NonNull<u8>>,
    capacity: usize,
}

impl RawStorage {
    pub(crate) const fn empty() -> Self {
        Self { ptr: None, capacity: 0 }
    }

    pub(crate) const fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn as_ptr(&self) -> *const u8 {
        self.ptr.map_or(ptr::null(), |p| p.as_ptr() as *const u8)
    }

    pub(crate) fn as_mut_ptr(&mut self) -> *mut u8 {
        self.ptr.map_or(ptr::null_mut(), NonNull::as_ptr)
    }

    fn layout(capacity: usize) -> BufferResult<Layout> {
        Layout::array::<u8>(capacity).map_err(|_| BufferError::CapacityOverflow { requested: capacity })
    }

    /// Resizes the allocation to exactly `new_capacity` bytes.
    ///
    /// Existing contents up to the old capacity are preserved. On failure the
    /// previous allocation is left untouched.
    pub(crate) fn grow_to(&mut self, new_capacity: usize) -> BufferResult<()> {
        if new_capacity <= self.capacity {
            return Ok(());
        }

        let new_layout = Self::layout(new_capacity)?;
        let raw = match self.ptr {
            // SAFETY: new_layout has non-zero size since new_capacity > capacity >= 0.
            None => unsafe { alloc(new_layout) },
            Some(old) => {
                let old_layout = Self::layout(self.capacity)?;
                // SAFETY: `old` was allocated with `old_layout` by this type, and
                // new_layout.size() was validated by Layout::array above.
                unsafe { realloc(old.as_ptr(), old_layout, new_layout.size()) }
            }
        };

        match NonNull::new(raw) {
            Some(ptr) => {
                self.ptr = Some(ptr);
                self.capacity = new_capacity;
                Ok(())
            }
            None => {
                warn!(requested = new_capacity, current = self.capacity, "allocator refused buffer growth");
                Err(BufferError::AllocationFailed { requested: new_capacity })
            }
        }
    }

    /// Frees the allocation, returning to the empty state.
    pub(crate) fn release(&mut self) {
        if let Some(ptr) = self.ptr.take() {
            trace!(capacity = self.capacity, "releasing buffer storage");
            // The layout was valid when this block was allocated.
            if let Ok(layout) = Self::layout(self.capacity) {
                // SAFETY: `ptr` came from alloc/realloc with this exact layout.
                unsafe { dealloc(ptr.as_ptr(), layout) };
            }
        }
        self.capacity = 0;
    }
}

impl Drop for RawStorage {
    fn drop(&mut self) {
        self.release();
    }
}

// SAFETY: RawStorage uniquely owns its allocation; nothing else aliases it.
unsafe impl Send for RawStorage {}
