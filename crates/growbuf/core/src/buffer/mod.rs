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

//! Growable, null-terminated byte buffer
//!
//! [`GrowableBuffer`] owns one contiguous heap block and keeps a zero byte
//! right after its content at all times, so the content can be handed to
//! APIs that expect C strings without copying.

mod error;
mod raw;
mod stats;

pub use error::*;
pub use stats::*;

use std::ffi::CStr;
use std::fmt;
use std::ptr;

use tracing::{debug, trace};

use crate::config::{BufferConfig, REALLOC_ADD};
use raw::RawStorage;

/// Byte written after the last meaningful byte.
pub const TERMINATOR: u8 = 0;

/// A heap byte buffer with two growth policies and in-place splicing.
///
/// # Layout Overview
/// ```text
/// index:  0   1   2   ...  len-1  len   len+1 ... capacity-1
///        [b0][b1][b2] ... [bn ] [\0 ] [ spare capacity   ]
/// ```
///
/// Invariants, holding after every successful operation:
/// - `capacity == 0` means no allocation exists and `len == 0`.
/// - otherwise `len < capacity` and the byte at `len` is [`TERMINATOR`].
/// - no byte before `len` is [`TERMINATOR`].
/// - capacity only grows, except through [`clear`](Self::clear).
///
/// `append_byte` grows by a fixed increment ([`BufferConfig::realloc_add`])
/// while `append_sequence` grows to exactly the size it needs. Every
/// operation either succeeds or leaves the buffer as it was.
///
/// The buffer is `Send` but not `Sync`; share it across threads only behind
/// a lock owned by the caller.
pub struct GrowableBuffer {
    storage: RawStorage,
    len: usize,
    config: BufferConfig,
    stats: BufferStats,
}

impl GrowableBuffer {
    /// Creates an empty buffer without allocating.
    pub const fn new() -> Self {
        Self {
            storage: RawStorage::empty(),
            len: 0,
            config: BufferConfig { realloc_add: REALLOC_ADD },
            stats: BufferStats::new(),
        }
    }

    /// Creates an empty buffer with a custom growth increment.
    pub fn with_config(config: BufferConfig) -> BufferResult<Self> {
        config.validate()?;
        Ok(Self { config, ..Self::new() })
    }

    pub fn from_bytes(bytes: &[u8]) -> BufferResult<Self> {
        let mut buffer = Self::new();
        buffer.append_sequence(bytes)?;
        Ok(buffer)
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total allocated bytes, terminator slot included.
    pub const fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    pub const fn config(&self) -> &BufferConfig {
        &self.config
    }

    pub const fn stats(&self) -> &BufferStats {
        &self.stats
    }

    /// Raw pointer to the first byte, or null when nothing is allocated.
    pub fn as_ptr(&self) -> *const u8 {
        self.storage.as_ptr()
    }

    /// The content without the terminator.
    pub fn as_bytes(&self) -> &[u8] {
        if self.capacity() == 0 {
            return &[];
        }
        // SAFETY: the first `len` bytes are initialized and lie inside the allocation.
        unsafe { std::slice::from_raw_parts(self.storage.as_ptr(), self.len) }
    }

    /// The content followed by its terminator. An unallocated buffer yields
    /// a lone terminator.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        if self.capacity() == 0 {
            return &[TERMINATOR];
        }
        // SAFETY: `len < capacity` and index `len` holds the terminator.
        unsafe { std::slice::from_raw_parts(self.storage.as_ptr(), self.len + 1) }
    }

    pub fn as_c_str(&self) -> &CStr {
        // SAFETY: appends reject zero bytes, so the only terminator is the last byte.
        unsafe { CStr::from_bytes_with_nul_unchecked(self.as_bytes_with_nul()) }
    }

    /// Appends one byte.
    ///
    /// When the byte and its terminator no longer fit, capacity grows by
    /// `realloc_add`. Growth from an empty buffer also reserves the
    /// terminator slot, so `n` growth steps always hold `n * realloc_add`
    /// payload bytes.
    pub fn append_byte(&mut self, value: u8) -> BufferResult<()> {
        if value == TERMINATOR {
            return Err(BufferError::InteriorNul { position: 0 });
        }

        if self.len + 2 > self.capacity() {
            let reserve = if self.capacity() == 0 { 1 } else { 0 };
            let new_capacity = self
                .capacity()
                .checked_add(self.config.realloc_add)
                .and_then(|c| c.checked_add(reserve))
                .ok_or(BufferError::CapacityOverflow { requested: usize::MAX })?;
            self.grow(new_capacity)?;
        }

        let base = self.storage.as_mut_ptr();
        // SAFETY: growth above guarantees `len + 1 < capacity`.
        unsafe {
            *base.add(self.len) = value;
            *base.add(self.len + 1) = TERMINATOR;
        }
        self.len += 1;
        self.stats.record_append(1);
        Ok(())
    }

    /// Appends a whole byte sequence, growing to exactly the required size.
    ///
    /// The sequence must not contain [`TERMINATOR`]; the offset of the first
    /// one is reported in [`BufferError::InteriorNul`].
    pub fn append_sequence(&mut self, bytes: &[u8]) -> BufferResult<()> {
        if let Some(position) = bytes.iter().position(|&b| b == TERMINATOR) {
            return Err(BufferError::InteriorNul { position });
        }

        let required = self
            .len
            .checked_add(bytes.len())
            .and_then(|n| n.checked_add(1))
            .ok_or(BufferError::CapacityOverflow { requested: usize::MAX })?;
        if required > self.capacity() {
            self.grow(required)?;
        }

        let base = self.storage.as_mut_ptr();
        // SAFETY: `len + bytes.len() < capacity`, and `bytes` cannot alias our
        // storage while we hold `&mut self`.
        unsafe {
            ptr::copy_nonoverlapping(bytes.as_ptr(), base.add(self.len), bytes.len());
            *base.add(self.len + bytes.len()) = TERMINATOR;
        }
        self.len += bytes.len();
        self.stats.record_append(bytes.len());
        Ok(())
    }

    /// Removes `count` bytes starting at `position`.
    ///
    /// A range reaching the end truncates at `position`. An interior range is
    /// closed by shifting the tail (terminator included) left. Capacity is
    /// never reduced. A `position` past the end is rejected with
    /// [`BufferError::OutOfRange`].
    pub fn remove_range(&mut self, position: usize, count: usize) -> BufferResult<()> {
        if position > self.len {
            return Err(BufferError::OutOfRange { position, length: self.len });
        }

        if position.saturating_add(count) >= self.len {
            let removed = self.len - position;
            if self.capacity() > 0 {
                // SAFETY: position <= len < capacity.
                unsafe { *self.storage.as_mut_ptr().add(position) = TERMINATOR };
            }
            trace!(position, removed, "truncating buffer");
            self.len = position;
            self.stats.record_removal(removed);
            return Ok(());
        }

        let tail = self.len - position - count + 1;
        let base = self.storage.as_mut_ptr();
        // SAFETY: source and destination ranges both end at or before `len + 1 <= capacity`.
        unsafe { ptr::copy(base.add(position + count), base.add(position), tail) };
        trace!(position, count, tail, "splicing buffer");
        self.len -= count;
        self.stats.record_removal(count);
        Ok(())
    }

    /// Releases the storage. Calling it on an empty buffer is harmless.
    pub fn clear(&mut self) {
        self.storage.release();
        self.len = 0;
        self.stats.record_clear();
    }

    fn grow(&mut self, new_capacity: usize) -> BufferResult<()> {
        let old_capacity = self.capacity();
        self.storage.grow_to(new_capacity)?;
        debug!(old_capacity, new_capacity, len = self.len, "buffer reallocated");
        self.stats.record_growth(new_capacity);
        Ok(())
    }
}

impl Default for GrowableBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GrowableBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrowableBuffer")
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .field("content", &String::from_utf8_lossy(self.as_bytes()))
            .finish()
    }
}

impl TryFrom<&[u8]> for GrowableBuffer {
    type Error = BufferError;

    fn try_from(bytes: &[u8]) -> BufferResult<Self> {
        Self::from_bytes(bytes)
    }
}

impl TryFrom<&str> for GrowableBuffer {
    type Error = BufferError;

    fn try_from(text: &str) -> BufferResult<Self> {
        Self::from_bytes(text.as_bytes())
    }
}

impl PartialEq<[u8]> for GrowableBuffer {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl PartialEq<&[u8]> for GrowableBuffer {
    fn eq(&self, other: &&[u8]) -> bool {
        self.as_bytes() == *other
    }
}

impl PartialEq<&str> for GrowableBuffer {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}
