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

use std::ffi::CStr;

use growbuf_core::{BufferConfig, BufferError, GrowableBuffer, REALLOC_ADD};

// Common test configuration
pub const TEST_STEP: usize = 16;

fn test_buffer() -> GrowableBuffer {
    GrowableBuffer::with_config(BufferConfig::with_realloc_add(TEST_STEP)).expect("Test config should be valid")
}

#[test]
fn test_default_growth_step() {
    let mut buffer = GrowableBuffer::new();
    buffer.append_byte(b'#').expect("Should append byte");
    assert_eq!(buffer.config().realloc_add, REALLOC_ADD);
    assert_eq!(buffer.capacity(), REALLOC_ADD + 1);
}

#[test]
fn test_line_assembly_and_edit() {
    let mut buffer = test_buffer();

    // Build a line byte by byte, then splice and extend it
    for &b in b"# Title slide" {
        buffer.append_byte(b).expect("Should append byte");
    }
    buffer.remove_range(0, 2).expect("Should strip heading marker");
    buffer.append_sequence(b" (draft)").expect("Should append suffix");

    assert_eq!(buffer, "Title slide (draft)");
    assert_eq!(buffer.as_c_str().to_str().unwrap(), "Title slide (draft)");

    let stats = buffer.stats();
    assert_eq!(stats.bytes_appended, 21);
    assert_eq!(stats.bytes_removed, 2);
}

#[test]
fn test_round_trip_keeps_capacity() {
    let mut buffer = GrowableBuffer::new();
    buffer.append_sequence(b"abc").expect("Should append sequence");
    buffer.remove_range(0, 3).expect("Should remove all content");

    assert_eq!(buffer.len(), 0);
    assert_eq!(buffer.as_bytes(), b"");
    assert_eq!(buffer.capacity(), 4);
}

#[test]
fn test_c_string_interop() {
    let buffer = GrowableBuffer::try_from("interop").expect("Should build buffer");

    // The raw pointer is readable as a C string
    let from_ptr = unsafe { CStr::from_ptr(buffer.as_ptr().cast()) };
    assert_eq!(from_ptr, c"interop");
    assert_eq!(buffer.as_bytes_with_nul(), b"interop\0");
}

#[test]
fn test_errors_are_local_to_the_operation() {
    let mut buffer = GrowableBuffer::try_from("ab").expect("Should build buffer");

    assert!(matches!(buffer.remove_range(5, 1), Err(BufferError::OutOfRange { position: 5, length: 2 })));
    assert!(matches!(buffer.append_sequence(b"x\0"), Err(BufferError::InteriorNul { position: 1 })));

    // The buffer keeps working after both failures
    buffer.append_byte(b'c').expect("Should append after errors");
    assert_eq!(buffer, "abc");
}

#[test]
fn test_error_messages() {
    let err = BufferError::OutOfRange { position: 5, length: 2 };
    assert_eq!(err.to_string(), "Removal start out of range: position 5, length 2");

    let err = BufferError::AllocationFailed { requested: 1024 };
    assert_eq!(err.to_string(), "Failed to allocate memory: requested 1024 bytes");
}

#[test]
fn test_buffer_moves_between_threads() {
    let mut buffer = test_buffer();
    buffer.append_sequence(b"owned").expect("Should append sequence");

    let handle = std::thread::spawn(move || {
        buffer.append_byte(b'!').expect("Should append on new owner");
        buffer
    });
    let buffer = handle.join().expect("Worker thread panicked");
    assert_eq!(buffer, "owned!");
}

#[test]
fn test_many_small_buffers() {
    let buffers: Vec<GrowableBuffer> = (0..100)
        .map(|i| GrowableBuffer::try_from(format!("buffer-{}", i).as_str()).expect("Should build buffer"))
        .collect();

    for (i, buffer) in buffers.iter().enumerate() {
        assert_eq!(buffer.as_bytes(), format!("buffer-{}", i).as_bytes());
    }
}
