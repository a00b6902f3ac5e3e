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

//! growbuf core library
//!
//! A heap-backed byte buffer that stays null-terminated:
//! - [`GrowableBuffer`]: append, splice and reset over one owned allocation
//! - [`BufferConfig`]: growth increment for the single-byte append path
//! - [`BufferError`]: recoverable failures (allocation, range, terminator bytes)

pub mod buffer;
pub mod config;

// Re-export main components for easier access
pub use buffer::{BufferError, BufferResult, BufferStats, GrowableBuffer, TERMINATOR};
pub use config::{BufferConfig, REALLOC_ADD, REALLOC_ADD_ENV};
