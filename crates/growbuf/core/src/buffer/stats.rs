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

use std::fmt;

/// Running counters for a single buffer
/// Useful for checking how often the growth policy actually reallocates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferStats {
    pub reallocations: u64,   // Successful grow operations (first allocation included)
    pub bytes_appended: u64,  // Payload bytes added through either append path
    pub bytes_removed: u64,   // Payload bytes dropped by remove_range
    pub peak_capacity: usize, // Largest capacity ever held
    pub clears: u64,          // Calls to clear, including redundant ones
}

impl BufferStats {
    pub const fn new() -> Self {
        Self {
            reallocations: 0,
            bytes_appended: 0,
            bytes_removed: 0,
            peak_capacity: 0,
            clears: 0,
        }
    }

    /// Records a successful reallocation to `capacity` bytes
    pub fn record_growth(&mut self, capacity: usize) {
        self.reallocations += 1;
        if capacity > self.peak_capacity {
            self.peak_capacity = capacity;
        }
    }

    pub fn record_append(&mut self, bytes: usize) {
        self.bytes_appended += bytes as u64;
    }

    pub fn record_removal(&mut self, bytes: usize) {
        self.bytes_removed += bytes as u64;
    }

    pub fn record_clear(&mut self) {
        self.clears += 1;
    }

    /// Average payload bytes appended per reallocation
    /// Higher means the growth increment is doing its job
    pub fn bytes_per_reallocation(&self) -> f64 {
        if self.reallocations == 0 {
            return 0.0;
        }
        self.bytes_appended as f64 / self.reallocations as f64
    }
}

impl fmt::Display for BufferStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "reallocations={} appended={} removed={} peak_capacity={} clears={}",
            self.reallocations, self.bytes_appended, self.bytes_removed, self.peak_capacity, self.clears
        )
    }
}
