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

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("Failed to allocate memory: requested {requested} bytes")]
    AllocationFailed { requested: usize },

    #[error("Buffer capacity overflow: requested {requested} bytes")]
    CapacityOverflow { requested: usize },

    #[error("Removal start out of range: position {position}, length {length}")]
    OutOfRange { position: usize, length: usize },

    #[error("Terminator byte inside appended data at offset {position}")]
    InteriorNul { position: usize },

    #[error("Invalid buffer configuration: {0}")]
    InvalidConfig(String),
}

pub type BufferResult<T> = Result<T, BufferError>;
