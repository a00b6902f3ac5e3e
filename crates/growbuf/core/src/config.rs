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

//! Growth configuration for [`GrowableBuffer`](crate::GrowableBuffer)

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::buffer::{BufferError, BufferResult};

/// Default increment, in bytes, used by the single-byte append path.
pub const REALLOC_ADD: usize = 256;

/// Environment variable overriding [`BufferConfig::realloc_add`].
pub const REALLOC_ADD_ENV: &str = "GROWBUF_REALLOC_ADD";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    /// Bytes added to the capacity each time `append_byte` runs out of room.
    /// Larger values mean fewer reallocations and more peak memory.
    pub realloc_add: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self { realloc_add: REALLOC_ADD }
    }
}

impl BufferConfig {
    pub fn with_realloc_add(realloc_add: usize) -> Self {
        Self { realloc_add }
    }

    pub fn from_env() -> Self {
        let mut config = Self::default();

        // Allow override via environment variable
        if let Ok(value) = std::env::var(REALLOC_ADD_ENV) {
            match value.trim().parse::<usize>() {
                Ok(step) if step > 0 => config.realloc_add = step,
                _ => warn!(value = %value, "ignoring invalid {}, using default", REALLOC_ADD_ENV),
            }
        }

        config
    }

    /// Parses a JSON document such as `{"realloc_add": 64}`.
    /// Missing fields fall back to their defaults.
    pub fn from_json_str(json: &str) -> BufferResult<Self> {
        Self::from_json_str_with_base(json, Self::default())
    }

    /// Like [`from_json_str`](Self::from_json_str), but fields missing from
    /// the document keep their value from `base`.
    pub fn from_json_str_with_base(json: &str, base: Self) -> BufferResult<Self> {
        let overlay: ConfigOverlay = serde_json::from_str(json).map_err(|e| BufferError::InvalidConfig(e.to_string()))?;
        let config = overlay.apply(base);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> BufferResult<()> {
        if self.realloc_add == 0 {
            return Err(BufferError::InvalidConfig("realloc_add must be greater than zero".into()));
        }
        Ok(())
    }
}

/// Partial configuration as read from a file; only present keys override.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigOverlay {
    realloc_add: Option<usize>,
}

impl ConfigOverlay {
    fn apply(self, mut base: BufferConfig) -> BufferConfig {
        if let Some(step) = self.realloc_add {
            base.realloc_add = step;
        }
        base
    }
}
