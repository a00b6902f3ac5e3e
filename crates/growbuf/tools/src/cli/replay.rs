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

//! Replay command: run an operation script against a fresh buffer

use std::fmt::Write as _;
use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use growbuf_core::{BufferConfig, BufferStats, GrowableBuffer};
use tracing::{debug, info};

use crate::script::{ScriptError, parse_script, run_script};

/// Arguments for the replay command
#[derive(Args, Debug, Default)]
pub struct ReplayArgs {
    /// Script file to replay (reads stdin when omitted)
    #[arg(value_name = "SCRIPT")]
    pub script: Option<PathBuf>,

    /// Growth increment for single-byte appends (overrides config and environment)
    #[arg(long)]
    pub realloc_add: Option<usize>,

    /// JSON file with buffer configuration, e.g. {"realloc_add": 64}
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Final buffer state after a replay
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayReport {
    pub content: Vec<u8>,
    pub len: usize,
    pub capacity: usize,
    pub stats: BufferStats,
}

impl ReplayReport {
    fn capture(buffer: &GrowableBuffer) -> Self {
        Self {
            content: buffer.as_bytes().to_vec(),
            len: buffer.len(),
            capacity: buffer.capacity(),
            stats: *buffer.stats(),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "content: {}", String::from_utf8_lossy(&self.content));
        let _ = writeln!(out, "length: {}", self.len);
        let _ = writeln!(out, "capacity: {}", self.capacity);
        let _ = writeln!(out, "stats: {}", self.stats);
        out
    }
}

/// Resolves configuration: environment, then config file, then command line.
pub fn resolve_config(args: &ReplayArgs) -> Result<BufferConfig, ScriptError> {
    resolve_config_with_base(args, BufferConfig::from_env())
}

/// Layers the config file and command-line flags over `base`. Keys absent
/// from the file keep their `base` value.
pub fn resolve_config_with_base(args: &ReplayArgs, base: BufferConfig) -> Result<BufferConfig, ScriptError> {
    let mut config = base;

    if let Some(path) = &args.config {
        let json = std::fs::read_to_string(path).map_err(|source| ScriptError::ConfigRead {
            path: path.clone(),
            source,
        })?;
        config = BufferConfig::from_json_str_with_base(&json, config).map_err(ScriptError::Config)?;
    }

    if let Some(step) = args.realloc_add {
        config.realloc_add = step;
    }

    config.validate().map_err(ScriptError::Config)?;
    Ok(config)
}

/// Replays `source` with the given configuration.
pub fn replay_source(source: &str, config: BufferConfig) -> Result<ReplayReport, ScriptError> {
    let ops = parse_script(source)?;
    debug!(operations = ops.len(), realloc_add = config.realloc_add, "replaying script");

    let mut buffer = GrowableBuffer::with_config(config).map_err(ScriptError::Config)?;
    run_script(&mut buffer, &ops)?;

    info!(len = buffer.len(), capacity = buffer.capacity(), "replay finished");
    Ok(ReplayReport::capture(&buffer))
}

/// Execute the replay command
pub fn run_replay(args: &ReplayArgs) -> Result<ReplayReport, ScriptError> {
    let config = resolve_config(args)?;

    let source = match &args.script {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut source = String::new();
            std::io::stdin().read_to_string(&mut source)?;
            source
        }
    };

    replay_source(&source, config)
}
