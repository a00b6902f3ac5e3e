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

//! Buffer operation scripts
//!
//! One operation per line; blank lines and lines starting with `#` are skipped.
//!
//! ```text
//! byte a          append_byte(b'a')
//! byte 0x20       append_byte(0x20)
//! append text...  append_sequence(b"text...")
//! remove 1 2      remove_range(1, 2)
//! clear           clear()
//! ```

use std::path::PathBuf;

use growbuf_core::{BufferError, BufferResult, GrowableBuffer};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptOp {
    AppendByte(u8),
    AppendSequence(Vec<u8>),
    Remove { position: usize, count: usize },
    Clear,
}

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: {message}")]
    InvalidArgument { line: usize, message: String },

    #[error("line {line}: {source}")]
    Buffer {
        line: usize,
        #[source]
        source: BufferError,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[source] BufferError),

    #[error("Failed to read config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read script: {0}")]
    Io(#[from] std::io::Error),
}

/// Parses a single script line. Returns `Ok(None)` for blank and comment lines.
pub fn parse_line(line: usize, text: &str) -> Result<Option<ScriptOp>, ScriptError> {
    let text = text.trim_end_matches(['\r', '\n']).trim_start();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }

    // Command ends at the first whitespace character; exactly one separator is consumed
    let (command, rest) = match text.char_indices().find(|(_, c)| c.is_whitespace()) {
        Some((index, separator)) => (&text[..index], &text[index + separator.len_utf8()..]),
        None => (text, ""),
    };

    let op = match command {
        "byte" => ScriptOp::AppendByte(parse_byte(line, rest.trim())?),
        "append" => ScriptOp::AppendSequence(rest.as_bytes().to_vec()),
        "remove" => {
            let mut args = rest.split_whitespace();
            let position = parse_usize(line, "position", args.next())?;
            let count = parse_usize(line, "count", args.next())?;
            if let Some(extra) = args.next() {
                return Err(invalid(line, format!("unexpected argument '{}'", extra)));
            }
            ScriptOp::Remove { position, count }
        }
        "clear" => {
            if !rest.trim().is_empty() {
                return Err(invalid(line, "clear takes no arguments".into()));
            }
            ScriptOp::Clear
        }
        other => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: other.to_string(),
            });
        }
    };

    Ok(Some(op))
}

/// Parses a whole script, pairing each operation with its 1-based line number.
pub fn parse_script(source: &str) -> Result<Vec<(usize, ScriptOp)>, ScriptError> {
    let mut ops = Vec::new();
    for (index, text) in source.lines().enumerate() {
        if let Some(op) = parse_line(index + 1, text)? {
            ops.push((index + 1, op));
        }
    }
    Ok(ops)
}

pub fn apply(buffer: &mut GrowableBuffer, op: &ScriptOp) -> BufferResult<()> {
    match op {
        ScriptOp::AppendByte(value) => buffer.append_byte(*value),
        ScriptOp::AppendSequence(bytes) => buffer.append_sequence(bytes),
        ScriptOp::Remove { position, count } => buffer.remove_range(*position, *count),
        ScriptOp::Clear => {
            buffer.clear();
            Ok(())
        }
    }
}

/// Applies operations in order, stopping at the first buffer error.
pub fn run_script(buffer: &mut GrowableBuffer, ops: &[(usize, ScriptOp)]) -> Result<(), ScriptError> {
    for (line, op) in ops {
        apply(buffer, op).map_err(|source| ScriptError::Buffer { line: *line, source })?;
    }
    Ok(())
}

fn parse_byte(line: usize, token: &str) -> Result<u8, ScriptError> {
    if let Some(hex) = token.strip_prefix("0x") {
        return u8::from_str_radix(hex, 16).map_err(|_| invalid(line, format!("invalid hex byte '{}'", token)));
    }
    match token.as_bytes() {
        [value] => Ok(*value),
        [] => Err(invalid(line, "byte requires a value".into())),
        _ => Err(invalid(line, format!("'{}' is not a single byte", token))),
    }
}

fn parse_usize(line: usize, name: &str, token: Option<&str>) -> Result<usize, ScriptError> {
    let token = token.ok_or_else(|| invalid(line, format!("missing {}", name)))?;
    token
        .parse::<usize>()
        .map_err(|_| invalid(line, format!("invalid {} '{}'", name, token)))
}

fn invalid(line: usize, message: String) -> ScriptError {
    ScriptError::InvalidArgument { line, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script_skips_comments_and_blanks() {
        let source = "# header\n\nbyte a\n   # indented comment\nappend bc\n";
        let ops = parse_script(source).expect("Script should parse");
        assert_eq!(
            ops,
            vec![(3, ScriptOp::AppendByte(b'a')), (5, ScriptOp::AppendSequence(b"bc".to_vec()))]
        );
    }

    #[test]
    fn test_run_script_reports_failing_line() {
        let ops = parse_script("append ab\nremove 9 1\nappend cd").unwrap();
        let mut buffer = GrowableBuffer::new();

        let err = run_script(&mut buffer, &ops).unwrap_err();
        assert!(matches!(
            err,
            ScriptError::Buffer {
                line: 2,
                source: BufferError::OutOfRange { position: 9, length: 2 }
            }
        ));
        assert_eq!(buffer, "ab");
    }
}
