// ACLStat - Animation compression benchmark statistics
//
// Copyright (c) 2025 the aclstat contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for stat parsing and merging.

use std::fmt;
use thiserror::Error;

/// The kind of error that occurred while processing stat data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatErrorKind {
    /// Malformed SJSON text.
    Syntax,
    /// A decoded record is missing a field or carries the wrong type.
    Schema,
    /// Candidate and reference result sets do not correspond 1:1.
    Pairing,
    /// I/O error (file read, etc).
    Io,
}

impl fmt::Display for StatErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => write!(f, "SyntaxError"),
            Self::Schema => write!(f, "SchemaError"),
            Self::Pairing => write!(f, "PairingError"),
            Self::Io => write!(f, "IOError"),
        }
    }
}

/// An error raised by the stat parser, record decoder, or merge stage.
///
/// `line` is 1-based and only meaningful for syntax errors; other kinds
/// report line 0.
#[derive(Debug, Clone, Error)]
#[error("{kind} at line {line}: {message}")]
pub struct StatError {
    /// The kind of error.
    pub kind: StatErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Line number (1-based, 0 when not applicable).
    pub line: usize,
}

impl StatError {
    /// Create a new error.
    pub fn new(kind: StatErrorKind, message: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            message: message.into(),
            line,
        }
    }

    pub fn syntax(message: impl Into<String>, line: usize) -> Self {
        Self::new(StatErrorKind::Syntax, message, line)
    }

    pub fn schema(message: impl Into<String>) -> Self {
        Self::new(StatErrorKind::Schema, message, 0)
    }

    pub fn pairing(message: impl Into<String>) -> Self {
        Self::new(StatErrorKind::Pairing, message, 0)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(StatErrorKind::Io, message, 0)
    }
}

/// Result type for stat operations.
pub type StatResult<T> = Result<T, StatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StatError::syntax("unexpected token", 42);
        let msg = format!("{}", err);
        assert!(msg.contains("SyntaxError"));
        assert!(msg.contains("line 42"));
        assert!(msg.contains("unexpected token"));
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(StatError::syntax("x", 1).kind, StatErrorKind::Syntax);
        assert_eq!(StatError::schema("x").kind, StatErrorKind::Schema);
        assert_eq!(StatError::pairing("x").kind, StatErrorKind::Pairing);
        assert_eq!(StatError::io("x").kind, StatErrorKind::Io);
    }

    #[test]
    fn test_error_is_std_error() {
        fn accepts_error<E: std::error::Error>(_: E) {}
        accepts_error(StatError::schema("test"));
    }

    #[test]
    fn test_non_syntax_errors_report_line_zero() {
        assert_eq!(StatError::schema("x").line, 0);
        assert_eq!(StatError::pairing("x").line, 0);
    }
}
