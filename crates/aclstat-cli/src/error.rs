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

//! Error types for the command-line interface.

use thiserror::Error;

/// Top-level CLI error type.
///
/// Per-file parse failures are not errors at this level; they are reported
/// as skip diagnostics and the run continues. Everything here aborts the
/// run.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid command-line configuration, reported before any work.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error (directory walk, CSV file creation, etc).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Candidate and reference inputs do not describe the same clips.
    #[error("Pairing error: {0}")]
    Pairing(String),

    /// CSV report generation failed.
    #[error(transparent)]
    Csv(#[from] aclstat_csv::CsvError),

    /// The run was interrupted by the user.
    #[error("interrupted")]
    Interrupted,
}

impl CliError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn pairing(message: impl Into<String>) -> Self {
        Self::Pairing(message.into())
    }
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = CliError::config("--parallel must be positive");
        assert_eq!(
            err.to_string(),
            "Configuration error: --parallel must be positive"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = CliError::from(io_err);
        assert!(matches!(err, CliError::Io(_)));
    }
}
