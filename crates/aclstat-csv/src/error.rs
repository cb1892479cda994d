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

//! Error types for CSV report generation.

use thiserror::Error;

/// CSV report generation error types.
#[derive(Debug, Error)]
pub enum CsvError {
    /// I/O error while writing a report.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the underlying CSV library.
    #[error("CSV error: {0}")]
    CsvLib(#[from] csv::Error),
}

/// Result type for CSV operations.
pub type Result<T> = std::result::Result<T, CsvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = CsvError::from(io_err);
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_is_std_error() {
        fn accepts_error<E: std::error::Error>(_: E) {}
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "x");
        accepts_error(CsvError::from(io_err));
    }
}
