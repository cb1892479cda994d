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

//! CSV report writers for aclstat.
//!
//! Three reports, each written to any `std::io::Write` sink:
//! - [`write_summary`]: one row per clip with sizes, ratios, and errors.
//! - [`write_frame_errors`]: one row per (clip, frame, bone) measurement.
//! - [`write_key_reduction`]: the three drop-rate distributions side by side.

pub mod error;
pub mod frame_error;
pub mod key_reduction;
pub mod summary;

pub use error::{CsvError, Result};
pub use frame_error::write_frame_errors;
pub use key_reduction::write_key_reduction;
pub use summary::write_summary;
