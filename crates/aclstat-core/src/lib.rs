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

//! Core library for aclstat: parsing, merging, and aggregating animation
//! compression benchmark statistics.
//!
//! The pipeline runs in stages:
//! 1. [`sjson::parse`] decodes a stat file into a [`Value`] tree.
//! 2. [`record::decode_record`] lifts the tree into a [`StatRecord`].
//! 3. [`Harvest`] accumulates records and scalar samples per worker.
//! 4. [`MergedStats`] sorts and pairs candidate/reference result sets.
//! 5. [`AggregateSet`] and [`WinCounts`] summarize the merged pairs, with
//!    [`percentile`] answering distribution queries over the samples.

pub mod aggregate;
pub mod classify;
pub mod error;
pub mod harvest;
pub mod merge;
pub mod percentile;
pub mod record;
pub mod sjson;
pub mod value;

pub use aggregate::{AggregateBucket, AggregateSet, BucketKey, Permutation};
pub use classify::{classify, WinCounts, WinFlags, AUTO_WIN_ERROR_THRESHOLD};
pub use error::{StatError, StatErrorKind, StatResult};
pub use harvest::{Harvest, SampleSet};
pub use merge::MergedStats;
pub use record::{
    clip_name_from_path, decode_record, DecodedFile, KeyReduction, StatRecord, VariantStats,
    KEY_REDUCTION_MIN_KEYS,
};
pub use value::Value;
