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

//! Aggregation of per-clip results into totals, maxima, and worst entries.
//!
//! Every variant result folds into two buckets: one keyed by its algorithm
//! description and one keyed by its permutation slot, so the report can show
//! both per-configuration and per-slot totals from the same pass.

use crate::merge::MergedStats;
use crate::record::{StatRecord, VariantStats};
use std::collections::BTreeMap;

/// The three fixed variant slots a stat file may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Permutation {
    Auto,
    Acl,
    KeyReduction,
}

impl Permutation {
    /// The stat file section this slot is read from.
    pub fn key(self) -> &'static str {
        match self {
            Self::Auto => "ue4_auto",
            Self::Acl => "ue4_acl",
            Self::KeyReduction => "ue4_keyreduction",
        }
    }
}

/// A bucket identity: either a free-form algorithm description or one of
/// the fixed permutation slots.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum BucketKey {
    Algorithm(String),
    Permutation(Permutation),
}

/// Running totals and maxima for one bucket.
#[derive(Debug, Clone)]
pub struct AggregateBucket<'a> {
    /// Total uncompressed bytes.
    pub total_raw_size: u64,
    /// Total compressed bytes.
    pub total_compressed_size: u64,
    /// Total compression time in seconds.
    pub total_compression_time: f64,
    /// Largest candidate-meter max error seen.
    pub max_acl_error: f64,
    /// Largest reference-meter max error seen.
    pub max_ue4_error: f64,
    /// Number of variant results folded in.
    pub num_runs: usize,
    /// Candidate-meter error of the worst entry, -1.0 until one is seen.
    pub worst_error: f64,
    /// The record holding the worst candidate-meter error.
    pub worst_entry: Option<&'a StatRecord>,
}

impl<'a> AggregateBucket<'a> {
    fn new() -> Self {
        Self {
            total_raw_size: 0,
            total_compressed_size: 0,
            total_compression_time: 0.0,
            max_acl_error: 0.0,
            max_ue4_error: 0.0,
            num_runs: 0,
            worst_error: -1.0,
            worst_entry: None,
        }
    }

    fn fold(&mut self, record: &'a StatRecord, variant: &VariantStats) {
        self.total_raw_size += record.raw_size;
        self.total_compressed_size += variant.compressed_size;
        self.total_compression_time += variant.compression_time;
        self.max_acl_error = self.max_acl_error.max(variant.acl_max_error);
        self.max_ue4_error = self.max_ue4_error.max(variant.ue4_max_error);
        self.num_runs += 1;
        // Strictly greater, so ties keep the first clip seen.
        if variant.acl_max_error > self.worst_error {
            self.worst_error = variant.acl_max_error;
            self.worst_entry = Some(record);
        }
    }

    /// Overall raw/compressed ratio for the bucket.
    pub fn compression_ratio(&self) -> f64 {
        self.total_raw_size as f64 / self.total_compressed_size as f64
    }
}

/// All buckets accumulated over the merged result sets.
#[derive(Debug, Clone, Default)]
pub struct AggregateSet<'a> {
    buckets: BTreeMap<BucketKey, AggregateBucket<'a>>,
}

impl<'a> AggregateSet<'a> {
    /// Aggregate every variant result of every merged pair.
    ///
    /// The reference slot is read from the reference record of each pair and
    /// the candidate slots from the candidate record, matching which side of
    /// a paired run produced which section.
    pub fn build(merged: &'a MergedStats) -> Self {
        let mut set = Self::default();
        for (candidate, reference) in merged.pairs() {
            if let Some(auto) = &reference.ue4_auto {
                set.fold(reference, auto, Permutation::Auto);
            }
            if let Some(acl) = &candidate.ue4_acl {
                set.fold(candidate, acl, Permutation::Acl);
            }
            if let Some(kr) = &candidate.ue4_keyreduction {
                set.fold(candidate, kr, Permutation::KeyReduction);
            }
        }
        set
    }

    fn fold(&mut self, record: &'a StatRecord, variant: &VariantStats, slot: Permutation) {
        self.buckets
            .entry(BucketKey::Algorithm(variant.desc()))
            .or_insert_with(AggregateBucket::new)
            .fold(record, variant);
        self.buckets
            .entry(BucketKey::Permutation(slot))
            .or_insert_with(AggregateBucket::new)
            .fold(record, variant);
    }

    /// Look up the bucket for a fixed permutation slot.
    pub fn permutation(&self, slot: Permutation) -> Option<&AggregateBucket<'a>> {
        self.buckets.get(&BucketKey::Permutation(slot))
    }

    /// Per-configuration buckets in description order.
    pub fn algorithms(&self) -> impl Iterator<Item = (&str, &AggregateBucket<'a>)> {
        self.buckets.iter().filter_map(|(key, bucket)| match key {
            BucketKey::Algorithm(desc) => Some((desc.as_str(), bucket)),
            BucketKey::Permutation(_) => None,
        })
    }
}
