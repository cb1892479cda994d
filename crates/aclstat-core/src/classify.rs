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

//! Per-clip win classification of the candidate against the reference.
//!
//! All comparisons read the reference meter (`ue4_max_error`), not the
//! candidate meter.

use crate::merge::MergedStats;
use crate::record::VariantStats;

/// Reference-meter error at or below which a result is accurate enough for
/// automatic adoption.
pub const AUTO_WIN_ERROR_THRESHOLD: f64 = 0.1;

/// How one clip's candidate result compares against its reference result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WinFlags {
    /// Strictly smaller compressed size.
    pub size_win: bool,
    /// Strictly lower reference-meter max error.
    pub accuracy_win: bool,
    /// Strictly faster compression.
    pub speed_win: bool,
    /// All three at once.
    pub clean_win: bool,
    /// Good enough to adopt automatically.
    pub auto_win: bool,
}

/// Classify one clip pair.
pub fn classify(candidate: &VariantStats, reference: &VariantStats) -> WinFlags {
    let size_win = candidate.compressed_size < reference.compressed_size;
    let accuracy_win = candidate.ue4_max_error < reference.ue4_max_error;
    let speed_win = candidate.compression_time < reference.compression_time;
    let clean_win = size_win && accuracy_win && speed_win;

    // Bytes saved by the candidate; negative when it is larger.
    let saved_size = reference.compressed_size as i64 - candidate.compressed_size as i64;
    let under_threshold = candidate.ue4_max_error <= AUTO_WIN_ERROR_THRESHOLD;

    // The clauses overlap; the policy is kept as three separate conditions
    // because each encodes a distinct adoption rationale.
    let auto_win = (accuracy_win && under_threshold)
        || (under_threshold && saved_size > 0)
        || (under_threshold && accuracy_win && saved_size >= 0);

    WinFlags {
        size_win,
        accuracy_win,
        speed_win,
        clean_win,
        auto_win,
    }
}

/// Win totals over a merged result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WinCounts {
    pub size_wins: usize,
    pub accuracy_wins: usize,
    pub speed_wins: usize,
    pub clean_wins: usize,
    pub auto_wins: usize,
    /// Number of pairs classified; the denominator for percentages.
    pub total: usize,
}

impl WinCounts {
    /// Classify every merged pair that carries both compared sections.
    ///
    /// The candidate section is read from the candidate record and the
    /// reference section from the reference record. Pairs missing either
    /// section still count toward the total.
    pub fn tally(merged: &MergedStats) -> Self {
        let mut counts = Self {
            total: merged.len(),
            ..Self::default()
        };
        for (candidate, reference) in merged.pairs() {
            let (Some(acl), Some(auto)) = (&candidate.ue4_acl, &reference.ue4_auto) else {
                continue;
            };
            let flags = classify(acl, auto);
            counts.size_wins += flags.size_win as usize;
            counts.accuracy_wins += flags.accuracy_win as usize;
            counts.speed_wins += flags.speed_win as usize;
            counts.clean_wins += flags.clean_win as usize;
            counts.auto_wins += flags.auto_win as usize;
        }
        counts
    }

    /// A win count as a percentage of the classified total.
    pub fn percent(&self, wins: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            wins as f64 / self.total as f64 * 100.0
        }
    }
}
