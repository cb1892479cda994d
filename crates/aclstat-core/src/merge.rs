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

//! Pairing of candidate and reference result sets.
//!
//! Paired runs parse two directories of stat files that must describe the
//! same clips. Both sets are sorted by clip name and validated 1:1; any
//! mismatch is a hard error rather than a silent truncation.

use crate::error::{StatError, StatResult};
use crate::record::StatRecord;

/// The merged, clip-aligned view of one or two result sets.
#[derive(Debug, Clone)]
pub struct MergedStats {
    candidate: Vec<StatRecord>,
    /// `None` in single-set runs; pairs then zip the candidate with itself.
    reference: Option<Vec<StatRecord>>,
}

impl MergedStats {
    /// Sort, validate, and merge the result sets.
    ///
    /// Clip names must be unique within each set, and in paired runs the two
    /// sets must contain exactly the same clips.
    pub fn merge(
        mut candidate: Vec<StatRecord>,
        reference: Option<Vec<StatRecord>>,
    ) -> StatResult<Self> {
        candidate.sort_by(|a, b| a.clip_name.cmp(&b.clip_name));
        check_unique(&candidate, "candidate")?;

        let reference = match reference {
            Some(mut reference) => {
                reference.sort_by(|a, b| a.clip_name.cmp(&b.clip_name));
                check_unique(&reference, "reference")?;
                if candidate.len() != reference.len() {
                    return Err(StatError::pairing(format!(
                        "result sets differ in size: {} candidate clips vs {} reference clips",
                        candidate.len(),
                        reference.len()
                    )));
                }
                for (cand, refr) in candidate.iter().zip(reference.iter()) {
                    if cand.clip_name != refr.clip_name {
                        return Err(StatError::pairing(format!(
                            "candidate clip '{}' has no counterpart (paired against reference '{}')",
                            cand.clip_name, refr.clip_name
                        )));
                    }
                }
                Some(reference)
            }
            None => None,
        };

        Ok(Self {
            candidate,
            reference,
        })
    }

    /// Number of merged clip pairs.
    pub fn len(&self) -> usize {
        self.candidate.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidate.is_empty()
    }

    /// Iterate `(candidate, reference)` record pairs in clip-name order.
    pub fn pairs(&self) -> impl Iterator<Item = (&StatRecord, &StatRecord)> {
        let reference = self.reference.as_deref().unwrap_or(&self.candidate);
        self.candidate.iter().zip(reference.iter())
    }
}

fn check_unique(records: &[StatRecord], label: &str) -> StatResult<()> {
    for pair in records.windows(2) {
        if pair[0].clip_name == pair[1].clip_name {
            return Err(StatError::pairing(format!(
                "duplicate clip '{}' in {} result set",
                pair[0].clip_name, label
            )));
        }
    }
    Ok(())
}
