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

//! Per-worker accumulation of records and scalar sample sequences.
//!
//! Each worker folds the files it parses into a private [`Harvest`]; the
//! coordinator merges those into one and finalizes the sample sequences for
//! percentile queries.

use crate::record::StatRecord;

/// Scalar sample sequences pooled across all clips, for percentile queries.
///
/// Sequences are unordered while harvesting; [`SampleSet::sort`] must run
/// before any percentile is taken.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSet {
    /// Candidate-meter frame errors from the candidate algorithm.
    pub acl_error_values: Vec<f64>,
    /// Reference-meter frame errors from the reference algorithm.
    pub ue4_error_values: Vec<f64>,
    /// Per-clip candidate compression times in seconds.
    pub acl_compression_times: Vec<f64>,
    /// Per-clip reference compression times in seconds.
    pub ue4_compression_times: Vec<f64>,
    /// Per-clip key-reduction drop rates.
    pub clip_drop_rates: Vec<f64>,
    /// Per-pose key-reduction drop rates.
    pub pose_drop_rates: Vec<f64>,
    /// Per-track key-reduction drop rates.
    pub track_drop_rates: Vec<f64>,
}

impl SampleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold another set's samples into this one.
    pub fn merge(&mut self, other: SampleSet) {
        self.acl_error_values.extend(other.acl_error_values);
        self.ue4_error_values.extend(other.ue4_error_values);
        self.acl_compression_times.extend(other.acl_compression_times);
        self.ue4_compression_times.extend(other.ue4_compression_times);
        self.clip_drop_rates.extend(other.clip_drop_rates);
        self.pose_drop_rates.extend(other.pose_drop_rates);
        self.track_drop_rates.extend(other.track_drop_rates);
    }

    /// Take the reference-side sequences from a separately harvested set.
    ///
    /// In paired runs the candidate files carry the candidate algorithm and
    /// the reference files carry the reference algorithm, so the reference
    /// sequences must come from the other harvest.
    pub fn adopt_reference_side(&mut self, other: SampleSet) {
        self.ue4_error_values = other.ue4_error_values;
        self.ue4_compression_times = other.ue4_compression_times;
    }

    /// Sort every sequence ascending, readying them for percentile queries.
    pub fn sort(&mut self) {
        self.acl_error_values.sort_by(f64::total_cmp);
        self.ue4_error_values.sort_by(f64::total_cmp);
        self.acl_compression_times.sort_by(f64::total_cmp);
        self.ue4_compression_times.sort_by(f64::total_cmp);
        self.clip_drop_rates.sort_by(f64::total_cmp);
        self.pose_drop_rates.sort_by(f64::total_cmp);
        self.track_drop_rates.sort_by(f64::total_cmp);
    }
}

/// Everything one worker collected from its share of the input files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Harvest {
    /// Successfully decoded records, in the order they were parsed.
    pub records: Vec<StatRecord>,
    /// Pooled scalar samples from those records.
    pub samples: SampleSet,
}

impl Harvest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one decoded record into the harvest.
    ///
    /// Frame error arrays are flattened into the pooled error sequences and
    /// then dropped from the record, unless `keep_frame_errors` asks to
    /// preserve them for per-frame CSV export (in which case the pooled
    /// sequences stay empty and the record keeps its arrays).
    pub fn absorb(&mut self, mut record: StatRecord, keep_frame_errors: bool) {
        if !keep_frame_errors {
            if let Some(acl) = &mut record.ue4_acl {
                for frame in &acl.error_per_frame_and_bone {
                    self.samples.acl_error_values.extend_from_slice(frame);
                }
                acl.error_per_frame_and_bone = Vec::new();
            }
            if let Some(auto) = &mut record.ue4_auto {
                for frame in &auto.error_per_frame_and_bone {
                    self.samples.ue4_error_values.extend_from_slice(frame);
                }
                auto.error_per_frame_and_bone = Vec::new();
            }
        }

        if let Some(acl) = &record.ue4_acl {
            self.samples.acl_compression_times.push(acl.compression_time);
        }
        if let Some(auto) = &record.ue4_auto {
            self.samples.ue4_compression_times.push(auto.compression_time);
        }
        if let Some(kr) = &record.key_reduction {
            self.samples.clip_drop_rates.push(kr.clip_drop_rate());
            self.samples.pose_drop_rates.extend(kr.pose_drop_rates());
            self.samples.track_drop_rates.extend(kr.track_drop_rates());
        }

        self.records.push(record);
    }

    /// Fold another worker's harvest into this one.
    pub fn merge(&mut self, other: Harvest) {
        self.records.extend(other.records);
        self.samples.merge(other.samples);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{KeyReduction, VariantStats};
    use std::path::PathBuf;

    fn variant(name: &str, time: f64, frames: Vec<Vec<f64>>) -> VariantStats {
        VariantStats {
            algorithm_name: name.to_string(),
            compressed_size: 100,
            compression_time: time,
            acl_max_error: 0.01,
            ue4_max_error: 0.02,
            acl_compression_ratio: 10.0,
            rotation_format: None,
            translation_format: None,
            error_per_frame_and_bone: frames,
        }
    }

    fn record(clip: &str) -> StatRecord {
        StatRecord {
            clip_name: clip.to_string(),
            source_path: PathBuf::from(format!("{}_stats.sjson", clip)),
            raw_size: 1000,
            ue4_auto: Some(variant("Auto", 0.5, vec![vec![0.3, 0.4]])),
            ue4_acl: Some(variant("ACL", 0.25, vec![vec![0.1, 0.2]])),
            ue4_keyreduction: None,
            key_reduction: Some(KeyReduction {
                total_num_animated_keys: 100.0,
                total_num_dropped_animated_keys: 50.0,
                dropped_pose_keys: vec![0.5],
                dropped_track_keys: vec![0.6],
            }),
        }
    }

    // ==================== Absorb ====================

    #[test]
    fn test_absorb_flattens_and_clears_frame_errors() {
        let mut harvest = Harvest::new();
        harvest.absorb(record("walk"), false);

        assert_eq!(harvest.samples.acl_error_values, vec![0.1, 0.2]);
        assert_eq!(harvest.samples.ue4_error_values, vec![0.3, 0.4]);
        let rec = &harvest.records[0];
        assert!(rec.ue4_acl.as_ref().unwrap().error_per_frame_and_bone.is_empty());
        assert!(rec.ue4_auto.as_ref().unwrap().error_per_frame_and_bone.is_empty());
    }

    #[test]
    fn test_absorb_preserves_frame_errors_when_asked() {
        let mut harvest = Harvest::new();
        harvest.absorb(record("walk"), true);

        assert!(harvest.samples.acl_error_values.is_empty());
        assert!(harvest.samples.ue4_error_values.is_empty());
        let rec = &harvest.records[0];
        assert_eq!(
            rec.ue4_acl.as_ref().unwrap().error_per_frame_and_bone,
            vec![vec![0.1, 0.2]]
        );
    }

    #[test]
    fn test_absorb_collects_times_and_drop_rates() {
        let mut harvest = Harvest::new();
        harvest.absorb(record("walk"), false);

        assert_eq!(harvest.samples.acl_compression_times, vec![0.25]);
        assert_eq!(harvest.samples.ue4_compression_times, vec![0.5]);
        assert_eq!(harvest.samples.clip_drop_rates, vec![0.5]);
        assert_eq!(harvest.samples.pose_drop_rates, vec![0.5]);
        assert_eq!(harvest.samples.track_drop_rates, vec![0.6]);
    }

    // ==================== Merge ====================

    #[test]
    fn test_merge_concatenates() {
        let mut a = Harvest::new();
        a.absorb(record("walk"), false);
        let mut b = Harvest::new();
        b.absorb(record("run"), false);

        a.merge(b);
        assert_eq!(a.records.len(), 2);
        assert_eq!(a.samples.acl_error_values.len(), 4);
    }

    #[test]
    fn test_adopt_reference_side() {
        let mut candidate = SampleSet::new();
        candidate.acl_error_values = vec![0.1];
        candidate.ue4_error_values = vec![9.9];
        candidate.ue4_compression_times = vec![9.9];

        let mut reference = SampleSet::new();
        reference.ue4_error_values = vec![0.3];
        reference.ue4_compression_times = vec![0.5];

        candidate.adopt_reference_side(reference);
        assert_eq!(candidate.ue4_error_values, vec![0.3]);
        assert_eq!(candidate.ue4_compression_times, vec![0.5]);
        assert_eq!(candidate.acl_error_values, vec![0.1]);
    }

    #[test]
    fn test_sort() {
        let mut samples = SampleSet::new();
        samples.acl_error_values = vec![0.3, 0.1, 0.2];
        samples.sort();
        assert_eq!(samples.acl_error_values, vec![0.1, 0.2, 0.3]);
    }
}
