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

//! The per-clip stat record schema and its decoder.
//!
//! A stat file decodes into a [`StatRecord`] with a fixed schema: every
//! variant section the producer may emit is an explicit `Option` field, so
//! downstream stages never probe for keys at runtime.

use crate::error::{StatError, StatResult};
use crate::value::Value;
use std::path::Path;

/// Clips with at most this many animated keys get their key-reduction drop
/// rates forced to zero instead of dividing by a near-zero denominator.
pub const KEY_REDUCTION_MIN_KEYS: f64 = 2.001;

/// One algorithm's measured results for one clip.
///
/// `acl_max_error` is the candidate-meter measurement (drives worst-entry
/// tracking); `ue4_max_error` is the reference-meter measurement (drives win
/// classification).
#[derive(Debug, Clone, PartialEq)]
pub struct VariantStats {
    pub algorithm_name: String,
    /// Compressed size in bytes.
    pub compressed_size: u64,
    /// Compression time in seconds.
    pub compression_time: f64,
    pub acl_max_error: f64,
    pub ue4_max_error: f64,
    /// Precomputed raw/compressed ratio, carried for worst-entry display.
    pub acl_compression_ratio: f64,
    pub rotation_format: Option<String>,
    pub translation_format: Option<String>,
    /// Dense per-frame (outer) per-bone (inner) error values. Cleared right
    /// after harvesting unless the run preserves per-frame detail.
    pub error_per_frame_and_bone: Vec<Vec<f64>>,
}

impl VariantStats {
    /// The algorithm description this variant aggregates under.
    ///
    /// Variants that carry track format descriptors compose them into the
    /// description so differently-configured runs land in distinct buckets.
    pub fn desc(&self) -> String {
        match (&self.rotation_format, &self.translation_format) {
            (Some(rotation), Some(translation)) => {
                format!("{} {} {}", self.algorithm_name, rotation, translation)
            }
            _ => self.algorithm_name.clone(),
        }
    }
}

/// Key-reduction bookkeeping attached to a clip.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyReduction {
    pub total_num_animated_keys: f64,
    pub total_num_dropped_animated_keys: f64,
    pub dropped_pose_keys: Vec<f64>,
    pub dropped_track_keys: Vec<f64>,
}

impl KeyReduction {
    fn is_degenerate(&self) -> bool {
        self.total_num_animated_keys <= KEY_REDUCTION_MIN_KEYS
    }

    /// Whole-clip drop rate, forced to zero for degenerate clips.
    pub fn clip_drop_rate(&self) -> f64 {
        if self.is_degenerate() {
            0.0
        } else {
            self.total_num_dropped_animated_keys / self.total_num_animated_keys
        }
    }

    /// Per-pose drop rates, zeroed element-wise for degenerate clips.
    pub fn pose_drop_rates(&self) -> Vec<f64> {
        if self.is_degenerate() {
            vec![0.0; self.dropped_pose_keys.len()]
        } else {
            self.dropped_pose_keys.clone()
        }
    }

    /// Per-track drop rates, zeroed element-wise for degenerate clips.
    pub fn track_drop_rates(&self) -> Vec<f64> {
        if self.is_degenerate() {
            vec![0.0; self.dropped_track_keys.len()]
        } else {
            self.dropped_track_keys.clone()
        }
    }
}

/// One parsed stat file.
#[derive(Debug, Clone, PartialEq)]
pub struct StatRecord {
    /// Clip identifier, unique within one result set.
    pub clip_name: String,
    /// Original file path, diagnostic only.
    pub source_path: std::path::PathBuf,
    /// Uncompressed size in bytes, the denominator for compression ratios.
    pub raw_size: u64,
    pub ue4_auto: Option<VariantStats>,
    pub ue4_acl: Option<VariantStats>,
    pub ue4_keyreduction: Option<VariantStats>,
    pub key_reduction: Option<KeyReduction>,
}

/// The outcome of decoding one stat file.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedFile {
    /// A well-formed record.
    Record(Box<StatRecord>),
    /// The producer flagged the run as failed; the message is its diagnostic.
    ProducerError(String),
}

/// Derive the clip name from a stat file path.
///
/// The extension and the producer's trailing `_stats` suffix are stripped.
pub fn clip_name_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match stem.strip_suffix("_stats") {
        Some(base) => base.to_string(),
        None => stem,
    }
}

/// Decode an SJSON document into a [`StatRecord`].
pub fn decode_record(doc: &Value, path: &Path) -> StatResult<DecodedFile> {
    if let Some(message) = doc.get("error").and_then(Value::as_str) {
        return Ok(DecodedFile::ProducerError(message.to_string()));
    }

    let record = StatRecord {
        clip_name: clip_name_from_path(path),
        source_path: path.to_path_buf(),
        raw_size: require_size(doc, "acl_raw_size", "record")?,
        ue4_auto: decode_variant(doc, "ue4_auto")?,
        ue4_acl: decode_variant(doc, "ue4_acl")?,
        ue4_keyreduction: decode_variant(doc, "ue4_keyreduction")?,
        key_reduction: decode_key_reduction(doc)?,
    };
    Ok(DecodedFile::Record(Box::new(record)))
}

fn decode_variant(doc: &Value, tag: &str) -> StatResult<Option<VariantStats>> {
    let Some(section) = doc.get(tag) else {
        return Ok(None);
    };
    if section.as_object().is_none() {
        return Err(StatError::schema(format!("'{}' is not an object", tag)));
    }

    Ok(Some(VariantStats {
        algorithm_name: require_string(section, "algorithm_name", tag)?,
        compressed_size: require_size(section, "compressed_size", tag)?,
        compression_time: require_float(section, "compression_time", tag)?,
        acl_max_error: require_float(section, "acl_max_error", tag)?,
        ue4_max_error: require_float(section, "ue4_max_error", tag)?,
        acl_compression_ratio: require_float(section, "acl_compression_ratio", tag)?,
        rotation_format: optional_string(section, "rotation_format"),
        translation_format: optional_string(section, "translation_format"),
        error_per_frame_and_bone: decode_frame_errors(section, tag)?,
    }))
}

fn decode_key_reduction(doc: &Value) -> StatResult<Option<KeyReduction>> {
    let tag = "ue4_keyreduction";
    let Some(section) = doc.get(tag) else {
        return Ok(None);
    };
    Ok(Some(KeyReduction {
        total_num_animated_keys: require_float(section, "total_num_animated_keys", tag)?,
        total_num_dropped_animated_keys: require_float(
            section,
            "total_num_dropped_animated_keys",
            tag,
        )?,
        dropped_pose_keys: float_sequence(section, "dropped_pose_keys", tag)?,
        dropped_track_keys: float_sequence(section, "dropped_track_keys", tag)?,
    }))
}

fn decode_frame_errors(section: &Value, tag: &str) -> StatResult<Vec<Vec<f64>>> {
    let Some(outer) = section.get("error_per_frame_and_bone") else {
        return Ok(Vec::new());
    };
    let frames = outer.as_array().ok_or_else(|| {
        StatError::schema(format!("'{}': error_per_frame_and_bone is not an array", tag))
    })?;
    frames
        .iter()
        .map(|frame| {
            let bones = frame.as_array().ok_or_else(|| {
                StatError::schema(format!("'{}': frame error row is not an array", tag))
            })?;
            bones
                .iter()
                .map(|bone| {
                    bone.as_float().ok_or_else(|| {
                        StatError::schema(format!("'{}': non-numeric frame error", tag))
                    })
                })
                .collect()
        })
        .collect()
}

fn require_float(section: &Value, key: &str, context: &str) -> StatResult<f64> {
    section.get(key).and_then(Value::as_float).ok_or_else(|| {
        StatError::schema(format!("'{}': missing or non-numeric '{}'", context, key))
    })
}

fn require_size(section: &Value, key: &str, context: &str) -> StatResult<u64> {
    let value = require_float(section, key, context)?;
    if value < 0.0 {
        return Err(StatError::schema(format!(
            "'{}': '{}' is negative",
            context, key
        )));
    }
    Ok(value as u64)
}

fn require_string(section: &Value, key: &str, context: &str) -> StatResult<String> {
    section
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| StatError::schema(format!("'{}': missing or non-string '{}'", context, key)))
}

fn optional_string(section: &Value, key: &str) -> Option<String> {
    section.get(key).and_then(Value::as_str).map(str::to_string)
}

fn float_sequence(section: &Value, key: &str, context: &str) -> StatResult<Vec<f64>> {
    let Some(value) = section.get(key) else {
        return Ok(Vec::new());
    };
    let items = value
        .as_array()
        .ok_or_else(|| StatError::schema(format!("'{}': '{}' is not an array", context, key)))?;
    items
        .iter()
        .map(|item| {
            item.as_float().ok_or_else(|| {
                StatError::schema(format!("'{}': non-numeric value in '{}'", context, key))
            })
        })
        .collect()
}
