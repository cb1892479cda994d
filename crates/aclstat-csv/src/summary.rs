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

//! The per-clip summary report.

use crate::error::Result;
use aclstat_core::{MergedStats, VariantStats};
use csv::{QuoteStyle, WriterBuilder};
use std::io::Write;

/// Write the per-clip summary report.
///
/// Columns are `Clip Name` and `Raw Size`, followed by a
/// `Size / Ratio / Error` group per variant. A variant's group is present
/// iff the first merged pair carries it; later pairs missing that variant
/// get empty cells. The `Error` columns carry the reference-meter max error,
/// the measure the win policy evaluates.
pub fn write_summary<W: Write>(out: W, merged: &MergedStats) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(out);

    let (with_auto, with_acl) = match merged.pairs().next() {
        Some((candidate, reference)) => {
            (reference.ue4_auto.is_some(), candidate.ue4_acl.is_some())
        }
        None => (false, false),
    };

    let mut header = vec!["Clip Name", "Raw Size"];
    if with_auto {
        header.extend(["Auto Size", "Auto Ratio", "Auto Error"]);
    }
    if with_acl {
        header.extend(["ACL Size", "ACL Ratio", "ACL Error"]);
    }
    writer.write_record(&header)?;

    for (candidate, reference) in merged.pairs() {
        let mut row = vec![
            candidate.clip_name.clone(),
            candidate.raw_size.to_string(),
        ];
        if with_auto {
            push_variant_cells(&mut row, reference.ue4_auto.as_ref());
        }
        if with_acl {
            push_variant_cells(&mut row, candidate.ue4_acl.as_ref());
        }
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

fn push_variant_cells(row: &mut Vec<String>, variant: Option<&VariantStats>) {
    match variant {
        Some(variant) => {
            row.push(variant.compressed_size.to_string());
            row.push(variant.acl_compression_ratio.to_string());
            row.push(variant.ue4_max_error.to_string());
        }
        None => {
            row.extend([String::new(), String::new(), String::new()]);
        }
    }
}
