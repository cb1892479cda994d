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

//! The key-reduction drop-rate report.

use crate::error::Result;
use csv::{QuoteStyle, WriterBuilder};
use std::io::Write;

/// Write the three drop-rate sequences side by side.
///
/// The columns are independent distributions, not per-clip triples: row `i`
/// holds the `i`-th value of each sorted sequence, and shorter sequences are
/// padded with empty cells.
pub fn write_key_reduction<W: Write>(
    out: W,
    clip_rates: &[f64],
    pose_rates: &[f64],
    track_rates: &[f64],
) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(out);

    writer.write_record(["Dropped Per Clip", "Dropped Per Pose", "Dropped Per Track"])?;

    let num_rows = clip_rates
        .len()
        .max(pose_rates.len())
        .max(track_rates.len());
    for row in 0..num_rows {
        writer.write_record([
            cell(clip_rates, row),
            cell(pose_rates, row),
            cell(track_rates, row),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn cell(rates: &[f64], row: usize) -> String {
    match rates.get(row) {
        Some(rate) => rate.to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(clip: &[f64], pose: &[f64], track: &[f64]) -> String {
        let mut buffer = Vec::new();
        write_key_reduction(&mut buffer, clip, pose, track).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_rank_aligned_rows() {
        let text = render(&[0.1, 0.2], &[0.3, 0.4], &[0.5, 0.6]);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Dropped Per Clip,Dropped Per Pose,Dropped Per Track",
                "0.1,0.3,0.5",
                "0.2,0.4,0.6",
            ]
        );
    }

    #[test]
    fn test_shorter_sequences_pad_with_empty_cells() {
        let text = render(&[0.1], &[0.3, 0.4, 0.5], &[]);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[1], "0.1,0.3,");
        assert_eq!(lines[2], ",0.4,");
        assert_eq!(lines[3], ",0.5,");
    }

    #[test]
    fn test_all_empty_writes_header_only() {
        let text = render(&[], &[], &[]);
        assert_eq!(
            text,
            "Dropped Per Clip,Dropped Per Pose,Dropped Per Track\n"
        );
    }
}
