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

//! The dense per-frame, per-bone error report.

use crate::error::Result;
use csv::{QuoteStyle, WriterBuilder};
use std::io::Write;

/// Write one row per (clip, key frame, bone) error measurement.
///
/// `clips` yields each clip's name and its frame-major error grid. Only
/// meaningful when the run preserved per-frame detail; clips whose arrays
/// were already flattened contribute no rows.
pub fn write_frame_errors<'a, W, I>(out: W, clips: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = (&'a str, &'a [Vec<f64>])>,
{
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(out);

    writer.write_record(["Clip Name", "Key Frame", "Bone Index", "Error"])?;

    for (clip_name, frames) in clips {
        for (frame_index, bones) in frames.iter().enumerate() {
            for (bone_index, error) in bones.iter().enumerate() {
                writer.write_record([
                    clip_name,
                    &frame_index.to_string(),
                    &bone_index.to_string(),
                    &error.to_string(),
                ])?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}
