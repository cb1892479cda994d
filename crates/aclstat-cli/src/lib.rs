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

//! Command-line pipeline for aclstat.
//!
//! [`run`] drives the whole pipeline: discover stat files, parse them on
//! the worker pool, merge and aggregate the results, write the requested
//! CSV reports, and print the console summary.

pub mod error;
pub mod options;
pub mod pool;
pub mod progress;
pub mod report;

pub use error::{CliError, Result};
pub use options::{Args, InputSelection, Options};

use aclstat_core::{AggregateSet, Harvest, MergedStats, SampleSet, StatRecord, WinCounts};
use options::{check_pairing, collect_stat_files};
use progress::ProgressBar;
use report::ReportInputs;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Run the full pipeline for a validated configuration.
///
/// `cancel` is polled by the workers; once set (by the interrupt handler)
/// the run winds down and returns [`CliError::Interrupted`].
pub fn run(options: &Options, cancel: &AtomicBool) -> Result<()> {
    let start = Instant::now();

    let (candidate, reference) = match &options.input {
        InputSelection::Unified(dir) => {
            let files = collect_stat_files(dir)?;
            if files.is_empty() {
                println!("No input clips found");
                return Ok(());
            }
            let harvest = parse_with_progress("Parsing stat files", files, options, cancel)?;
            (harvest, None)
        }
        InputSelection::Paired {
            candidate,
            reference,
        } => {
            let candidate_files = collect_stat_files(candidate)?;
            let reference_files = collect_stat_files(reference)?;
            if candidate_files.is_empty() && reference_files.is_empty() {
                println!("No input clips found");
                return Ok(());
            }
            check_pairing(&candidate_files, &reference_files)?;
            let candidate_harvest =
                parse_with_progress("Parsing candidate stats", candidate_files, options, cancel)?;
            let reference_harvest =
                parse_with_progress("Parsing reference stats", reference_files, options, cancel)?;
            (candidate_harvest, Some(reference_harvest))
        }
    };

    let Harvest {
        records: candidate_records,
        mut samples,
    } = candidate;
    let reference_records: Option<Vec<StatRecord>> = match reference {
        Some(reference) => {
            samples.adopt_reference_side(reference.samples);
            Some(reference.records)
        }
        None => None,
    };
    samples.sort();

    let merged = MergedStats::merge(candidate_records, reference_records)
        .map_err(|err| CliError::pairing(err.to_string()))?;

    println!(
        "Parsed {} clips in {}",
        merged.len(),
        report::format_elapsed(start.elapsed().as_secs_f64())
    );
    if merged.is_empty() {
        println!("No valid stat files were parsed");
        return Ok(());
    }

    if options.any_csv() {
        std::fs::create_dir_all(&options.output_dir)?;
        write_csv_reports(options, &merged, &samples)?;
    }

    let aggregates = AggregateSet::build(&merged);
    let wins = WinCounts::tally(&merged);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::print_report(
        &mut out,
        &ReportInputs {
            merged: &merged,
            aggregates: &aggregates,
            samples: &samples,
            wins: &wins,
        },
    )?;
    Ok(())
}

fn parse_with_progress(
    label: &str,
    files: Vec<PathBuf>,
    options: &Options,
    cancel: &AtomicBool,
) -> Result<Harvest> {
    let bar = ProgressBar::new(label);
    bar.update(0, files.len());
    let harvest = pool::parse_files(
        files,
        options.num_threads,
        options.csv_error,
        cancel,
        |current, total, path, skipped| {
            if let Some(reason) = skipped {
                bar.note(&format!("Skipping '{}': {}", path.display(), reason));
            }
            bar.update(current, total);
        },
    );
    if cancel.load(Ordering::Relaxed) {
        return Err(CliError::Interrupted);
    }
    Ok(harvest)
}

/// Write the requested CSV reports. A report with no data rows at all is
/// not created, so runs without per-frame detail or key reduction leave no
/// header-only files behind.
fn write_csv_reports(
    options: &Options,
    merged: &MergedStats,
    samples: &SampleSet,
) -> Result<()> {
    if options.csv_summary {
        let file = BufWriter::new(File::create(options.output_dir.join("stats_summary.csv"))?);
        aclstat_csv::write_summary(file, merged)?;
    }
    if options.csv_error {
        let auto_clips: Vec<(&str, &[Vec<f64>])> = merged
            .pairs()
            .filter_map(|(_, reference)| {
                reference.ue4_auto.as_ref().map(|variant| {
                    (
                        reference.clip_name.as_str(),
                        variant.error_per_frame_and_bone.as_slice(),
                    )
                })
            })
            .collect();
        if auto_clips.iter().any(|(_, frames)| !frames.is_empty()) {
            let file = BufWriter::new(File::create(
                options.output_dir.join("stats_ue4_auto_error.csv"),
            )?);
            aclstat_csv::write_frame_errors(file, auto_clips)?;
        }

        let acl_clips: Vec<(&str, &[Vec<f64>])> = merged
            .pairs()
            .filter_map(|(candidate, _)| {
                candidate.ue4_acl.as_ref().map(|variant| {
                    (
                        candidate.clip_name.as_str(),
                        variant.error_per_frame_and_bone.as_slice(),
                    )
                })
            })
            .collect();
        if acl_clips.iter().any(|(_, frames)| !frames.is_empty()) {
            let file = BufWriter::new(File::create(
                options.output_dir.join("stats_ue4_acl_error.csv"),
            )?);
            aclstat_csv::write_frame_errors(file, acl_clips)?;
        }
    }
    if options.csv_kr
        && !(samples.clip_drop_rates.is_empty()
            && samples.pose_drop_rates.is_empty()
            && samples.track_drop_rates.is_empty())
    {
        let file = BufWriter::new(File::create(options.output_dir.join("stats_kr.csv"))?);
        aclstat_csv::write_key_reduction(
            file,
            &samples.clip_drop_rates,
            &samples.pose_drop_rates,
            &samples.track_drop_rates,
        )?;
    }
    Ok(())
}
