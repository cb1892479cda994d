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

//! The console summary report.

use aclstat_core::percentile::{mean, percentile, percentile_rank};
use aclstat_core::{
    AggregateBucket, AggregateSet, MergedStats, Permutation, SampleSet, StatRecord, VariantStats,
    WinCounts,
};
use std::io::{self, Write};

/// Reference-meter error below which a frame is counted as accurate in the
/// "errors below" report line.
const ACCURACY_PROBE: f64 = 0.01;

pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

pub fn bytes_to_kb(bytes: u64) -> f64 {
    bytes as f64 / 1024.0
}

/// Format a duration in seconds as `00h 00m 00.00s`.
pub fn format_elapsed(seconds: f64) -> String {
    let hours = (seconds / 3600.0) as u64;
    let minutes = ((seconds % 3600.0) / 60.0) as u64;
    let secs = seconds % 60.0;
    format!("{:02}h {:02}m {:05.2}s", hours, minutes, secs)
}

/// Everything the report reads; the stages feeding it run beforehand.
pub struct ReportInputs<'a> {
    pub merged: &'a MergedStats,
    pub aggregates: &'a AggregateSet<'a>,
    pub samples: &'a SampleSet,
    pub wins: &'a WinCounts,
}

/// Print the full console report.
pub fn print_report<W: Write>(out: &mut W, inputs: &ReportInputs) -> io::Result<()> {
    if let Some(bucket) = inputs.aggregates.permutation(Permutation::Auto) {
        print_slot(
            out,
            "Total Automatic Compression:",
            bucket,
            Permutation::Auto,
            Some(&inputs.samples.ue4_compression_times),
            Some(&inputs.samples.ue4_error_values),
        )?;
    }
    if let Some(bucket) = inputs.aggregates.permutation(Permutation::Acl) {
        print_slot(
            out,
            "Total ACL Compression:",
            bucket,
            Permutation::Acl,
            Some(&inputs.samples.acl_compression_times),
            Some(&inputs.samples.acl_error_values),
        )?;
    }
    if let Some(bucket) = inputs.aggregates.permutation(Permutation::KeyReduction) {
        print_slot(
            out,
            "Total Key Reduction Compression:",
            bucket,
            Permutation::KeyReduction,
            None,
            None,
        )?;
    }

    print_configurations(out, inputs.aggregates)?;
    print_wins(out, inputs.merged, inputs.wins)?;
    print_key_reduction(out, inputs.samples)?;
    Ok(())
}

fn print_slot<W: Write>(
    out: &mut W,
    title: &str,
    bucket: &AggregateBucket<'_>,
    slot: Permutation,
    times: Option<&[f64]>,
    errors: Option<&[f64]>,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", title)?;
    writeln!(
        out,
        "    Compressed size: {:.2} MB",
        bytes_to_mb(bucket.total_compressed_size)
    )?;
    writeln!(
        out,
        "    Compression time: {}",
        format_elapsed(bucket.total_compression_time)
    )?;
    writeln!(
        out,
        "    Compression ratio: {:.2} : 1",
        bucket.compression_ratio()
    )?;
    writeln!(out, "    Max ACL error: {}", bucket.max_acl_error)?;
    writeln!(out, "    Max UE4 error: {}", bucket.max_ue4_error)?;

    if let Some(worst) = bucket.worst_entry {
        if let Some(variant) = slot_variant(worst, slot) {
            writeln!(
                out,
                "    Worst clip: {} ({:.2} : 1, {} error)",
                worst.clip_name, variant.acl_compression_ratio, variant.acl_max_error
            )?;
        }
    }

    if bucket.total_compression_time > 0.0 {
        writeln!(
            out,
            "    Compression speed: {:.2} KB/sec",
            bytes_to_kb(bucket.total_raw_size) / bucket.total_compression_time
        )?;
    }

    if let Some(times) = times.filter(|times| !times.is_empty()) {
        writeln!(
            out,
            "    Compression time 50th percentile: {:.4}s",
            percentile(times, 50.0)
        )?;
        writeln!(
            out,
            "    Compression time 85th percentile: {:.4}s",
            percentile(times, 85.0)
        )?;
        writeln!(
            out,
            "    Compression time 99th percentile: {:.4}s",
            percentile(times, 99.0)
        )?;
    }

    if let Some(errors) = errors.filter(|errors| !errors.is_empty()) {
        writeln!(
            out,
            "    Bone error 99th percentile: {:.4}",
            percentile(errors, 99.0)
        )?;
        writeln!(
            out,
            "    Errors below {}: {:.2} %",
            ACCURACY_PROBE,
            percentile_rank(errors, ACCURACY_PROBE)
        )?;
    }

    Ok(())
}

fn slot_variant(record: &StatRecord, slot: Permutation) -> Option<&VariantStats> {
    match slot {
        Permutation::Auto => record.ue4_auto.as_ref(),
        Permutation::Acl => record.ue4_acl.as_ref(),
        Permutation::KeyReduction => record.ue4_keyreduction.as_ref(),
    }
}

fn print_configurations<W: Write>(out: &mut W, aggregates: &AggregateSet<'_>) -> io::Result<()> {
    let mut algorithms = aggregates.algorithms().peekable();
    if algorithms.peek().is_none() {
        return Ok(());
    }
    writeln!(out)?;
    writeln!(out, "Stats per configuration:")?;
    for (desc, bucket) in algorithms {
        writeln!(
            out,
            "    {}: {} runs, {:.2} MB, {:.2} : 1, max UE4 error {}",
            desc,
            bucket.num_runs,
            bytes_to_mb(bucket.total_compressed_size),
            bucket.compression_ratio(),
            bucket.max_ue4_error
        )?;
    }
    Ok(())
}

fn print_wins<W: Write>(out: &mut W, merged: &MergedStats, wins: &WinCounts) -> io::Result<()> {
    let raw_total: u64 = merged.pairs().map(|(candidate, _)| candidate.raw_size).sum();
    writeln!(out)?;
    writeln!(out, "Raw size: {:.2} MB", bytes_to_mb(raw_total))?;
    writeln!(
        out,
        "ACL was smaller for {} clips ({:.2} %)",
        wins.size_wins,
        wins.percent(wins.size_wins)
    )?;
    writeln!(
        out,
        "ACL was more accurate for {} clips ({:.2} %)",
        wins.accuracy_wins,
        wins.percent(wins.accuracy_wins)
    )?;
    writeln!(
        out,
        "ACL has faster compression for {} clips ({:.2} %)",
        wins.speed_wins,
        wins.percent(wins.speed_wins)
    )?;
    writeln!(
        out,
        "ACL was smaller, more accurate, and faster for {} clips ({:.2} %)",
        wins.clean_wins,
        wins.percent(wins.clean_wins)
    )?;
    writeln!(
        out,
        "Would use ACL for {} clips ({:.2} %)",
        wins.auto_wins,
        wins.percent(wins.auto_wins)
    )?;
    Ok(())
}

fn print_key_reduction<W: Write>(out: &mut W, samples: &SampleSet) -> io::Result<()> {
    let granularities = [
        ("clip", &samples.clip_drop_rates),
        ("pose", &samples.pose_drop_rates),
        ("track", &samples.track_drop_rates),
    ];
    if granularities.iter().all(|(_, rates)| rates.is_empty()) {
        return Ok(());
    }
    writeln!(out)?;
    for (granularity, rates) in granularities {
        if rates.is_empty() {
            continue;
        }
        writeln!(
            out,
            "Key reduction dropped per {}: {:.2} % average, {:.2} % 50th percentile, {:.2} % 90th percentile",
            granularity,
            mean(rates) * 100.0,
            percentile(rates, 50.0) * 100.0,
            percentile(rates, 90.0) * 100.0
        )?;
    }
    Ok(())
}
