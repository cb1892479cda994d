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

//! End-to-end tests for the aclstat binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

/// Test helper to create an aclstat command
fn aclstat_cmd() -> Command {
    Command::cargo_bin("aclstat").expect("Failed to find aclstat binary")
}

fn stat_file_text(compressed_size: u64, auto_error: f64, acl_error: f64) -> String {
    format!(
        concat!(
            "// generated by the benchmark run\n",
            "acl_raw_size = 4000\n",
            "ue4_auto = {{\n",
            "\talgorithm_name = \"BitwiseCompressOnly\"\n",
            "\trotation_format = \"Float96NoW\"\n",
            "\ttranslation_format = \"None\"\n",
            "\tcompressed_size = {}\n",
            "\tcompression_time = 0.8\n",
            "\tacl_max_error = {}\n",
            "\tue4_max_error = {}\n",
            "\tacl_compression_ratio = 2.0\n",
            "\terror_per_frame_and_bone = [ [ 0.01, 0.02 ] ]\n",
            "}}\n",
            "ue4_acl = {{\n",
            "\talgorithm_name = \"ACL\"\n",
            "\tcompressed_size = {}\n",
            "\tcompression_time = 0.4\n",
            "\tacl_max_error = {}\n",
            "\tue4_max_error = {}\n",
            "\tacl_compression_ratio = 4.0\n",
            "\terror_per_frame_and_bone = [ [ 0.005, 0.008 ] ]\n",
            "}}\n",
        ),
        compressed_size * 2,
        auto_error,
        auto_error,
        compressed_size,
        acl_error,
        acl_error,
    )
}

fn write_clips(dir: &Path, names: &[&str]) {
    for (i, name) in names.iter().enumerate() {
        let path = dir.join(format!("{}_stats.sjson", name));
        fs::write(&path, stat_file_text(1000 + i as u64, 0.09, 0.05)).unwrap();
    }
}

fn create_stats_dir(names: &[&str]) -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");
    write_clips(dir.path(), names);
    dir
}

// ==================== Configuration errors ====================

#[test]
fn test_no_input_fails() {
    aclstat_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_missing_directory_fails() {
    aclstat_cmd()
        .args(["--stats", "/nonexistent/stats/dir"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a directory"));
}

#[test]
fn test_zero_parallel_fails() {
    let dir = create_stats_dir(&["walk"]);
    aclstat_cmd()
        .args(["--stats"])
        .arg(dir.path())
        .args(["--parallel", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--parallel"));
}

#[test]
fn test_acl_without_ue4_fails() {
    let dir = create_stats_dir(&["walk"]);
    aclstat_cmd()
        .arg("--acl")
        .arg(dir.path())
        .assert()
        .failure();
}

// ==================== Unified runs ====================

#[test]
fn test_unified_run_reports_all_clips() {
    let dir = create_stats_dir(&["walk", "run", "jump"]);
    aclstat_cmd()
        .arg("--stats")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Parsed 3 clips"))
        .stdout(predicate::str::contains("Total ACL Compression:"))
        .stdout(predicate::str::contains("Would use ACL for 3 clips (100.00 %)"));
}

#[test]
fn test_malformed_file_is_skipped_and_named() {
    let dir = create_stats_dir(&["walk", "run"]);
    fs::write(dir.path().join("broken_stats.sjson"), "acl_raw_size = @@").unwrap();

    aclstat_cmd()
        .arg("--stats")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Parsed 2 clips"))
        .stderr(predicate::str::contains("broken_stats.sjson"));
}

#[test]
fn test_producer_error_file_is_skipped_with_its_message() {
    let dir = create_stats_dir(&["walk"]);
    fs::write(
        dir.path().join("bad_stats.sjson"),
        "error = \"clip is additive\"",
    )
    .unwrap();

    aclstat_cmd()
        .arg("--stats")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Parsed 1 clips"))
        .stderr(predicate::str::contains("clip is additive"));
}

#[test]
fn test_empty_directory() {
    let dir = tempdir().unwrap();
    aclstat_cmd()
        .arg("--stats")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No input clips found"));
}

#[test]
fn test_parallel_run_matches_serial_clip_count() {
    let dir = create_stats_dir(&["a", "b", "c", "d", "e", "f"]);
    aclstat_cmd()
        .arg("--stats")
        .arg(dir.path())
        .args(["--parallel", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Parsed 6 clips"));
}

// ==================== Paired runs ====================

#[test]
fn test_paired_run() {
    let acl_dir = create_stats_dir(&["walk", "run"]);
    let ue4_dir = create_stats_dir(&["walk", "run"]);
    aclstat_cmd()
        .arg("--acl")
        .arg(acl_dir.path())
        .arg("--ue4")
        .arg(ue4_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Parsed 2 clips"));
}

#[test]
fn test_paired_run_rejects_mismatched_sets() {
    let acl_dir = create_stats_dir(&["walk", "run"]);
    let ue4_dir = create_stats_dir(&["walk"]);
    aclstat_cmd()
        .arg("--acl")
        .arg(acl_dir.path())
        .arg("--ue4")
        .arg(ue4_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Pairing error"));
}

// ==================== CSV exports ====================

#[test]
fn test_csv_summary_export() {
    let dir = create_stats_dir(&["walk"]);
    let out = tempdir().unwrap();
    aclstat_cmd()
        .arg("--stats")
        .arg(dir.path())
        .arg("--csv-summary")
        .arg("--output-dir")
        .arg(out.path())
        .assert()
        .success();

    let summary = fs::read_to_string(out.path().join("stats_summary.csv")).unwrap();
    assert!(summary.starts_with(
        "Clip Name,Raw Size,Auto Size,Auto Ratio,Auto Error,ACL Size,ACL Ratio,ACL Error"
    ));
    assert!(summary.contains("walk,4000"));
}

#[test]
fn test_csv_error_export() {
    let dir = create_stats_dir(&["walk"]);
    let out = tempdir().unwrap();
    aclstat_cmd()
        .arg("--stats")
        .arg(dir.path())
        .arg("--csv-error")
        .arg("--output-dir")
        .arg(out.path())
        .assert()
        .success();

    let acl = fs::read_to_string(out.path().join("stats_ue4_acl_error.csv")).unwrap();
    assert!(acl.starts_with("Clip Name,Key Frame,Bone Index,Error"));
    assert!(acl.contains("walk,0,0,0.005"));
    let auto = fs::read_to_string(out.path().join("stats_ue4_auto_error.csv")).unwrap();
    assert!(auto.contains("walk,0,1,0.02"));
}

#[test]
fn test_csv_kr_export() {
    let dir = tempdir().unwrap();
    let text = concat!(
        "acl_raw_size = 4000\n",
        "ue4_keyreduction = {\n",
        "\talgorithm_name = \"KeyReduction\"\n",
        "\tcompressed_size = 500\n",
        "\tcompression_time = 0.2\n",
        "\tacl_max_error = 0.01\n",
        "\tue4_max_error = 0.02\n",
        "\tacl_compression_ratio = 8.0\n",
        "\ttotal_num_animated_keys = 100.0\n",
        "\ttotal_num_dropped_animated_keys = 25.0\n",
        "\tdropped_pose_keys = [ 0.25, 0.5 ]\n",
        "\tdropped_track_keys = [ 0.3 ]\n",
        "}\n",
    );
    fs::write(dir.path().join("kr_stats.sjson"), text).unwrap();

    let out = tempdir().unwrap();
    aclstat_cmd()
        .arg("--stats")
        .arg(dir.path())
        .arg("--csv-kr")
        .arg("--output-dir")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Key Reduction Compression:"))
        .stdout(predicate::str::contains("Key reduction dropped per clip"));

    let kr = fs::read_to_string(out.path().join("stats_kr.csv")).unwrap();
    let lines: Vec<_> = kr.lines().collect();
    assert_eq!(lines[0], "Dropped Per Clip,Dropped Per Pose,Dropped Per Track");
    assert_eq!(lines[1], "0.25,0.25,0.3");
    assert_eq!(lines[2], ",0.5,");
}

#[test]
fn test_csv_exports_without_data_create_no_files() {
    let dir = tempdir().unwrap();
    // No frame error arrays and no key reduction section.
    let text = concat!(
        "acl_raw_size = 4000\n",
        "ue4_acl = {\n",
        "\talgorithm_name = \"ACL\"\n",
        "\tcompressed_size = 1000\n",
        "\tcompression_time = 0.4\n",
        "\tacl_max_error = 0.05\n",
        "\tue4_max_error = 0.05\n",
        "\tacl_compression_ratio = 4.0\n",
        "}\n",
    );
    fs::write(dir.path().join("walk_stats.sjson"), text).unwrap();

    let out = tempdir().unwrap();
    aclstat_cmd()
        .arg("--stats")
        .arg(dir.path())
        .arg("--csv-error")
        .arg("--csv-kr")
        .arg("--output-dir")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Parsed 1 clips"));

    assert!(!out.path().join("stats_ue4_auto_error.csv").exists());
    assert!(!out.path().join("stats_ue4_acl_error.csv").exists());
    assert!(!out.path().join("stats_kr.csv").exists());
}
