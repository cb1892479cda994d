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

//! Command-line argument parsing, validation, and input discovery.

use crate::error::{CliError, Result};
use clap::Parser;
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Aggregate animation compression benchmark statistics.
///
/// Parses the per-clip stat files written by the benchmark runs, merges
/// candidate and reference results by clip, and prints a summary report,
/// optionally exporting CSV files.
#[derive(Debug, Parser)]
#[command(name = "aclstat", version, about, long_about = None)]
pub struct Args {
    /// Directory holding one unified set of stat files
    #[arg(long, value_name = "DIR", conflicts_with_all = ["acl", "ue4"])]
    pub stats: Option<PathBuf>,

    /// Directory holding the candidate (ACL) stat files
    #[arg(long, value_name = "DIR", requires = "ue4")]
    pub acl: Option<PathBuf>,

    /// Directory holding the reference (engine) stat files
    #[arg(long, value_name = "DIR", requires = "acl")]
    pub ue4: Option<PathBuf>,

    /// Write the per-clip summary to stats_summary.csv
    #[arg(long)]
    pub csv_summary: bool,

    /// Preserve per-frame errors and write them to stats_ue4_*_error.csv
    #[arg(long)]
    pub csv_error: bool,

    /// Write key-reduction drop rates to stats_kr.csv
    #[arg(long)]
    pub csv_kr: bool,

    /// Number of parallel parsing workers
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub parallel: usize,

    /// Directory the CSV files are written into
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,
}

/// Where the stat files come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSelection {
    /// One directory whose records carry every variant section.
    Unified(PathBuf),
    /// Two directories whose file sets must pair 1:1 by file name.
    Paired {
        candidate: PathBuf,
        reference: PathBuf,
    },
}

/// Validated run configuration.
#[derive(Debug, Clone)]
pub struct Options {
    pub input: InputSelection,
    pub csv_summary: bool,
    pub csv_error: bool,
    pub csv_kr: bool,
    pub num_threads: usize,
    pub output_dir: PathBuf,
}

impl Options {
    /// Validate parsed arguments into a run configuration.
    pub fn from_args(args: Args) -> Result<Self> {
        let input = match (args.stats, args.acl, args.ue4) {
            (Some(stats), None, None) => InputSelection::Unified(stats),
            (None, Some(acl), Some(ue4)) => InputSelection::Paired {
                candidate: acl,
                reference: ue4,
            },
            _ => {
                return Err(CliError::config(
                    "pass either --stats <DIR> or both --acl <DIR> and --ue4 <DIR>",
                ))
            }
        };

        match &input {
            InputSelection::Unified(dir) => check_directory(dir)?,
            InputSelection::Paired {
                candidate,
                reference,
            } => {
                check_directory(candidate)?;
                check_directory(reference)?;
            }
        }

        if args.parallel == 0 {
            return Err(CliError::config("--parallel must be a positive integer"));
        }

        Ok(Self {
            input,
            csv_summary: args.csv_summary,
            csv_error: args.csv_error,
            csv_kr: args.csv_kr,
            num_threads: args.parallel,
            output_dir: args.output_dir,
        })
    }

    /// True when any CSV export is requested.
    pub fn any_csv(&self) -> bool {
        self.csv_summary || self.csv_error || self.csv_kr
    }
}

fn check_directory(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        return Err(CliError::config(format!(
            "'{}' is not a directory",
            dir.display()
        )));
    }
    Ok(())
}

/// Recursively collect the `.sjson` files under `dir`, sorted by path.
pub fn collect_stat_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_file()
            && entry
                .path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("sjson"))
        {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Check that the two file sets pair 1:1 by file name, before any parsing.
pub fn check_pairing(candidate: &[PathBuf], reference: &[PathBuf]) -> Result<()> {
    if candidate.len() != reference.len() {
        return Err(CliError::pairing(format!(
            "input sets differ in size: {} candidate files vs {} reference files",
            candidate.len(),
            reference.len()
        )));
    }
    let reference_names: BTreeSet<&OsStr> =
        reference.iter().filter_map(|path| path.file_name()).collect();
    for path in candidate {
        let name = path.file_name().unwrap_or(OsStr::new(""));
        if !reference_names.contains(name) {
            return Err(CliError::pairing(format!(
                "candidate file '{}' has no reference counterpart",
                name.to_string_lossy()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(stats: Option<&Path>) -> Args {
        Args {
            stats: stats.map(Path::to_path_buf),
            acl: None,
            ue4: None,
            csv_summary: false,
            csv_error: false,
            csv_kr: false,
            parallel: 1,
            output_dir: PathBuf::from("."),
        }
    }

    // ==================== Validation ====================

    #[test]
    fn test_no_input_is_a_config_error() {
        let err = Options::from_args(args(None)).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_missing_directory_is_a_config_error() {
        let err = Options::from_args(args(Some(Path::new("/nonexistent/dir")))).unwrap_err();
        assert!(err.to_string().contains("is not a directory"));
    }

    #[test]
    fn test_zero_parallel_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let mut a = args(Some(dir.path()));
        a.parallel = 0;
        let err = Options::from_args(a).unwrap_err();
        assert!(err.to_string().contains("--parallel"));
    }

    #[test]
    fn test_valid_unified_input() {
        let dir = TempDir::new().unwrap();
        let options = Options::from_args(args(Some(dir.path()))).unwrap();
        assert_eq!(options.input, InputSelection::Unified(dir.path().to_path_buf()));
        assert!(!options.any_csv());
    }

    // ==================== File discovery ====================

    #[test]
    fn test_collect_finds_sjson_recursively() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        std::fs::write(dir.path().join("b_stats.sjson"), "").unwrap();
        std::fs::write(sub.join("a_stats.sjson"), "").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();

        let files = collect_stat_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["b_stats.sjson", "a_stats.sjson"]);
    }

    // ==================== Pairing precheck ====================

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|n| PathBuf::from(format!("/x/{}", n))).collect()
    }

    #[test]
    fn test_pairing_accepts_matching_sets() {
        let candidate = paths(&["a_stats.sjson", "b_stats.sjson"]);
        let reference = paths(&["b_stats.sjson", "a_stats.sjson"]);
        assert!(check_pairing(&candidate, &reference).is_ok());
    }

    #[test]
    fn test_pairing_rejects_size_mismatch() {
        let err = check_pairing(&paths(&["a.sjson", "b.sjson"]), &paths(&["a.sjson"]))
            .unwrap_err();
        assert!(err.to_string().contains("differ in size"));
    }

    #[test]
    fn test_pairing_rejects_name_mismatch() {
        let err = check_pairing(&paths(&["a.sjson"]), &paths(&["b.sjson"])).unwrap_err();
        assert!(err.to_string().contains("no reference counterpart"));
    }
}
