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

//! A stderr progress bar for the parsing phase.

use std::io::{self, Write};

const BAR_WIDTH: usize = 40;

/// Renders `label [████----] 50% (2 / 4)` on one stderr line, redrawing in
/// place and terminating the line once the last file is counted.
pub struct ProgressBar {
    label: String,
}

impl ProgressBar {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// Redraw the bar for `current` out of `total` finished files.
    pub fn update(&self, current: usize, total: usize) {
        let fraction = if total == 0 {
            1.0
        } else {
            current as f64 / total as f64
        };
        let filled = (fraction * BAR_WIDTH as f64).round() as usize;
        let bar: String = "█".repeat(filled) + &"-".repeat(BAR_WIDTH - filled);
        eprint!(
            "\r{} [{}] {:3.0}% ({} / {})",
            self.label,
            bar,
            fraction * 100.0,
            current,
            total
        );
        let _ = io::stderr().flush();
        if current >= total {
            eprintln!();
        }
    }

    /// Print a diagnostic line without corrupting the bar. The next
    /// `update` call redraws it.
    pub fn note(&self, message: &str) {
        eprint!("\r{:width$}\r", "", width = self.label.len() + BAR_WIDTH + 20);
        eprintln!("{}", message);
    }
}
