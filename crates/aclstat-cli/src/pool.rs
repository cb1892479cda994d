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

//! The parallel stat-file parsing pool.
//!
//! The file list is seeded into a shared FIFO queue up front, so an empty
//! queue is the termination condition. Each worker parses files into a
//! private [`Harvest`] and sends exactly one `Done` event before exiting;
//! the coordinator drains events until it has seen one per worker.

use aclstat_core::{sjson, DecodedFile, Harvest, StatError, StatResult};
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::Mutex;
use std::thread;

enum PoolEvent {
    /// One file finished, parsed or skipped. `skipped` carries the reason
    /// when the file contributed no record.
    Progress {
        path: PathBuf,
        skipped: Option<String>,
    },
    /// A worker exhausted the queue; its harvest follows.
    Done(Harvest),
}

/// Parse `files` on `num_threads` workers and return the combined harvest.
///
/// `on_progress` runs on the coordinator thread once per finished file with
/// `(finished_count, total, path, skip_reason)`. Setting `cancel` makes the
/// workers stop taking new files; the partial harvest is still returned so
/// the caller can decide what to do with it.
pub fn parse_files<F>(
    files: Vec<PathBuf>,
    num_threads: usize,
    keep_frame_errors: bool,
    cancel: &AtomicBool,
    mut on_progress: F,
) -> Harvest
where
    F: FnMut(usize, usize, &Path, Option<&str>),
{
    let total = files.len();
    let num_threads = num_threads.max(1).min(total.max(1));
    let queue = Mutex::new(VecDeque::from(files));
    let (tx, rx) = mpsc::channel();

    thread::scope(|scope| {
        let queue = &queue;
        for _ in 0..num_threads {
            let tx = tx.clone();
            scope.spawn(move || worker(queue, cancel, keep_frame_errors, tx));
        }
        drop(tx);

        let mut combined = Harvest::new();
        let mut finished_workers = 0;
        let mut finished_files = 0;
        while finished_workers < num_threads {
            match rx.recv() {
                Ok(PoolEvent::Progress { path, skipped }) => {
                    finished_files += 1;
                    on_progress(finished_files, total, &path, skipped.as_deref());
                }
                Ok(PoolEvent::Done(harvest)) => {
                    finished_workers += 1;
                    combined.merge(harvest);
                }
                Err(_) => break,
            }
        }
        combined
    })
}

fn worker(
    queue: &Mutex<VecDeque<PathBuf>>,
    cancel: &AtomicBool,
    keep_frame_errors: bool,
    tx: Sender<PoolEvent>,
) {
    let mut harvest = Harvest::new();
    loop {
        if cancel.load(Ordering::Relaxed) {
            break;
        }
        let next = match queue.lock() {
            Ok(mut queue) => queue.pop_front(),
            Err(_) => break,
        };
        let Some(path) = next else {
            break;
        };
        let skipped = match parse_one(&path, keep_frame_errors, &mut harvest) {
            Ok(None) => None,
            Ok(Some(reason)) => Some(reason),
            Err(err) => Some(err.to_string()),
        };
        if tx.send(PoolEvent::Progress { path, skipped }).is_err() {
            break;
        }
    }
    let _ = tx.send(PoolEvent::Done(harvest));
}

/// Parse one file into the harvest. `Ok(Some(reason))` is a skip.
fn parse_one(
    path: &Path,
    keep_frame_errors: bool,
    harvest: &mut Harvest,
) -> StatResult<Option<String>> {
    let text = fs::read_to_string(path).map_err(|err| StatError::io(err.to_string()))?;
    let doc = sjson::parse(&text)?;
    match aclstat_core::decode_record(&doc, path)? {
        DecodedFile::Record(record) => {
            harvest.absorb(*record, keep_frame_errors);
            Ok(None)
        }
        DecodedFile::ProducerError(message) => Ok(Some(message)),
    }
}
