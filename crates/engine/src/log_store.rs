// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! External log store for job activity.
//!
//! A store is a range of rows starting at [`LogRange::start_row`]. Jobs
//! remember how many rows they have already written in `offset`; each flush
//! writes the tree's pending log lines after that point and clears them
//! locally.

use aj_core::Job;
use parking_lot::Mutex;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogStoreError {
    #[error("log store io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where rows land: a named sheet and its first row (1-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRange {
    pub sheet: String,
    pub start_row: u64,
}

impl LogRange {
    pub fn new(sheet: impl Into<String>, start_row: u64) -> Self {
        Self { sheet: sheet.into(), start_row: start_row.max(1) }
    }

    /// Range from `AJ_LOG_SHEET` / `AJ_LOG_START_ROW`.
    pub fn from_env() -> Self {
        Self::new(crate::env::log_sheet(), crate::env::log_start_row())
    }
}

impl Default for LogRange {
    fn default() -> Self {
        Self::new("Logs", 1)
    }
}

/// Row sink for job logs.
pub trait LogStore: Send + Sync {
    /// Remove every row in the range.
    fn clear(&self) -> Result<(), LogStoreError>;

    /// Write `rows` starting `offset` rows into the range, overwriting
    /// whatever is there.
    fn write(&self, offset: u64, rows: &[String]) -> Result<(), LogStoreError>;
}

/// Flush the pending logs of `job`'s tree at `job.offset`.
///
/// Advances the offset by the number of rows written and clears the tree's
/// logs. A tree with no pending lines does not touch the store.
pub fn write_logs(job: &mut Job, store: &dyn LogStore) -> Result<usize, LogStoreError> {
    let rows: Vec<String> =
        job.flatten_logs().into_iter().map(|(job_id, entry)| entry.to_row(job_id)).collect();
    if rows.is_empty() {
        return Ok(0);
    }

    store.write(job.offset, &rows)?;
    job.offset += rows.len() as u64;
    job.clear_logs();
    tracing::debug!(job_id = job.id, rows = rows.len(), offset = job.offset, "flushed job logs");
    Ok(rows.len())
}

/// Set `offset` to 0 on every job in the tree.
pub fn rewind_offsets(job: &mut Job) {
    job.offset = 0;
    for child in job.jobs_mut() {
        rewind_offsets(child);
    }
}

// ── In-memory store ─────────────────────────────────────────────────────

#[derive(Default)]
struct MemoryState {
    rows: Vec<String>,
    writes: usize,
}

/// Store kept in process memory; clones share rows.
#[derive(Clone, Default)]
pub struct MemoryLogStore {
    inner: Arc<Mutex<MemoryState>>,
}

impl MemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> Vec<String> {
        self.inner.lock().rows.clone()
    }

    /// Number of `write` calls seen so far.
    pub fn write_count(&self) -> usize {
        self.inner.lock().writes
    }
}

impl LogStore for MemoryLogStore {
    fn clear(&self) -> Result<(), LogStoreError> {
        self.inner.lock().rows.clear();
        Ok(())
    }

    fn write(&self, offset: u64, rows: &[String]) -> Result<(), LogStoreError> {
        let mut state = self.inner.lock();
        splice(&mut state.rows, offset as usize, rows);
        state.writes += 1;
        Ok(())
    }
}

// ── File store ──────────────────────────────────────────────────────────

/// Store backed by `<dir>/<sheet>.log`, one line per row.
///
/// Rows before `start_row` belong to whoever else writes the file and are
/// never touched.
pub struct FileLogStore {
    path: PathBuf,
    start_row: u64,
    lock: Mutex<()>,
}

impl FileLogStore {
    pub fn new(dir: &Path, range: &LogRange) -> Self {
        Self {
            path: dir.join(format!("{}.log", range.sheet)),
            start_row: range.start_row.max(1),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> LogStoreError {
        LogStoreError::Io { path: self.path.clone(), source }
    }

    fn read_lines(&self) -> Result<Vec<String>, LogStoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_err(e)),
        };
        BufReader::new(file).lines().collect::<Result<Vec<_>, _>>().map_err(|e| self.io_err(e))
    }

    fn write_lines(&self, lines: &[String]) -> Result<(), LogStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }
        let mut file = File::create(&self.path).map_err(|e| self.io_err(e))?;
        for line in lines {
            writeln!(file, "{}", line).map_err(|e| self.io_err(e))?;
        }
        Ok(())
    }

    fn first_index(&self) -> usize {
        (self.start_row - 1) as usize
    }
}

impl LogStore for FileLogStore {
    fn clear(&self) -> Result<(), LogStoreError> {
        let _guard = self.lock.lock();
        let mut lines = self.read_lines()?;
        lines.truncate(self.first_index());
        self.write_lines(&lines)
    }

    fn write(&self, offset: u64, rows: &[String]) -> Result<(), LogStoreError> {
        let _guard = self.lock.lock();
        let mut lines = self.read_lines()?;
        splice(&mut lines, self.first_index() + offset as usize, rows);
        self.write_lines(&lines)?;
        tracing::debug!(path = %self.path.display(), offset, rows = rows.len(), "wrote log rows");
        Ok(())
    }
}

/// Overwrite `lines[at..]` with `rows`, padding with empty lines up to `at`.
fn splice(lines: &mut Vec<String>, at: usize, rows: &[String]) {
    if lines.len() < at {
        lines.resize(at, String::new());
    }
    for (i, row) in rows.iter().enumerate() {
        match lines.get_mut(at + i) {
            Some(line) => line.clone_from(row),
            None => lines.push(row.clone()),
        }
    }
}

#[cfg(test)]
#[path = "log_store_tests.rs"]
mod tests;
