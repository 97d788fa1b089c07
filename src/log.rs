// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Append-only ledger file.
//!
//! The canonical durability layer:
//! - records are written to disk BEFORE the projection observes them
//! - every append is fsync'd before it returns
//! - no truncation or rewriting, ever
//!
//! One encoded record per line. The log assumes a single writer; the
//! transaction processor serializes appends.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EventLogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EventLogError>;

pub struct EventLog {
    path: PathBuf,
    file: BufWriter<File>,
    record_count: u64,
}

impl EventLog {
    /// Open or create the ledger file, creating missing parent
    /// directories. Existing records are counted so append positions
    /// continue the sequence.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                tracing::info!("Ledger folder not found, creating {:?}", parent);
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .read(true)
            .open(&path)?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        let record_count = contents.lines().count() as u64;

        Ok(Self {
            path,
            file: BufWriter::new(file),
            record_count,
        })
    }

    /// Durably append one encoded record and return its 0-based position.
    ///
    /// Only returns Ok after the write has reached stable storage; a
    /// record that cannot be confirmed durable must never be applied to
    /// the projection.
    pub fn append(&mut self, line: &str) -> Result<u64> {
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        self.file.flush()?;
        self.file.get_ref().sync_all()?;

        let position = self.record_count;
        self.record_count += 1;
        Ok(position)
    }

    /// Every line written so far, in write order. The file's final `\n`
    /// yields a trailing empty element; see [`strip_trailing_empty`].
    ///
    /// Reads go through a fresh read-only handle so callers holding only
    /// a shared reference can query history.
    pub fn read_lines(&self) -> Result<Vec<String>> {
        let mut contents = String::new();
        File::open(&self.path)?.read_to_string(&mut contents)?;
        Ok(contents.split('\n').map(str::to_owned).collect())
    }

    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Drop the empty element produced by the file's trailing newline.
pub fn strip_trailing_empty(lines: &[String]) -> &[String] {
    match lines.last() {
        Some(last) if last.is_empty() => &lines[..lines.len() - 1],
        _ => lines,
    }
}
