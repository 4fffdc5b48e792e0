// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only journal of lifecycle events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use thiserror::Error;
use tock_core::{LifecycleEvent, ResourceKind};

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error on line {line}: {source}")]
    Json {
        line: usize,
        source: serde_json::Error,
    },
}

/// One recorded event, stored as a single JSON line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub seq: u64,
    pub at: DateTime<Utc>,
    pub kind: ResourceKind,
    pub name: String,
    #[serde(flatten)]
    pub event: LifecycleEvent,
}

pub struct Journal {
    file: File,
    sequence: u64,
}

impl Journal {
    /// Open or create a journal; numbering continues from existing entries
    pub fn open(path: &Path) -> Result<Self, JournalError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .read(true)
            .open(path)?;

        let reader = BufReader::new(File::open(path)?);
        let mut sequence = 0;
        for line in reader.lines() {
            if !line?.trim().is_empty() {
                sequence += 1;
            }
        }

        Ok(Self { file, sequence })
    }

    /// Record an event and flush it to disk
    pub fn append(
        &mut self,
        at: DateTime<Utc>,
        kind: ResourceKind,
        name: &str,
        event: LifecycleEvent,
    ) -> Result<u64, JournalError> {
        let entry = JournalEntry {
            seq: self.sequence + 1,
            at,
            kind,
            name: name.to_string(),
            event,
        };
        let line = serde_json::to_string(&entry).map_err(|source| JournalError::Json {
            line: entry.seq as usize,
            source,
        })?;
        writeln!(self.file, "{}", line)?;
        self.file.sync_all()?;
        self.sequence = entry.seq;
        tracing::info!(seq = entry.seq, %kind, name, event = %entry.event, "journaled");
        Ok(self.sequence)
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Read every entry in order; a missing journal is empty
    pub fn replay(path: &Path) -> Result<Vec<JournalEntry>, JournalError> {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        for (i, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let entry = serde_json::from_str(&line)
                .map_err(|source| JournalError::Json { line: i + 1, source })?;
            entries.push(entry);
        }

        Ok(entries)
    }
}

#[cfg(test)]
#[path = "journal_tests.rs"]
mod tests;
