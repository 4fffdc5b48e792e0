// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON file-based state store

use fs2::FileExt;
use serde::{de::DeserializeOwned, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tock_core::ResourceKind;

const LOCK_FILE: &str = "tock.lock";
const JOURNAL_FILE: &str = "journal.jsonl";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("state directory {0} is locked by another process")]
    Locked(PathBuf),
}

/// Exclusive hold on a state directory; released on drop
#[derive(Debug)]
pub struct StoreLock {
    file: File,
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!(error = %e, "failed to release state lock");
        }
    }
}

/// Resource state kept as `<root>/<kind>/<name>.json`
#[derive(Debug, Clone)]
pub struct StateStore {
    root: PathBuf,
}

impl StateStore {
    /// Open a store at the given path, creating it if needed
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn journal_path(&self) -> PathBuf {
        self.root.join(JOURNAL_FILE)
    }

    /// Take the directory's exclusive lock without waiting
    pub fn lock(&self) -> Result<StoreLock, StoreError> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.root.join(LOCK_FILE))?;
        file.try_lock_exclusive()
            .map_err(|_| StoreError::Locked(self.root.clone()))?;
        Ok(StoreLock { file })
    }

    /// Write a value, replacing any previous one atomically
    pub fn save<T: Serialize>(
        &self,
        kind: ResourceKind,
        name: &str,
        value: &T,
    ) -> Result<(), StoreError> {
        let path = self.path_for(kind, name);
        fs::create_dir_all(self.root.join(kind.as_str()))?;
        let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        tracing::debug!(%kind, name, "saved state");
        Ok(())
    }

    /// Read a value; `None` when nothing is stored
    pub fn load<T: DeserializeOwned>(
        &self,
        kind: ResourceKind,
        name: &str,
    ) -> Result<Option<T>, StoreError> {
        let path = self.path_for(kind, name);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&json)
            .map(Some)
            .map_err(|source| StoreError::Json { path, source })
    }

    /// Remove a value; returns whether anything was stored
    pub fn delete(&self, kind: ResourceKind, name: &str) -> Result<bool, StoreError> {
        match fs::remove_file(self.path_for(kind, name)) {
            Ok(()) => {
                tracing::debug!(%kind, name, "deleted state");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Names stored under `kind`, sorted
    pub fn list(&self, kind: ResourceKind) -> Result<Vec<String>, StoreError> {
        let dir = self.root.join(kind.as_str());
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|e| e == "json") {
                if let Some(stem) = path.file_stem() {
                    names.push(stem.to_string_lossy().to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn exists(&self, kind: ResourceKind, name: &str) -> bool {
        self.path_for(kind, name).exists()
    }

    fn path_for(&self, kind: ResourceKind, name: &str) -> PathBuf {
        self.root.join(kind.as_str()).join(format!("{}.json", name))
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
