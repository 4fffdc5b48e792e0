// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test utilities for CLI integration tests.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

/// A scratch directory holding a manifest and state
pub struct TestEnv {
    pub dir: TempDir,
}

impl TestEnv {
    pub fn new(manifest: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(dir.path().join("tock.toml"), manifest).expect("Failed to write manifest");
        Self { dir }
    }

    /// `tock` run inside the scratch directory with the clock pinned
    pub fn tock_at(&self, now: &str) -> Command {
        let mut cmd = Command::cargo_bin("tock").expect("tock binary");
        cmd.current_dir(self.dir.path()).args(["--now", now]);
        cmd
    }

    pub fn write_manifest(&self, manifest: &str) {
        fs::write(self.dir.path().join("tock.toml"), manifest).expect("Failed to write manifest");
    }

    pub fn state_file(&self, kind: &str, name: &str) -> std::path::PathBuf {
        self.dir.path().join(".tock").join(kind).join(format!("{}.json", name))
    }
}

pub const WEEKLY: &str = r#"
[rotating.api_key]
rotation_days = 7
"#;
