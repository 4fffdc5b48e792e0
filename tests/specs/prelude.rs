// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for behavioral specs
//!
//! A [`Project`] is a scratch directory; every `tock` invocation runs
//! inside it with the clock pinned, so state carries across calls.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

pub const WEEKLY: &str = "[rotating.api_key]\nrotation_days = 7\n";

pub struct Project {
    dir: TempDir,
    now: Option<String>,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
            now: None,
        }
    }

    /// A project whose `tock.toml` holds `manifest`
    pub fn with_manifest(manifest: &str) -> Self {
        let project = Self::empty();
        project.file("tock.toml", manifest);
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, rel: &str, content: &str) {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.dir.path().join(rel).exists()
    }

    /// Pin the clock for every later invocation
    pub fn at(&mut self, now: &str) -> &mut Self {
        self.now = Some(now.to_string());
        self
    }

    pub fn tock(&self) -> Run {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("tock").unwrap();
        cmd.current_dir(self.dir.path()).env_remove("RUST_LOG");
        if let Some(now) = &self.now {
            cmd.args(["--now", now]);
        }
        Run { cmd }
    }
}

pub struct Run {
    cmd: Command,
}

impl Run {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn passes(mut self) -> Output {
        let output = Output::from(self.cmd.output().unwrap());
        assert!(
            output.success,
            "expected success\nstdout:\n{}\nstderr:\n{}",
            output.stdout, output.stderr
        );
        output
    }

    pub fn fails(mut self) -> Output {
        let output = Output::from(self.cmd.output().unwrap());
        assert!(!output.success, "expected failure\nstdout:\n{}", output.stdout);
        output
    }
}

pub struct Output {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl From<std::process::Output> for Output {
    fn from(out: std::process::Output) -> Self {
        Self {
            success: out.status.success(),
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        }
    }
}

impl Output {
    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout, expected);
        self
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(
            self.stdout.contains(needle),
            "stdout missing {:?}\nstdout:\n{}",
            needle,
            self.stdout
        );
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(
            self.stderr.contains(needle),
            "stderr missing {:?}\nstderr:\n{}",
            needle,
            self.stderr
        );
        self
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).unwrap()
    }
}
