// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! Every failure the binary reports carries:
//! - What went wrong (message)
//! - Why it might have happened (context)
//! - How to fix it (suggestions)

use std::fmt;
use std::path::Path;
use tock_core::{Diagnostic, ErrorKind, ManifestError, ResourceError, ResourceKind};

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct TockError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Original error if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TockError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for TockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for TockError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Common error builders for typical failure scenarios.
impl TockError {
    pub fn manifest_missing(path: &Path) -> Self {
        TockError::new(format!("manifest not found: {}", path.display()))
            .with_suggestion("Create it, declaring resources under [rotating.<name>]")
            .with_suggestion("Point at another file: tock --manifest <path> ...")
    }

    pub fn manifest_invalid(path: &Path, err: ManifestError) -> Self {
        let mut error = TockError::new(format!("invalid manifest {}", path.display()))
            .with_context(err.to_string());
        if let ManifestError::Resource { source, .. } = &err {
            error = error.with_context(Diagnostic::from(source).to_string());
            error = suggest_for(error, source);
        }
        error.with_source(err)
    }

    /// A resource operation failed; nothing was written for it
    pub fn resource(kind: ResourceKind, name: &str, err: ResourceError) -> Self {
        let error = TockError::new(format!("{}.{}: {}", kind, name, err))
            .with_context(Diagnostic::from(&err).to_string())
            .with_context(format!("state for {}.{} was left untouched", kind, name));
        suggest_for(error, &err).with_source(err)
    }

    pub fn state_locked(dir: &Path) -> Self {
        TockError::new(format!("state directory {} is in use", dir.display()))
            .with_context("Another tock process holds the lock")
            .with_suggestion("Wait for the other run to finish and retry")
    }

    pub fn not_found(kind: ResourceKind, name: &str) -> Self {
        TockError::new(format!("{}.{} is not in state", kind, name))
            .with_context("It may have expired or been removed")
            .with_suggestion("List stored resources: tock show")
    }

    pub fn already_managed(kind: ResourceKind, name: &str) -> Self {
        TockError::new(format!("{}.{} is already in state", kind, name))
            .with_suggestion(format!("Remove it first: tock rm {} {}", kind, name))
    }
}

fn suggest_for(error: TockError, err: &ResourceError) -> TockError {
    match err.kind() {
        ErrorKind::AmbiguousSchedule | ErrorKind::MalformedSchedule => error.with_suggestion(
            "Set exactly one of rotation_years, rotation_months, rotation_days, \
             rotation_hours, rotation_minutes, rotation_rfc3339",
        ),
        ErrorKind::MalformedTimestamp => {
            error.with_suggestion("Use an RFC 3339 timestamp such as 2023-07-25T00:00:00Z")
        }
        ErrorKind::MalformedIdentifier => error
            .with_suggestion("Use <rfc3339>,<rotation_rfc3339> for an explicit deadline")
            .with_suggestion(
                "Use <rfc3339>,<years>,<months>,<days>,<hours>,<minutes> for a recurring one",
            ),
        ErrorKind::InconsistentPlan => {
            error.with_suggestion("Run tock plan again and re-apply; the state may have moved")
        }
    }
}
