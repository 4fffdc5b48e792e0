// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types shared by all time resources

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Errors produced while planning, applying or importing a resource
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    #[error("malformed schedule: {0}")]
    MalformedSchedule(String),
    #[error("malformed timestamp in {field}: {value:?} is not RFC 3339")]
    MalformedTimestamp { field: String, value: String },
    #[error("malformed identifier: {field}: {reason}")]
    MalformedIdentifier { field: String, reason: String },
    #[error("ambiguous schedule: only one of {} may be set", .supplied.join(", "))]
    AmbiguousSchedule { supplied: Vec<String> },
    #[error("inconsistent plan: {field} was planned as {planned} but apply produced {applied}")]
    InconsistentPlan {
        field: String,
        planned: String,
        applied: String,
    },
}

impl ResourceError {
    pub(crate) fn malformed_identifier(field: &str, reason: impl Into<String>) -> Self {
        Self::MalformedIdentifier {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Machine-readable category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedSchedule(_) => ErrorKind::MalformedSchedule,
            Self::MalformedTimestamp { .. } => ErrorKind::MalformedTimestamp,
            Self::MalformedIdentifier { .. } => ErrorKind::MalformedIdentifier,
            Self::AmbiguousSchedule { .. } => ErrorKind::AmbiguousSchedule,
            Self::InconsistentPlan { .. } => ErrorKind::InconsistentPlan,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MalformedSchedule,
    MalformedTimestamp,
    MalformedIdentifier,
    AmbiguousSchedule,
    InconsistentPlan,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::MalformedSchedule => "malformed_schedule",
            ErrorKind::MalformedTimestamp => "malformed_timestamp",
            ErrorKind::MalformedIdentifier => "malformed_identifier",
            ErrorKind::AmbiguousSchedule => "ambiguous_schedule",
            ErrorKind::InconsistentPlan => "inconsistent_plan",
        };
        write!(f, "{}", s)
    }
}

/// Structured error handed back across the host boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&ResourceError> for Diagnostic {
    fn from(err: &ResourceError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}
