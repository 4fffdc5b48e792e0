// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle events observed by the host

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of time resource a host can manage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Rotating,
    Offset,
    Static,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Rotating,
        ResourceKind::Offset,
        ResourceKind::Static,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Rotating => "rotating",
            ResourceKind::Offset => "offset",
            ResourceKind::Static => "static",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rotating" => Ok(ResourceKind::Rotating),
            "offset" => Ok(ResourceKind::Offset),
            "static" => Ok(ResourceKind::Static),
            _ => Err(format!("unknown resource kind: {}", s)),
        }
    }
}

/// A change to a resource's stored state
///
/// Expiry is followed by `Created` on the next apply, never by `Updated`:
/// an expired resource is gone, and its successor is a new instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum LifecycleEvent {
    Created,
    Updated,
    Replaced { reason: String },
    Expired { deadline: String },
    Imported,
    Deleted,
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleEvent::Created => write!(f, "created"),
            LifecycleEvent::Updated => write!(f, "updated"),
            LifecycleEvent::Replaced { reason } => write!(f, "replaced ({})", reason),
            LifecycleEvent::Expired { deadline } => write!(f, "expired (deadline {})", deadline),
            LifecycleEvent::Imported => write!(f, "imported"),
            LifecycleEvent::Deleted => write!(f, "deleted"),
        }
    }
}
