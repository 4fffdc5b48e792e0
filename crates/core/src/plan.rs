// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Preview values and the preview/commit consistency guard
//!
//! A preview never guesses. Any field that depends on an input only
//! available at commit time (typically "now") is [`Planned::Unknown`];
//! everything else is [`Planned::Known`] and must match the committed
//! value exactly. A mismatch is [`ResourceError::InconsistentPlan`] and
//! is never reconciled.

use crate::error::ResourceError;
use crate::lifecycle::LifecycleEvent;
use serde::Serialize;
use std::fmt;

/// A value predicted during the preview pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Planned<T> {
    Known(T),
    Unknown,
}

impl<T> Planned<T> {
    pub fn is_known(&self) -> bool {
        matches!(self, Planned::Known(_))
    }

    pub fn known(&self) -> Option<&T> {
        match self {
            Planned::Known(value) => Some(value),
            Planned::Unknown => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Planned<U> {
        match self {
            Planned::Known(value) => Planned::Known(f(value)),
            Planned::Unknown => Planned::Unknown,
        }
    }

    /// Chain a fallible computation on a known value
    pub fn and_then<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<Planned<U>, E> {
        match self {
            Planned::Known(value) => f(value).map(Planned::Known),
            Planned::Unknown => Ok(Planned::Unknown),
        }
    }
}

impl<T: PartialEq + fmt::Debug> Planned<T> {
    /// Check a committed value against this prediction
    pub fn verify(&self, field: &str, applied: &T) -> Result<(), ResourceError> {
        match self {
            Planned::Known(planned) if planned != applied => {
                tracing::error!(field, ?planned, ?applied, "apply diverged from plan");
                Err(ResourceError::InconsistentPlan {
                    field: field.to_string(),
                    planned: format!("{:?}", planned),
                    applied: format!("{:?}", applied),
                })
            }
            _ => Ok(()),
        }
    }
}

impl<T> From<Option<T>> for Planned<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Planned::Unknown, Planned::Known)
    }
}

/// Placeholder rendered for values not known until apply
pub const UNKNOWN_VALUE: &str = "(known after apply)";

impl<T: fmt::Display> fmt::Display for Planned<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Planned::Known(value) => write!(f, "{}", value),
            Planned::Unknown => write!(f, "{}", UNKNOWN_VALUE),
        }
    }
}

/// What applying a plan will do to stored state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum PlanAction {
    /// No stored state yet
    Create,
    /// Stored state is modified in place
    Update,
    /// Stored state is discarded and created afresh
    Replace { reason: String },
    /// Stored state already matches
    NoOp,
}

impl PlanAction {
    pub fn changes_state(&self) -> bool {
        !matches!(self, PlanAction::NoOp)
    }
}

impl fmt::Display for PlanAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanAction::Create => write!(f, "create"),
            PlanAction::Update => write!(f, "update"),
            PlanAction::Replace { reason } => write!(f, "replace ({})", reason),
            PlanAction::NoOp => write!(f, "no-op"),
        }
    }
}

/// Result of committing a plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied<T> {
    pub entity: T,
    /// `None` when nothing changed
    pub event: Option<LifecycleEvent>,
}

impl PlanAction {
    /// Check that commit decided on the same action as the preview
    pub fn verify(&self, applied: &PlanAction) -> Result<(), ResourceError> {
        if self == applied {
            return Ok(());
        }
        tracing::error!(planned = %self, applied = %applied, "apply chose a different action");
        Err(ResourceError::InconsistentPlan {
            field: "action".to_string(),
            planned: self.to_string(),
            applied: applied.to_string(),
        })
    }

    /// Lifecycle event recorded when this action is applied
    pub fn event(&self) -> Option<LifecycleEvent> {
        match self {
            PlanAction::Create => Some(LifecycleEvent::Created),
            PlanAction::Update => Some(LifecycleEvent::Updated),
            PlanAction::Replace { reason } => Some(LifecycleEvent::Replaced {
                reason: reason.clone(),
            }),
            PlanAction::NoOp => None,
        }
    }
}
