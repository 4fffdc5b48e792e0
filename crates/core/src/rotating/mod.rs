// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rotating timestamp resource
//!
//! A rotating resource holds one deadline derived from a base instant
//! and a [`Schedule`]. Reads past the deadline report the resource as
//! expired; the host drops it and the next apply creates a fresh one
//! from a new base instant.

mod change;
mod engine;
mod expiry;


pub use change::needs_recompute;
pub use engine::{ReadOutcome, RotatingResource};
pub use expiry::{is_expired, remaining, Lifecycle};

use crate::error::ResourceError;
use crate::id::ImportId;
use crate::plan::{PlanAction, Planned};
use crate::schedule::{resolve, Schedule, ScheduleFields};
use crate::timestamp::{parse_rfc3339, DerivedFields};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Desired state of a rotating resource, as declared by the host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RotatingConfig {
    /// Base instant; defaults to "now" at creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rfc3339: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_years: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_months: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_hours: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_minutes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_rfc3339: Option<String>,
    /// Any change to these forces replacement
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub triggers: BTreeMap<String, String>,
}

impl RotatingConfig {
    pub fn every_days(days: i64) -> Self {
        Self {
            rotation_days: Some(days),
            ..Default::default()
        }
    }

    pub fn with_base(mut self, rfc3339: impl Into<String>) -> Self {
        self.rfc3339 = Some(rfc3339.into());
        self
    }

    pub fn with_trigger(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.triggers.insert(key.into(), value.into());
        self
    }

    pub fn schedule_fields(&self) -> ScheduleFields {
        ScheduleFields {
            rotation_years: self.rotation_years,
            rotation_months: self.rotation_months,
            rotation_days: self.rotation_days,
            rotation_hours: self.rotation_hours,
            rotation_minutes: self.rotation_minutes,
            rotation_rfc3339: self.rotation_rfc3339.clone(),
        }
    }

    /// Check every field without touching any state
    pub fn validate(&self) -> Result<DesiredRotation, ResourceError> {
        let schedule = self.schedule_fields().validate()?;
        let base = self
            .rfc3339
            .as_deref()
            .map(|raw| parse_rfc3339("rfc3339", raw))
            .transpose()?;
        Ok(DesiredRotation {
            base,
            schedule,
            triggers: self.triggers.clone(),
        })
    }
}

/// A validated [`RotatingConfig`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredRotation {
    pub base: Option<DateTime<Utc>>,
    pub schedule: Schedule,
    pub triggers: BTreeMap<String, String>,
}

/// Stored state of a rotating resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotatingEntity {
    pub base: DateTime<Utc>,
    pub schedule: Schedule,
    pub deadline: DateTime<Utc>,
    pub derived: DerivedFields,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub triggers: BTreeMap<String, String>,
}

impl RotatingEntity {
    /// Resolve a fresh entity from its inputs
    pub fn new(
        base: DateTime<Utc>,
        schedule: Schedule,
        triggers: BTreeMap<String, String>,
    ) -> Result<Self, ResourceError> {
        Ok(Self {
            deadline: resolve(&base, &schedule)?,
            derived: DerivedFields::from_instant(&base),
            base,
            schedule,
            triggers,
        })
    }

    /// Rebuild an entity from its external identifier
    ///
    /// Triggers are not part of the identifier and start out empty.
    pub fn from_import(id: &ImportId) -> Result<Self, ResourceError> {
        let schedule = id.schedule_fields().validate()?;
        Self::new(id.base, schedule, BTreeMap::new())
    }

    pub fn import_id(&self) -> ImportId {
        ImportId::from(self)
    }
}

/// Predicted outcome of applying a [`RotatingConfig`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RotationPlan {
    #[serde(flatten)]
    pub action: PlanAction,
    pub base: Planned<DateTime<Utc>>,
    pub schedule: Schedule,
    pub deadline: Planned<DateTime<Utc>>,
    pub derived: Planned<DerivedFields>,
    pub triggers: BTreeMap<String, String>,
}
