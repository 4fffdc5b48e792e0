// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Offset timestamp resource
//!
//! Holds a base instant and the instant reached by stepping away from it
//! by signed calendar offsets. When several units are given they
//! accumulate in a fixed order: years, months, days, hours, minutes,
//! seconds, each step applied to the result of the previous one. Any
//! change replaces the resource.

use crate::clock::Clock;
use crate::error::ResourceError;
use crate::plan::{Applied, PlanAction, Planned};
use crate::schedule::CalendarUnit;
use crate::timestamp::{
    earliest_rfc3339, format_rfc3339, latest_rfc3339, parse_rfc3339, whole_seconds,
    DerivedFields,
};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Signed offsets, each optional
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offsets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub months: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds: Option<i64>,
}

impl Offsets {
    fn is_empty(&self) -> bool {
        *self == Offsets::default()
    }

    /// Step `base` through every set offset, in accumulation order
    pub fn apply_to(&self, base: &DateTime<Utc>) -> Result<DateTime<Utc>, ResourceError> {
        let out_of_range = || {
            ResourceError::MalformedSchedule(format!(
                "offset from {} is out of range",
                format_rfc3339(base)
            ))
        };

        let steps = [
            (CalendarUnit::Years, self.years),
            (CalendarUnit::Months, self.months),
            (CalendarUnit::Days, self.days),
            (CalendarUnit::Hours, self.hours),
            (CalendarUnit::Minutes, self.minutes),
        ];
        let mut result = *base;
        for (unit, count) in steps {
            if let Some(count) = count {
                result = unit.advance(&result, count).ok_or_else(out_of_range)?;
            }
        }
        if let Some(seconds) = self.seconds {
            result = TimeDelta::try_seconds(seconds)
                .and_then(|delta| result.checked_add_signed(delta))
                .ok_or_else(out_of_range)?;
        }
        Ok(result)
    }
}

/// Desired state of an offset resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OffsetConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rfc3339: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_years: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_months: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_hours: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_minutes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_seconds: Option<i64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub triggers: BTreeMap<String, String>,
}

impl OffsetConfig {
    pub fn offsets(&self) -> Offsets {
        Offsets {
            years: self.offset_years,
            months: self.offset_months,
            days: self.offset_days,
            hours: self.offset_hours,
            minutes: self.offset_minutes,
            seconds: self.offset_seconds,
        }
    }

    pub fn validate(&self) -> Result<DesiredOffset, ResourceError> {
        let offsets = self.offsets();
        if offsets.is_empty() {
            return Err(ResourceError::MalformedSchedule(
                "one of offset_years, offset_months, offset_days, offset_hours, \
                 offset_minutes or offset_seconds must be set"
                    .to_string(),
            ));
        }
        let base = self
            .rfc3339
            .as_deref()
            .map(|raw| parse_rfc3339("rfc3339", raw))
            .transpose()?;
        match &base {
            Some(base) => {
                offsets.apply_to(base)?;
            }
            // A defaulted base is read from the clock at commit time, so
            // the offsets must stay in range from any expressible base.
            None => {
                for edge in [earliest_rfc3339(), latest_rfc3339()].into_iter().flatten() {
                    offsets.apply_to(&edge)?;
                }
            }
        }
        Ok(DesiredOffset {
            base,
            offsets,
            triggers: self.triggers.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredOffset {
    pub base: Option<DateTime<Utc>>,
    pub offsets: Offsets,
    pub triggers: BTreeMap<String, String>,
}

/// Stored state of an offset resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetEntity {
    pub base: DateTime<Utc>,
    pub offsets: Offsets,
    pub result: DateTime<Utc>,
    /// Calendar components of `result`
    pub derived: DerivedFields,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub triggers: BTreeMap<String, String>,
}

impl OffsetEntity {
    pub fn new(
        base: DateTime<Utc>,
        offsets: Offsets,
        triggers: BTreeMap<String, String>,
    ) -> Result<Self, ResourceError> {
        let result = offsets.apply_to(&base)?;
        Ok(Self {
            base,
            offsets,
            result,
            derived: DerivedFields::from_instant(&result),
            triggers,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OffsetPlan {
    #[serde(flatten)]
    pub action: PlanAction,
    pub base: Planned<DateTime<Utc>>,
    pub offsets: Offsets,
    pub result: Planned<DateTime<Utc>>,
    pub derived: Planned<DerivedFields>,
}

/// Drives offset resources against an injected clock
#[derive(Debug, Clone)]
pub struct OffsetResource<C: Clock> {
    clock: C,
}

impl<C: Clock> OffsetResource<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn plan(
        &self,
        prior: Option<&OffsetEntity>,
        config: &OffsetConfig,
    ) -> Result<OffsetPlan, ResourceError> {
        let desired = config.validate()?;
        let (action, base) = decide(prior, &desired);
        let base = Planned::from(base);
        let result = base.and_then(|b| desired.offsets.apply_to(&b))?;
        Ok(OffsetPlan {
            action,
            base,
            offsets: desired.offsets,
            derived: result.map(|r| DerivedFields::from_instant(&r)),
            result,
        })
    }

    pub fn apply(
        &self,
        prior: Option<&OffsetEntity>,
        config: &OffsetConfig,
        plan: &OffsetPlan,
    ) -> Result<Applied<OffsetEntity>, ResourceError> {
        let desired = config.validate()?;
        let (action, base) = decide(prior, &desired);
        plan.action.verify(&action)?;

        let entity = match (&action, prior) {
            (PlanAction::NoOp, Some(prior)) => prior.clone(),
            _ => {
                let base = base.unwrap_or_else(|| whole_seconds(self.clock.now()));
                OffsetEntity::new(base, desired.offsets, desired.triggers)?
            }
        };

        plan.base.verify("rfc3339", &entity.base)?;
        Planned::Known(plan.offsets).verify("offsets", &entity.offsets)?;
        plan.result.verify("result", &entity.result)?;
        plan.derived.verify("derived", &entity.derived)?;

        Ok(Applied {
            entity,
            event: action.event(),
        })
    }
}

fn decide(
    prior: Option<&OffsetEntity>,
    desired: &DesiredOffset,
) -> (PlanAction, Option<DateTime<Utc>>) {
    let Some(prior) = prior else {
        return (PlanAction::Create, desired.base);
    };
    let reason = match desired.base {
        Some(base) if base != prior.base => Some("rfc3339 changed"),
        _ if desired.offsets != prior.offsets => Some("offsets changed"),
        _ if desired.triggers != prior.triggers => Some("triggers changed"),
        _ => None,
    };
    match reason {
        Some(reason) => (
            PlanAction::Replace {
                reason: reason.to_string(),
            },
            desired.base,
        ),
        None => (PlanAction::NoOp, Some(prior.base)),
    }
}

#[cfg(test)]
#[path = "offset_tests.rs"]
mod tests;
