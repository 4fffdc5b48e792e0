// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rotation schedules and deadline resolution
//!
//! A [`Schedule`] is exactly one of a calendar unit/count pair or an
//! explicit deadline. Hosts describe schedules as a flat record of
//! optional fields ([`ScheduleFields`]); [`ScheduleFields::validate`] is
//! the only way across, so "exactly one variant set" never has to be
//! re-checked downstream.
//!
//! Calendar arithmetic follows chrono: month and year steps clamp to
//! the last valid day of the target month, so 2023-01-31 plus one month
//! is 2023-02-28 and 2024-02-29 plus one year is 2025-02-28. Days are
//! calendar days, hours and minutes are exact durations.

use crate::error::ResourceError;
use crate::timestamp::{format_rfc3339, latest_rfc3339, parse_rfc3339};
use chrono::{DateTime, Days, Months, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarUnit {
    Years,
    Months,
    Days,
    Hours,
    Minutes,
}

impl CalendarUnit {
    /// Units in their positional order
    pub const ALL: [CalendarUnit; 5] = [
        CalendarUnit::Years,
        CalendarUnit::Months,
        CalendarUnit::Days,
        CalendarUnit::Hours,
        CalendarUnit::Minutes,
    ];

    /// Host-facing field name for this unit
    pub fn field(&self) -> &'static str {
        match self {
            CalendarUnit::Years => "rotation_years",
            CalendarUnit::Months => "rotation_months",
            CalendarUnit::Days => "rotation_days",
            CalendarUnit::Hours => "rotation_hours",
            CalendarUnit::Minutes => "rotation_minutes",
        }
    }

    /// Advance `base` by `count` of this unit; negative counts step backwards
    ///
    /// Returns `None` when the result leaves chrono's representable range.
    pub fn advance(&self, base: &DateTime<Utc>, count: i64) -> Option<DateTime<Utc>> {
        match self {
            CalendarUnit::Years => CalendarUnit::Months.advance(base, count.checked_mul(12)?),
            CalendarUnit::Months => {
                let months = Months::new(u32::try_from(count.unsigned_abs()).ok()?);
                if count >= 0 {
                    base.checked_add_months(months)
                } else {
                    base.checked_sub_months(months)
                }
            }
            CalendarUnit::Days => {
                let days = Days::new(count.unsigned_abs());
                if count >= 0 {
                    base.checked_add_days(days)
                } else {
                    base.checked_sub_days(days)
                }
            }
            CalendarUnit::Hours => base.checked_add_signed(TimeDelta::try_hours(count)?),
            CalendarUnit::Minutes => base.checked_add_signed(TimeDelta::try_minutes(count)?),
        }
    }
}

impl fmt::Display for CalendarUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CalendarUnit::Years => "years",
            CalendarUnit::Months => "months",
            CalendarUnit::Days => "days",
            CalendarUnit::Hours => "hours",
            CalendarUnit::Minutes => "minutes",
        };
        write!(f, "{}", s)
    }
}

/// When a rotating resource's deadline falls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schedule {
    /// `count` units after the base instant
    Every { unit: CalendarUnit, count: u32 },
    /// A fixed deadline, independent of the base instant
    At(DateTime<Utc>),
}

impl Schedule {
    /// Build a unit schedule from a host-supplied count
    pub fn every(unit: CalendarUnit, count: i64) -> Result<Self, ResourceError> {
        if count <= 0 {
            return Err(ResourceError::MalformedSchedule(format!(
                "{} must be positive, got {}",
                unit.field(),
                count
            )));
        }
        let too_large = || {
            ResourceError::MalformedSchedule(format!("{} is too large: {}", unit.field(), count))
        };
        let count = u32::try_from(count).map_err(|_| too_large())?;

        // Must resolve from any base a host can supply, including a clock
        // reading taken at commit.
        latest_rfc3339()
            .and_then(|latest| unit.advance(&latest, i64::from(count)))
            .ok_or_else(too_large)?;
        Ok(Schedule::Every { unit, count })
    }

    /// Whether the deadline can be computed without knowing the base instant
    pub fn is_base_independent(&self) -> bool {
        matches!(self, Schedule::At(_))
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schedule::Every { unit, count } => write!(f, "every {} {}", count, unit),
            Schedule::At(deadline) => write!(f, "at {}", format_rfc3339(deadline)),
        }
    }
}

/// Compute the deadline for `schedule` measured from `base`
pub fn resolve(base: &DateTime<Utc>, schedule: &Schedule) -> Result<DateTime<Utc>, ResourceError> {
    match schedule {
        Schedule::At(deadline) => Ok(*deadline),
        Schedule::Every { unit, count } => {
            unit.advance(base, i64::from(*count)).ok_or_else(|| {
                ResourceError::MalformedSchedule(format!(
                    "{} {} after {} is out of range",
                    count,
                    unit,
                    format_rfc3339(base)
                ))
            })
        }
    }
}

/// Flat, host-facing description of a schedule
///
/// Mirrors the configuration surface: every unit is independently
/// optional, so zero and absent stay distinguishable until validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleFields {
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
}

impl ScheduleFields {
    pub fn unit(&self, unit: CalendarUnit) -> Option<i64> {
        match unit {
            CalendarUnit::Years => self.rotation_years,
            CalendarUnit::Months => self.rotation_months,
            CalendarUnit::Days => self.rotation_days,
            CalendarUnit::Hours => self.rotation_hours,
            CalendarUnit::Minutes => self.rotation_minutes,
        }
    }

    pub fn set_unit(&mut self, unit: CalendarUnit, value: Option<i64>) {
        let slot = match unit {
            CalendarUnit::Years => &mut self.rotation_years,
            CalendarUnit::Months => &mut self.rotation_months,
            CalendarUnit::Days => &mut self.rotation_days,
            CalendarUnit::Hours => &mut self.rotation_hours,
            CalendarUnit::Minutes => &mut self.rotation_minutes,
        };
        *slot = value;
    }

    /// Names of every field that carries a value
    pub fn supplied(&self) -> Vec<String> {
        let mut supplied: Vec<String> = CalendarUnit::ALL
            .iter()
            .filter(|unit| self.unit(**unit).is_some())
            .map(|unit| unit.field().to_string())
            .collect();
        if self.rotation_rfc3339.is_some() {
            supplied.push("rotation_rfc3339".to_string());
        }
        supplied
    }

    /// Convert to a [`Schedule`], rejecting anything but exactly one field
    pub fn validate(&self) -> Result<Schedule, ResourceError> {
        let supplied = self.supplied();
        if supplied.len() > 1 {
            return Err(ResourceError::AmbiguousSchedule { supplied });
        }

        if let Some(raw) = &self.rotation_rfc3339 {
            let deadline = parse_rfc3339("rotation_rfc3339", raw).map_err(|_| {
                ResourceError::MalformedSchedule(format!("rotation_rfc3339 {:?} is not RFC 3339", raw))
            })?;
            return Ok(Schedule::At(deadline));
        }

        for unit in CalendarUnit::ALL {
            if let Some(count) = self.unit(unit) {
                return Schedule::every(unit, count);
            }
        }

        Err(ResourceError::MalformedSchedule(
            "one of rotation_years, rotation_months, rotation_days, rotation_hours, \
             rotation_minutes or rotation_rfc3339 must be set"
                .to_string(),
        ))
    }
}

impl From<&Schedule> for ScheduleFields {
    fn from(schedule: &Schedule) -> Self {
        let mut fields = ScheduleFields::default();
        match schedule {
            Schedule::Every { unit, count } => fields.set_unit(*unit, Some(i64::from(*count))),
            Schedule::At(deadline) => fields.rotation_rfc3339 = Some(format_rfc3339(deadline)),
        }
        fields
    }
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
