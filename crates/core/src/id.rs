// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! External identifiers for rotating resources
//!
//! An identifier is a comma-separated positional string. It takes one of
//! two shapes:
//!
//! ```text
//! <base>,<deadline>                         explicit deadline
//! <base>,<years>,<months>,<days>,<hours>,<minutes>   calendar units
//! ```
//!
//! Empty unit positions mean "not set", which is distinct from `0`.

use crate::error::ResourceError;
use crate::rotating::RotatingEntity;
use crate::schedule::{CalendarUnit, Schedule, ScheduleFields};
use crate::timestamp::{format_rfc3339, parse_rfc3339};
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

const EXPLICIT_FIELDS: usize = 2;
const UNIT_FIELDS: usize = 1 + CalendarUnit::ALL.len();

/// Schedule portion of an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdSchedule {
    Deadline(DateTime<Utc>),
    /// Counts in [`CalendarUnit::ALL`] order
    Units([Option<i64>; 5]),
}

/// Decoded identifier of a rotating resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportId {
    pub base: DateTime<Utc>,
    pub schedule: IdSchedule,
}

impl ImportId {
    /// Count stored for `unit`; `None` when the position is empty
    pub fn unit(&self, unit: CalendarUnit) -> Option<i64> {
        match &self.schedule {
            IdSchedule::Units(counts) => counts[unit_index(unit)],
            IdSchedule::Deadline(_) => None,
        }
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        match self.schedule {
            IdSchedule::Deadline(deadline) => Some(deadline),
            IdSchedule::Units(_) => None,
        }
    }

    /// The flat schedule description, not yet validated
    pub fn schedule_fields(&self) -> ScheduleFields {
        let mut fields = ScheduleFields::default();
        match &self.schedule {
            IdSchedule::Deadline(deadline) => {
                fields.rotation_rfc3339 = Some(format_rfc3339(deadline));
            }
            IdSchedule::Units(counts) => {
                for (unit, count) in CalendarUnit::ALL.iter().zip(counts) {
                    fields.set_unit(*unit, *count);
                }
            }
        }
        fields
    }

    pub fn encode(&self) -> String {
        self.to_string()
    }

    pub fn decode(s: &str) -> Result<Self, ResourceError> {
        s.parse()
    }
}

fn unit_index(unit: CalendarUnit) -> usize {
    CalendarUnit::ALL
        .iter()
        .position(|u| *u == unit)
        .unwrap_or_default()
}

impl From<&RotatingEntity> for ImportId {
    fn from(entity: &RotatingEntity) -> Self {
        let schedule = match entity.schedule {
            Schedule::At(deadline) => IdSchedule::Deadline(deadline),
            Schedule::Every { unit, count } => {
                let mut counts = [None; 5];
                counts[unit_index(unit)] = Some(i64::from(count));
                IdSchedule::Units(counts)
            }
        };
        Self {
            base: entity.base,
            schedule,
        }
    }
}

impl fmt::Display for ImportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_rfc3339(&self.base))?;
        match &self.schedule {
            IdSchedule::Deadline(deadline) => write!(f, ",{}", format_rfc3339(deadline)),
            IdSchedule::Units(counts) => {
                for count in counts {
                    match count {
                        Some(n) => write!(f, ",{}", n)?,
                        None => write!(f, ",")?,
                    }
                }
                Ok(())
            }
        }
    }
}

impl FromStr for ImportId {
    type Err = ResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != EXPLICIT_FIELDS && parts.len() != UNIT_FIELDS {
            return Err(ResourceError::malformed_identifier(
                "identifier",
                format!(
                    "expected {} or {} comma-separated fields, found {}",
                    EXPLICIT_FIELDS,
                    UNIT_FIELDS,
                    parts.len()
                ),
            ));
        }

        let base = parse_rfc3339("rfc3339", parts[0]).map_err(|_| {
            ResourceError::malformed_identifier(
                "rfc3339",
                format!("{:?} is not an RFC 3339 timestamp", parts[0]),
            )
        })?;

        if parts.len() == EXPLICIT_FIELDS {
            let raw = parts[1];
            if raw.is_empty() {
                return Err(ResourceError::malformed_identifier(
                    "rotation_rfc3339",
                    "must not be empty",
                ));
            }
            let deadline = parse_rfc3339("rotation_rfc3339", raw).map_err(|_| {
                ResourceError::malformed_identifier(
                    "rotation_rfc3339",
                    format!("{:?} is not an RFC 3339 timestamp", raw),
                )
            })?;
            return Ok(Self {
                base,
                schedule: IdSchedule::Deadline(deadline),
            });
        }

        let mut counts = [None; 5];
        for (slot, (unit, raw)) in counts
            .iter_mut()
            .zip(CalendarUnit::ALL.iter().zip(&parts[1..]))
        {
            if raw.is_empty() {
                continue;
            }
            let n = raw.parse::<i64>().map_err(|_| {
                ResourceError::malformed_identifier(
                    unit.field(),
                    format!("{:?} is not an integer", raw),
                )
            })?;
            *slot = Some(n);
        }

        if counts.iter().all(Option::is_none) {
            return Err(ResourceError::malformed_identifier(
                "schedule",
                "at least one of years, months, days, hours or minutes must be set",
            ));
        }

        Ok(Self {
            base,
            schedule: IdSchedule::Units(counts),
        })
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
