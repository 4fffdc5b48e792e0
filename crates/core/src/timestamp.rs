// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! RFC 3339 parsing and the calendar decomposition shared by every resource

use crate::error::ResourceError;
use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, SubsecRound, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Parse an RFC 3339 timestamp, normalizing any offset to UTC
pub fn parse_rfc3339(field: &str, value: &str) -> Result<DateTime<Utc>, ResourceError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| ResourceError::MalformedTimestamp {
            field: field.to_string(),
            value: value.to_string(),
        })
}

/// Render a UTC instant as RFC 3339 with a `Z` suffix
///
/// Fractional seconds appear only when the instant carries them, so
/// `parse_rfc3339(format_rfc3339(t)) == t`.
pub fn format_rfc3339(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Clock readings are stored at whole-second precision
pub(crate) fn whole_seconds(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.trunc_subsecs(0)
}

/// Earliest instant a four-digit RFC 3339 year can express
pub(crate) fn earliest_rfc3339() -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(0, 1, 1)?
        .and_hms_opt(0, 0, 0)
        .map(|t| t.and_utc())
}

/// Latest instant a four-digit RFC 3339 year can express
///
/// Every base a host can supply, parsed or read from the clock, lies
/// between this and [`earliest_rfc3339`].
pub(crate) fn latest_rfc3339() -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(9999, 12, 31)?
        .and_hms_opt(23, 59, 59)
        .map(|t| t.and_utc())
}

/// Calendar components of an instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedFields {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub unix: i64,
}

impl DerivedFields {
    pub fn from_instant(instant: &DateTime<Utc>) -> Self {
        Self {
            year: instant.year(),
            month: instant.month(),
            day: instant.day(),
            hour: instant.hour(),
            minute: instant.minute(),
            second: instant.second(),
            unix: instant.timestamp(),
        }
    }

    /// Named values, in display order
    pub fn entries(&self) -> [(&'static str, i64); 7] {
        [
            ("year", i64::from(self.year)),
            ("month", i64::from(self.month)),
            ("day", i64::from(self.day)),
            ("hour", i64::from(self.hour)),
            ("minute", i64::from(self.minute)),
            ("second", i64::from(self.second)),
            ("unix", self.unix),
        ]
    }
}

#[cfg(test)]
#[path = "timestamp_tests.rs"]
mod tests;
