// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Expiry evaluation

use chrono::{DateTime, TimeDelta, Utc};
use std::fmt;

/// Lifecycle state of a stored rotating resource
///
/// `Active` → `Expired` is the only transition and it is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Active,
    Expired,
}

impl Lifecycle {
    pub fn at(deadline: &DateTime<Utc>, now: &DateTime<Utc>) -> Self {
        if is_expired(deadline, now) {
            Lifecycle::Expired
        } else {
            Lifecycle::Active
        }
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lifecycle::Active => write!(f, "active"),
            Lifecycle::Expired => write!(f, "expired"),
        }
    }
}

/// Strictly past the deadline; `now == deadline` is still active
pub fn is_expired(deadline: &DateTime<Utc>, now: &DateTime<Utc>) -> bool {
    now > deadline
}

/// Time left until the deadline, or `None` once expired
pub fn remaining(deadline: &DateTime<Utc>, now: &DateTime<Utc>) -> Option<TimeDelta> {
    (!is_expired(deadline, now)).then(|| deadline.signed_duration_since(*now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::parse_rfc3339;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn ts(s: &str) -> DateTime<Utc> {
        parse_rfc3339("test", s).unwrap()
    }

    #[test]
    fn a_day_past_the_deadline_is_expired() {
        let deadline = ts("2023-01-01T00:00:00Z");
        let now = ts("2023-01-02T00:00:00Z");
        assert!(is_expired(&deadline, &now));
        assert_eq!(Lifecycle::at(&deadline, &now), Lifecycle::Expired);
        assert_eq!(remaining(&deadline, &now), None);
    }

    #[test]
    fn exactly_at_the_deadline_is_active() {
        let deadline = ts("2023-01-01T00:00:00Z");
        assert!(!is_expired(&deadline, &deadline));
        assert_eq!(remaining(&deadline, &deadline), Some(TimeDelta::zero()));
    }

    #[test]
    fn comparison_is_by_instant_not_by_text() {
        // "23:00-02:00" sorts before "00:00Z" as text but is a later instant.
        let deadline = ts("2023-01-01T00:00:00Z");
        let now = ts("2022-12-31T23:00:00-02:00");
        assert!(is_expired(&deadline, &now));
    }

    proptest! {
        #[test]
        fn expiry_boundary(deadline_secs in 0..4_000_000_000i64, delta in 1..1_000_000i64) {
            let deadline = Utc.timestamp_opt(deadline_secs, 0).unwrap();
            prop_assert!(!is_expired(&deadline, &deadline));
            prop_assert!(is_expired(&deadline, &(deadline + TimeDelta::seconds(delta))));
            prop_assert!(!is_expired(&deadline, &(deadline - TimeDelta::seconds(delta))));
        }
    }
}
