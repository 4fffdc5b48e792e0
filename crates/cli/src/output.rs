// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use chrono::{DateTime, TimeDelta, Utc};
use clap::ValueEnum;
use serde::Serialize;
use tock_core::{format_rfc3339, Offsets, Planned, ResourceKind, UNKNOWN_VALUE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// A resource header followed by aligned `field value` lines
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub kind: ResourceKind,
    pub name: String,
    pub headline: String,
    #[serde(skip)]
    pub fields: Vec<(&'static str, String)>,
    #[serde(flatten)]
    pub detail: serde_json::Value,
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}: {}", self.kind, self.name, self.headline)?;
        for (field, value) in &self.fields {
            write!(f, "\n  {:<10} {}", field, value)?;
        }
        Ok(())
    }
}

/// Print a list of items
pub fn print_list<T: Serialize + std::fmt::Display>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            for item in items {
                println!("{}", item);
            }
        }
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(items) {
                println!("{}", json);
            }
        }
    }
}

pub fn instant(value: &DateTime<Utc>) -> String {
    format_rfc3339(value)
}

/// A previewed instant, or the unknown marker
pub fn planned_instant(value: &Planned<DateTime<Utc>>) -> String {
    value
        .known()
        .map(format_rfc3339)
        .unwrap_or_else(|| UNKNOWN_VALUE.to_string())
}

/// `+1 months +1 days`, in accumulation order
pub fn offsets(offsets: &Offsets) -> String {
    let parts = [
        ("years", offsets.years),
        ("months", offsets.months),
        ("days", offsets.days),
        ("hours", offsets.hours),
        ("minutes", offsets.minutes),
        ("seconds", offsets.seconds),
    ];
    parts
        .iter()
        .filter_map(|(unit, n)| n.map(|n| format!("{:+} {}", n, unit)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whole-second remaining time, e.g. `6days 23h 59m`
pub fn remaining(delta: TimeDelta) -> String {
    let whole = TimeDelta::seconds(delta.num_seconds());
    match whole.to_std() {
        Ok(d) if !d.is_zero() => format!("{} remaining", humantime::format_duration(d)),
        _ => "due now".to_string(),
    }
}
