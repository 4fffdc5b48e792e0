// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error reporting specs
//!
//! Every failure exits non-zero, explains itself on stderr, and leaves
//! state untouched.

use crate::prelude::*;

#[test]
fn unknown_manifest_key_is_rejected() {
    let project = Project::with_manifest("[rotating.api_key]\nrotation_weeks = 2\n");
    project
        .tock()
        .args(&["apply"])
        .fails()
        .stderr_has("error: invalid manifest")
        .stderr_has("rotation_weeks");
    assert!(!project.exists(".tock/rotating/api_key.json"));
}

#[test]
fn bad_resource_name_is_rejected() {
    Project::with_manifest("[rotating.\"api key\"]\nrotation_days = 7\n")
        .tock()
        .args(&["plan"])
        .fails()
        .stderr_has("invalid resource name \"api key\"");
}

#[test]
fn missing_schedule_is_malformed() {
    Project::with_manifest("[rotating.api_key]\nrfc3339 = \"2023-07-25T00:00:00Z\"\n")
        .tock()
        .args(&["plan"])
        .fails()
        .stderr_has("[malformed_schedule]");
}

#[test]
fn two_units_are_ambiguous() {
    Project::with_manifest("[rotating.api_key]\nrotation_days = 7\nrotation_hours = 1\n")
        .tock()
        .args(&["plan"])
        .fails()
        .stderr_has("[ambiguous_schedule]")
        .stderr_has("rotation_days, rotation_hours");
}

#[test]
fn non_positive_count_is_malformed() {
    Project::with_manifest("[rotating.api_key]\nrotation_days = 0\n")
        .tock()
        .args(&["plan"])
        .fails()
        .stderr_has("[malformed_schedule]");
}

#[test]
fn unreachable_count_stops_apply_before_anything_is_stored() {
    let project = Project::with_manifest(
        "[rotating.a]\nrotation_days = 1\n\n[rotating.b]\nrotation_days = 4000000000\n",
    );
    project
        .tock()
        .args(&["--now", "2023-07-25T00:00:00Z", "apply"])
        .fails()
        .stderr_has("[malformed_schedule]")
        .stderr_has("rotation_days is too large");
    assert!(!project.exists(".tock/rotating/a.json"));
    assert!(!project.exists(".tock/rotating/b.json"));
    project
        .tock()
        .args(&["history"])
        .passes()
        .stdout_eq("No history.\n");
}

#[test]
fn bad_now_flag_is_rejected() {
    Project::with_manifest(WEEKLY)
        .tock()
        .args(&["--now", "yesterday", "plan"])
        .fails()
        .stderr_has("not RFC 3339");
}

#[test]
fn unknown_kind_is_rejected() {
    Project::empty()
        .tock()
        .args(&["rm", "cron", "x"])
        .fails()
        .stderr_has("unknown resource kind: cron");
}

#[test]
fn id_of_unknown_resource_fails() {
    Project::empty()
        .tock()
        .args(&["id", "api_key"])
        .fails()
        .stderr_has("rotating.api_key is not in state");
}
