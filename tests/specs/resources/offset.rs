// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Offset resource specs

use crate::prelude::*;

const LATER: &str = "[offset.later]\nrfc3339 = \"2023-01-31T00:00:00Z\"\noffset_months = 1\noffset_days = 1\n";

#[test]
fn units_accumulate_in_order() {
    let project = Project::with_manifest(LATER);
    project.tock().args(&["apply"]).passes().stdout_eq(
        "offset.later: created
  base       2023-01-31T00:00:00Z
  offsets    +1 months +1 days
  result     2023-03-01T00:00:00Z
",
    );
}

#[test]
fn negative_offsets_step_backwards() {
    Project::with_manifest(
        "[offset.earlier]\nrfc3339 = \"2023-03-01T00:00:00Z\"\noffset_hours = -2\n",
    )
    .tock()
    .args(&["plan"])
    .passes()
    .stdout_has("result     2023-02-28T22:00:00Z");
}

#[test]
fn changed_offsets_replace() {
    let project = Project::with_manifest(LATER);
    project.tock().args(&["apply"]).passes();
    project.file(
        "tock.toml",
        "[offset.later]\nrfc3339 = \"2023-01-31T00:00:00Z\"\noffset_days = 1\n",
    );
    project
        .tock()
        .args(&["apply"])
        .passes()
        .stdout_has("offset.later: replaced (offsets changed)")
        .stdout_has("result     2023-02-01T00:00:00Z");
}

#[test]
fn offset_without_units_is_rejected() {
    Project::with_manifest("[offset.later]\nrfc3339 = \"2023-01-31T00:00:00Z\"\n")
        .tock()
        .args(&["plan"])
        .fails()
        .stderr_has("[malformed_schedule]");
}
