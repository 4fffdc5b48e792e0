// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plan preview specs
//!
//! Values that depend on the commit-time clock are never guessed.

use crate::prelude::*;

#[test]
fn defaulted_base_previews_unknown() {
    let mut project = Project::with_manifest(WEEKLY);
    project.at("2023-07-25T00:00:00Z");
    project.tock().args(&["plan"]).passes().stdout_eq(
        "rotating.api_key: create
  base       (known after apply)
  schedule   every 7 days
  deadline   (known after apply)
",
    );
}

#[test]
fn explicit_base_previews_the_deadline() {
    let mut project = Project::with_manifest(
        "[rotating.api_key]\nrfc3339 = \"2023-01-31T00:00:00Z\"\nrotation_months = 1\n",
    );
    project.at("2023-07-25T00:00:00Z");
    project.tock().args(&["plan"]).passes().stdout_eq(
        "rotating.api_key: create
  base       2023-01-31T00:00:00Z
  schedule   every 1 months
  deadline   2023-02-28T00:00:00Z
",
    );
}

#[test]
fn explicit_deadline_is_known_without_a_base() {
    let mut project = Project::with_manifest(
        "[rotating.api_key]\nrotation_rfc3339 = \"2024-01-01T00:00:00Z\"\n",
    );
    project.at("2023-07-25T00:00:00Z");
    project
        .tock()
        .args(&["plan"])
        .passes()
        .stdout_has("base       (known after apply)")
        .stdout_has("deadline   2024-01-01T00:00:00Z");
}

#[test]
fn json_plan_marks_unknown_fields() {
    let mut project = Project::with_manifest(WEEKLY);
    project.at("2023-07-25T00:00:00Z");
    let out = project.tock().args(&["--format", "json", "plan"]).passes();
    let json = out.json();
    assert_eq!(json[0]["kind"], "rotating");
    assert_eq!(json[0]["name"], "api_key");
    assert_eq!(json[0]["action"], "create");
    assert_eq!(json[0]["base"], "unknown");
    assert_eq!(json[0]["deadline"], "unknown");
}

#[test]
fn plan_after_apply_is_a_no_op() {
    let mut project = Project::with_manifest(WEEKLY);
    project.at("2023-07-25T00:00:00Z");
    project.tock().args(&["apply"]).passes();
    project.at("2023-07-26T00:00:00Z");
    project
        .tock()
        .args(&["plan"])
        .passes()
        .stdout_has("rotating.api_key: no-op")
        .stdout_has("deadline   2023-08-01T00:00:00Z");
}

#[test]
fn trigger_change_plans_a_replacement() {
    let mut project = Project::with_manifest(WEEKLY);
    project.at("2023-07-25T00:00:00Z");
    project.tock().args(&["apply"]).passes();

    project.file(
        "tock.toml",
        "[rotating.api_key]\nrotation_days = 7\n[rotating.api_key.triggers]\nowner = \"b\"\n",
    );
    project
        .tock()
        .args(&["plan"])
        .passes()
        .stdout_has("rotating.api_key: replace (triggers changed)")
        .stdout_has("base       (known after apply)");
}
