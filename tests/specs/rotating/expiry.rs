// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Expiry specs
//!
//! A resource past its deadline is dropped and created afresh; a resource
//! exactly at its deadline is still live.

use crate::prelude::*;

#[test]
fn deadline_instant_is_still_active() {
    let mut project = Project::with_manifest(WEEKLY);
    project.at("2023-07-25T00:00:00Z");
    project.tock().args(&["apply"]).passes();

    project.at("2023-08-01T00:00:00Z");
    project
        .tock()
        .args(&["apply"])
        .passes()
        .stdout_has("rotating.api_key: unchanged")
        .stdout_has("status     due now");
}

#[test]
fn one_second_past_the_deadline_recreates() {
    let mut project = Project::with_manifest(WEEKLY);
    project.at("2023-07-25T00:00:00Z");
    project.tock().args(&["apply"]).passes();

    project.at("2023-08-01T00:00:01Z");
    project
        .tock()
        .args(&["apply"])
        .passes()
        .stdout_has("rotating.api_key: created")
        .stdout_has("base       2023-08-01T00:00:01Z")
        .stdout_has("deadline   2023-08-08T00:00:01Z");
}

#[test]
fn history_records_death_and_rebirth() {
    let mut project = Project::with_manifest(WEEKLY);
    project.at("2023-07-25T00:00:00Z");
    project.tock().args(&["apply"]).passes();
    project.at("2023-08-02T00:00:00Z");
    project.tock().args(&["apply"]).passes();

    project.tock().args(&["history"]).passes().stdout_eq(
        "   1  2023-07-25T00:00:00Z  rotating.api_key  created
   2  2023-08-02T00:00:00Z  rotating.api_key  expired (deadline 2023-08-01T00:00:00Z)
   3  2023-08-02T00:00:00Z  rotating.api_key  created
",
    );
}

#[test]
fn show_reports_time_remaining() {
    let mut project = Project::with_manifest(WEEKLY);
    project.at("2023-07-25T00:00:00Z");
    project.tock().args(&["apply"]).passes();

    project.at("2023-07-28T00:00:00Z");
    project.tock().args(&["show"]).passes().stdout_eq(
        "rotating.api_key: active
  base       2023-07-25T00:00:00Z
  schedule   every 7 days
  deadline   2023-08-01T00:00:00Z
  status     4days remaining
  id         2023-07-25T00:00:00Z,,,7,,
",
    );
}

#[test]
fn show_does_not_drop_expired_state() {
    let mut project = Project::with_manifest(WEEKLY);
    project.at("2023-07-25T00:00:00Z");
    project.tock().args(&["apply"]).passes();

    project.at("2023-09-01T00:00:00Z");
    project
        .tock()
        .args(&["show", "api_key"])
        .passes()
        .stdout_has("rotating.api_key: expired")
        .stdout_has("status     expired");
    assert!(project.exists(".tock/rotating/api_key.json"));
}

#[test]
fn schedule_change_moves_the_deadline_in_place() {
    let mut project = Project::with_manifest(WEEKLY);
    project.at("2023-07-25T00:00:00Z");
    project.tock().args(&["apply"]).passes();

    project.file("tock.toml", "[rotating.api_key]\nrotation_days = 14\n");
    project.at("2023-07-30T00:00:00Z");
    project
        .tock()
        .args(&["apply"])
        .passes()
        .stdout_has("rotating.api_key: updated")
        .stdout_has("base       2023-07-25T00:00:00Z")
        .stdout_has("deadline   2023-08-08T00:00:00Z");
}
