// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Import and identifier specs

use crate::prelude::*;

#[test]
fn unit_identifier_imports_and_prints_back() {
    let mut project = Project::empty();
    project.at("2023-07-25T00:00:00Z");
    project
        .tock()
        .args(&["import", "api_key", "2023-07-25T00:00:00Z,,3,,,"])
        .passes()
        .stdout_has("rotating.api_key: imported")
        .stdout_has("schedule   every 3 months")
        .stdout_has("deadline   2023-10-25T00:00:00Z");

    project
        .tock()
        .args(&["id", "api_key"])
        .passes()
        .stdout_eq("2023-07-25T00:00:00Z,,3,,,\n");
}

#[test]
fn deadline_identifier_imports() {
    let mut project = Project::empty();
    project.at("2023-07-25T00:00:00Z");
    project
        .tock()
        .args(&["import", "api_key", "2023-07-25T00:00:00Z,2024-01-01T00:00:00Z"])
        .passes()
        .stdout_has("schedule   at 2024-01-01T00:00:00Z");

    project
        .tock()
        .args(&["id", "api_key"])
        .passes()
        .stdout_eq("2023-07-25T00:00:00Z,2024-01-01T00:00:00Z\n");
}

#[test]
fn imported_state_converges_without_replacement() {
    let mut project = Project::with_manifest(WEEKLY);
    project.at("2023-07-26T00:00:00Z");
    project
        .tock()
        .args(&["import", "api_key", "2023-07-25T00:00:00Z,,,7,,"])
        .passes();
    project
        .tock()
        .args(&["apply"])
        .passes()
        .stdout_has("rotating.api_key: unchanged")
        .stdout_has("base       2023-07-25T00:00:00Z");
}

#[test]
fn wrong_field_count_is_malformed() {
    let project = Project::empty();
    project
        .tock()
        .args(&["import", "api_key", "2023-07-25T00:00:00Z,1,2"])
        .fails()
        .stderr_has("[malformed_identifier]")
        .stderr_has("found 3");
    assert!(!project.exists(".tock/rotating/api_key.json"));
}

#[test]
fn non_integer_unit_names_its_field() {
    Project::empty()
        .tock()
        .args(&["import", "api_key", "2023-07-25T00:00:00Z,,,x,,"])
        .fails()
        .stderr_has("rotation_days");
}

#[test]
fn two_units_in_identifier_are_ambiguous() {
    Project::empty()
        .tock()
        .args(&["import", "api_key", "2023-07-25T00:00:00Z,1,,7,,"])
        .fails()
        .stderr_has("[ambiguous_schedule]");
}

#[test]
fn import_refuses_to_overwrite_state() {
    let mut project = Project::with_manifest(WEEKLY);
    project.at("2023-07-25T00:00:00Z");
    project.tock().args(&["apply"]).passes();
    project
        .tock()
        .args(&["import", "api_key", "2023-07-25T00:00:00Z,,,7,,"])
        .fails()
        .stderr_has("already in state")
        .stderr_has("tock rm rotating api_key");
}
