// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Static resource specs

use crate::prelude::*;

#[test]
fn captures_now_once() {
    let mut project = Project::with_manifest("[static.epoch]\n");
    project.at("2023-07-25T12:00:00Z");
    project
        .tock()
        .args(&["apply"])
        .passes()
        .stdout_eq("static.epoch: created\n  base       2023-07-25T12:00:00Z\n");

    project.at("2024-01-01T00:00:00Z");
    project
        .tock()
        .args(&["apply"])
        .passes()
        .stdout_eq("static.epoch: unchanged\n  base       2023-07-25T12:00:00Z\n");
}

#[test]
fn trigger_change_recaptures() {
    let mut project = Project::with_manifest("[static.epoch]\n");
    project.at("2023-07-25T12:00:00Z");
    project.tock().args(&["apply"]).passes();

    project.file("tock.toml", "[static.epoch.triggers]\nrelease = \"2\"\n");
    project.at("2023-07-26T12:00:00Z");
    project
        .tock()
        .args(&["apply"])
        .passes()
        .stdout_has("static.epoch: replaced (triggers changed)")
        .stdout_has("base       2023-07-26T12:00:00Z");
}

#[test]
fn rm_journals_deletion() {
    let mut project = Project::with_manifest("[static.epoch]\nrfc3339 = \"2020-01-01T00:00:00Z\"\n");
    project.at("2023-07-25T00:00:00Z");
    project.tock().args(&["apply"]).passes();
    project
        .tock()
        .args(&["rm", "static", "epoch"])
        .passes()
        .stdout_eq("static.epoch: deleted\n");

    let history = project
        .tock()
        .args(&["--format", "json", "history"])
        .passes()
        .json();
    assert_eq!(history.as_array().map(Vec::len), Some(2));
    assert_eq!(history[1]["event"], "deleted");
    assert_eq!(history[1]["kind"], "static");
}
