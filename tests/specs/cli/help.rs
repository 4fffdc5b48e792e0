// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Help and version output

use crate::prelude::*;

#[test]
fn help_lists_every_command() {
    let project = Project::empty();
    let out = project.tock().args(&["--help"]).passes();
    let out = out.stdout_has("rotating timestamps");
    for command in ["plan", "apply", "show", "import", "id", "rm", "history"] {
        assert!(out.stdout.contains(command), "help is missing {}", command);
    }
}

#[test]
fn version_names_the_binary() {
    Project::empty()
        .tock()
        .args(&["--version"])
        .passes()
        .stdout_has("tock ");
}

#[test]
fn plan_without_resources_says_so() {
    Project::with_manifest("")
        .tock()
        .args(&["plan"])
        .passes()
        .stdout_eq("No resources declared.\n");
}

#[test]
fn plan_help_says_apply_plans_again() {
    Project::empty()
        .tock()
        .args(&["plan", "--help"])
        .passes()
        .stdout_has("apply plans again against the state it finds");
}
