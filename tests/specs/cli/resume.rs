// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `--delete-only` specs that need no storage service

use crate::prelude::*;

#[test]
fn missing_vault_list_exits_one() {
    let project = Project::empty();
    project.inventory("x_J_20240101000000.json", &["a1"]);

    cli()
        .in_project(&project)
        .args(&["--delete-only"])
        .exits_with(1)
        .stderr_has("cannot read vault list");
}

#[test]
fn custom_vault_list_path_is_used() {
    let project = Project::empty();
    project.file("lists/mine.txt", "x\n");

    cli()
        .in_project(&project)
        .args(&["--delete-only", "--vaults", "lists/mine.txt"])
        .passes()
        .stderr_has("resume finished");
}

#[test]
fn nothing_to_resume_succeeds() {
    let project = Project::empty();
    project.file("vaults.txt", "x\ny\n");

    cli()
        .in_project(&project)
        .args(&["--delete-only"])
        .passes()
        .stderr_has("resume finished")
        .stderr_lacks("ERROR");
}

#[test]
fn unmatched_inventory_is_skipped_without_calls() {
    let project = Project::empty();
    project.file("vaults.txt", "x\n");
    project.inventory("stranger_J_20240101000000.json", &["s1"]);

    cli()
        .in_project(&project)
        .args(&["--delete-only"])
        .passes()
        .stderr_has("matches no listed vault");
}

#[test]
fn log_file_is_written_to_state_dir() {
    let project = Project::empty();
    project.file("vaults.txt", "x\n");

    cli().in_project(&project).args(&["--delete-only"]).passes();

    let log = std::fs::read_to_string(project.path().join(".state/vsweep.log")).unwrap();
    assert!(log.contains("resume finished"), "{log}");
}
