// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Help and argument handling specs

use crate::prelude::*;

#[test]
fn help_lists_flags() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("--delete-only")
        .stdout_has("--verbose")
        .stdout_has("--vaults");
}

#[test]
fn version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}

#[test]
fn unknown_flag_exits_two() {
    cli().args(&["--no-such-flag"]).exits_with(2).stderr_has("--no-such-flag");
}
