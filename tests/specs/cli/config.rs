// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Required environment specs

use crate::prelude::*;

#[test]
fn missing_account_id_exits_one_with_usage() {
    cli()
        .env("AWS_REGION", "us-east-1")
        .exits_with(1)
        .stderr_has("AWS_ACCOUNT_ID is not set")
        .stderr_has("Usage:");
}

#[test]
fn missing_region_exits_one_with_usage() {
    cli()
        .env("AWS_ACCOUNT_ID", "123456789012")
        .exits_with(1)
        .stderr_has("AWS_REGION is not set")
        .stderr_has("Usage:");
}

#[test]
fn empty_value_counts_as_missing() {
    cli()
        .env("AWS_ACCOUNT_ID", "")
        .env("AWS_REGION", "us-east-1")
        .args(&["--delete-only"])
        .exits_with(1)
        .stderr_has("AWS_ACCOUNT_ID is not set");
}

#[test]
fn missing_vault_list_exits_one_on_full_run() {
    let project = Project::empty();
    cli()
        .in_project(&project)
        .exits_with(1)
        .stderr_has("cannot read vault list vaults.txt");
}
