// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Vault list file and vault-name matching.

use crate::id::VaultName;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors reading the vault list
#[derive(Debug, Error)]
pub enum VaultListError {
    #[error("cannot read vault list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parse vault list text: one name per line, whitespace trimmed, blank lines
/// dropped, first occurrence of a duplicate wins.
pub fn parse_vault_list(text: &str) -> Vec<VaultName> {
    let mut vaults: Vec<VaultName> = Vec::new();
    for line in text.lines() {
        let name = line.trim();
        if name.is_empty() || vaults.iter().any(|v| v == name) {
            continue;
        }
        vaults.push(VaultName::new(name));
    }
    vaults
}

/// Read the vault list file fully into memory.
pub fn read_vault_list(path: &Path) -> Result<Vec<VaultName>, VaultListError> {
    let text = std::fs::read_to_string(path)
        .map_err(|source| VaultListError::Io { path: path.to_path_buf(), source })?;
    Ok(parse_vault_list(&text))
}

/// Find the vault that owns an inventory file name.
///
/// Inventory files are named `{vault}_{job}_{stamp}.json`, so a vault owns a
/// file when the name starts with `{vault}_`. When several vaults match
/// (`foo` and `foo_bar` both prefix `foo_bar_job_stamp.json`), the longest
/// name wins.
pub fn owning_vault<'a>(file_name: &str, vaults: &'a [VaultName]) -> Option<&'a VaultName> {
    vaults
        .iter()
        .filter(|v| {
            file_name
                .strip_prefix(v.as_str())
                .is_some_and(|rest| rest.starts_with('_'))
        })
        .max_by_key(|v| v.len())
}

#[cfg(test)]
#[path = "vault_tests.rs"]
mod tests;
