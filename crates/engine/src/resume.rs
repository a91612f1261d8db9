// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resume path: delete from inventory files already on disk.
//!
//! No retrieval happens here. Each inventory file in the working directory
//! is matched to the vault whose name is its longest prefix, and the files
//! are processed one after another.

use crate::deletion::{BatchResult, DeletionPool};
use crate::error::SweepError;
use std::path::{Path, PathBuf};
use vs_adapters::GlacierClient;
use vs_core::{is_inventory_file, owning_vault, read_vault_list, Clock};

/// What a resume run did
#[derive(Debug, Default)]
pub struct ResumeSummary {
    pub batches: Vec<BatchResult>,
    /// Inventory files that matched no configured vault
    pub skipped: Vec<PathBuf>,
    pub batch_errors: Vec<String>,
}

impl ResumeSummary {
    pub fn succeeded(&self) -> u64 {
        self.batches.iter().map(|b| b.succeeded).sum()
    }

    pub fn failed(&self) -> u64 {
        self.batches.iter().map(|b| b.failed).sum()
    }
}

/// Inventory files in `dir`, in name order.
async fn inventory_files(dir: &Path) -> Result<Vec<PathBuf>, SweepError> {
    let mut entries = tokio::fs::read_dir(dir).await.map_err(|e| SweepError::io(dir, e))?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|e| SweepError::io(dir, e))? {
        let is_file = entry.file_type().await.map_err(|e| SweepError::io(dir, e))?.is_file();
        let path = entry.path();
        if is_file && is_inventory_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Run a deletion batch for every inventory file in `dir`.
///
/// Fails only when the vault list or the directory cannot be read; a bad
/// inventory file is logged and the next file is processed.
pub async fn resume_from_disk<G, C>(
    pool: &DeletionPool<G, C>,
    dir: &Path,
    vault_list: &Path,
) -> Result<ResumeSummary, SweepError>
where
    G: GlacierClient,
    C: Clock,
{
    let vaults = read_vault_list(vault_list)?;
    let files = inventory_files(dir).await?;
    tracing::info!(
        dir = %dir.display(),
        files = files.len(),
        vaults = vaults.len(),
        "resuming from downloaded inventories"
    );

    let mut summary = ResumeSummary::default();
    for file in files {
        let name = file.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        let Some(vault) = owning_vault(&name, &vaults) else {
            tracing::warn!(file = %file.display(), "inventory file matches no listed vault, skipping");
            summary.skipped.push(file);
            continue;
        };
        match pool.delete_all(&file, vault).await {
            Ok(result) => summary.batches.push(result),
            Err(e) => {
                tracing::error!(vault = %vault, file = %file.display(), error = %e, "deletion batch failed");
                summary.batch_errors.push(e.to_string());
            }
        }
    }
    Ok(summary)
}

#[cfg(test)]
#[path = "resume_tests.rs"]
mod tests;
