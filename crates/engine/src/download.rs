// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Download step: write a completed job's inventory to the working directory.

use crate::error::SweepError;
use std::path::{Path, PathBuf};
use vs_adapters::GlacierClient;
use vs_core::{inventory_file_name, Clock, RetrievalJob, VaultName};

/// A downloaded inventory file and the vault it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Downloaded {
    pub path: PathBuf,
    pub vault: VaultName,
}

/// Fetch a succeeded job's output into `dir`.
///
/// The file name embeds the wall-clock stamp at download time, so repeated
/// runs against the same vault and job never overwrite each other.
pub async fn download<G, C>(
    client: &G,
    clock: &C,
    dir: &Path,
    job: &RetrievalJob,
) -> Result<Downloaded, SweepError>
where
    G: GlacierClient,
    C: Clock,
{
    tokio::fs::create_dir_all(dir).await.map_err(|e| SweepError::io(dir, e))?;
    let path = dir.join(inventory_file_name(&job.vault, &job.job_id, &clock.stamp()));
    client.fetch_job_output(&job.vault, &job.job_id, &path).await?;
    tracing::info!(
        vault = %job.vault,
        job_id = %job.job_id,
        file = %path.display(),
        "inventory downloaded"
    );
    Ok(Downloaded { path, vault: job.vault.clone() })
}

#[cfg(test)]
#[path = "download_tests.rs"]
mod tests;
