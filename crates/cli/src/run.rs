// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The two entry points: a full sweep and a resume from disk.

use crate::exit_error::ExitError;
use anyhow::Result;
use std::sync::Arc;
use vs_adapters::AwsCliClient;
use vs_core::{format_hms, read_vault_list, SystemClock};
use vs_engine::{
    resume_from_disk, DeletionPool, Orchestrator, ResumeSummary, RunSummary, SweepConfig,
    SweepError,
};

/// Retrieve inventories for every listed vault and delete their archives.
pub async fn sweep(client: AwsCliClient, config: SweepConfig) -> Result<()> {
    let vaults = read_vault_list(&config.vault_list).map_err(|e| ExitError::config(e.to_string()))?;
    if vaults.is_empty() {
        tracing::warn!(file = %config.vault_list.display(), "vault list is empty");
    }
    let orchestrator = Orchestrator::new(Arc::new(client), SystemClock, config);
    let summary = orchestrator.run(&vaults).await;
    report_run(&summary);
    Ok(())
}

/// Delete from inventory files already downloaded into the working directory.
pub async fn resume(client: AwsCliClient, config: SweepConfig) -> Result<()> {
    let pool = DeletionPool::from_config(Arc::new(client), SystemClock, &config);
    // Only an unreadable vault list or working directory comes back as an error
    let summary = resume_from_disk(&pool, &config.work_dir, &config.vault_list)
        .await
        .map_err(|e: SweepError| ExitError::config(e.to_string()))?;
    report_resume(&summary);
    Ok(())
}

fn report_run(summary: &RunSummary) {
    for failure in summary.initiation_failures.iter().chain(&summary.download_failures) {
        tracing::error!(vault = %failure.vault, "{}", failure.message);
    }
    for failure in &summary.failed_jobs {
        tracing::error!(
            vault = %failure.vault,
            job_id = failure.job_id.as_ref().map(|j| j.as_str()).unwrap_or("-"),
            "retrieval failed: {}",
            failure.message
        );
    }
    for batch in &summary.batches {
        tracing::info!(
            vault = %batch.vault,
            succeeded = batch.succeeded,
            failed = batch.failed,
            elapsed = %format_hms(batch.elapsed),
            "batch summary"
        );
    }
    tracing::info!(
        vaults_emptied = summary.batches.len(),
        vaults_failed = summary.initiation_failures.len()
            + summary.failed_jobs.len()
            + summary.download_failures.len()
            + summary.batch_errors.len(),
        succeeded = summary.succeeded(),
        failed = summary.failed(),
        "sweep finished"
    );
}

fn report_resume(summary: &ResumeSummary) {
    for file in &summary.skipped {
        tracing::warn!(file = %file.display(), "skipped");
    }
    tracing::info!(
        batches = summary.batches.len(),
        errors = summary.batch_errors.len(),
        succeeded = summary.succeeded(),
        failed = summary.failed(),
        "resume finished"
    );
}
