// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Full-run orchestration.
//!
//! Initiates one inventory retrieval per vault, then sweeps on a fixed
//! interval: every outstanding job is polled, succeeded jobs are downloaded
//! and handed to the deletion pool as independent batches, failed jobs are
//! reported and dropped. The run ends once no job is outstanding and every
//! batch has finished.

use crate::config::SweepConfig;
use crate::deletion::{BatchResult, DeletionPool};
use crate::download::download;
use crate::error::SweepError;
use crate::tracker::InventoryTracker;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;
use vs_adapters::GlacierClient;
use vs_core::{format_elapsed, Clock, JobId, JobStatus, RetrievalJob, VaultName};

/// A vault that dropped out of the run before deletion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultFailure {
    pub vault: VaultName,
    pub job_id: Option<JobId>,
    pub message: String,
}

/// What a full run did
#[derive(Debug, Default)]
pub struct RunSummary {
    pub initiation_failures: Vec<VaultFailure>,
    pub failed_jobs: Vec<VaultFailure>,
    pub download_failures: Vec<VaultFailure>,
    pub downloads: Vec<PathBuf>,
    pub batches: Vec<BatchResult>,
    pub batch_errors: Vec<String>,
}

impl RunSummary {
    pub fn succeeded(&self) -> u64 {
        self.batches.iter().map(|b| b.succeeded).sum()
    }

    pub fn failed(&self) -> u64 {
        self.batches.iter().map(|b| b.failed).sum()
    }
}

struct RunningBatch {
    vault: VaultName,
    handle: JoinHandle<Result<BatchResult, SweepError>>,
}

/// Drives retrieval, download and deletion for a set of vaults
pub struct Orchestrator<G, C> {
    client: Arc<G>,
    clock: C,
    tracker: InventoryTracker<G>,
    pool: DeletionPool<G, C>,
    config: SweepConfig,
}

impl<G, C> Orchestrator<G, C>
where
    G: GlacierClient,
    C: Clock,
{
    pub fn new(client: Arc<G>, clock: C, config: SweepConfig) -> Self {
        let tracker = InventoryTracker::new(Arc::clone(&client));
        let pool = DeletionPool::from_config(Arc::clone(&client), clock.clone(), &config);
        Self { client, clock, tracker, pool, config }
    }

    pub fn pool(&self) -> &DeletionPool<G, C> {
        &self.pool
    }

    /// Run every vault through retrieval, download and deletion.
    ///
    /// Per-vault failures are logged and collected; nothing here aborts the
    /// run as a whole.
    pub async fn run(&self, vaults: &[VaultName]) -> RunSummary {
        let started = self.clock.now();
        let mut summary = RunSummary::default();
        let mut jobs = self.initiate_all(vaults, &mut summary).await;
        let mut running: Vec<RunningBatch> = Vec::new();

        loop {
            reap_finished(&mut running, &mut summary).await;
            self.sweep(&mut jobs, &mut running, &mut summary).await;

            if jobs.is_empty() && running.is_empty() {
                break;
            }

            let pending: Vec<&str> = jobs.iter().map(|j| j.vault.as_str()).collect();
            let deleting: Vec<&str> = running.iter().map(|b| b.vault.as_str()).collect();
            tracing::info!(
                elapsed = %format_elapsed(self.clock.now().duration_since(started).as_secs()),
                "pending={pending:?} deleting={deleting:?}"
            );

            let wait = if jobs.is_empty() {
                self.config.reap_interval
            } else {
                self.config.poll_interval
            };
            tokio::time::sleep(wait).await;
        }

        tracing::info!(
            succeeded = summary.succeeded(),
            failed = summary.failed(),
            "run complete; the emptied vaults still have to be deleted by hand"
        );
        summary
    }

    async fn initiate_all(
        &self,
        vaults: &[VaultName],
        summary: &mut RunSummary,
    ) -> Vec<RetrievalJob> {
        let mut jobs = Vec::with_capacity(vaults.len());
        for vault in vaults {
            match self.tracker.initiate(vault).await {
                Ok(job) => jobs.push(job),
                Err(e) => {
                    tracing::error!(vault = %vault, error = %e, "failed to initiate inventory retrieval");
                    summary.initiation_failures.push(VaultFailure {
                        vault: vault.clone(),
                        job_id: None,
                        message: e.to_string(),
                    });
                }
            }
        }
        jobs
    }

    /// Poll every outstanding job once and act on the terminal ones.
    async fn sweep(
        &self,
        jobs: &mut Vec<RetrievalJob>,
        running: &mut Vec<RunningBatch>,
        summary: &mut RunSummary,
    ) {
        let mut still_pending = Vec::with_capacity(jobs.len());
        for mut job in std::mem::take(jobs) {
            let polled = self.tracker.poll(&mut job).await.map(|_| ());
            if let Err(e) = polled {
                tracing::warn!(
                    vault = %job.vault,
                    job_id = %job.job_id,
                    error = %e,
                    "status poll failed; retrying next sweep"
                );
            }
            match job.status.clone() {
                JobStatus::InProgress => still_pending.push(job),
                JobStatus::Succeeded => self.start_deletion(&job, running, summary).await,
                JobStatus::Failed(message) => {
                    tracing::error!(
                        vault = %job.vault,
                        job_id = %job.job_id,
                        status_message = %message,
                        "inventory retrieval failed"
                    );
                    summary.failed_jobs.push(VaultFailure {
                        vault: job.vault,
                        job_id: Some(job.job_id),
                        message,
                    });
                }
            }
        }
        *jobs = still_pending;
    }

    async fn start_deletion(
        &self,
        job: &RetrievalJob,
        running: &mut Vec<RunningBatch>,
        summary: &mut RunSummary,
    ) {
        match download(self.client.as_ref(), &self.clock, &self.config.work_dir, job).await {
            Ok(downloaded) => {
                summary.downloads.push(downloaded.path.clone());
                let handle = self.pool.spawn_batch(downloaded.path, downloaded.vault.clone());
                running.push(RunningBatch { vault: downloaded.vault, handle });
            }
            Err(e) => {
                tracing::error!(
                    vault = %job.vault,
                    job_id = %job.job_id,
                    error = %e,
                    "inventory download failed"
                );
                summary.download_failures.push(VaultFailure {
                    vault: job.vault.clone(),
                    job_id: Some(job.job_id.clone()),
                    message: e.to_string(),
                });
            }
        }
    }
}

/// Collect batches that have finished, leaving the rest running.
async fn reap_finished(running: &mut Vec<RunningBatch>, summary: &mut RunSummary) {
    let mut remaining = Vec::with_capacity(running.len());
    for batch in running.drain(..) {
        if !batch.handle.is_finished() {
            remaining.push(batch);
            continue;
        }
        let outcome = match batch.handle.await {
            Ok(result) => result,
            Err(e) => Err(SweepError::ProcessManagement {
                vault: batch.vault.clone(),
                message: e.to_string(),
            }),
        };
        match outcome {
            Ok(result) => summary.batches.push(result),
            Err(e) => {
                tracing::error!(vault = %batch.vault, error = %e, "deletion batch failed");
                summary.batch_errors.push(e.to_string());
            }
        }
    }
    *running = remaining;
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
