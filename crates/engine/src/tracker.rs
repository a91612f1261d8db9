// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inventory retrieval tracker: initiate jobs and poll them to completion.

use crate::error::SweepError;
use std::sync::Arc;
use vs_adapters::{GlacierClient, StatusCode};
use vs_core::{JobId, JobPoll, JobStatus, RetrievalJob, VaultName};

/// Starts and polls inventory retrieval jobs
pub struct InventoryTracker<G> {
    client: Arc<G>,
}

impl<G> Clone for InventoryTracker<G> {
    fn clone(&self) -> Self {
        Self { client: Arc::clone(&self.client) }
    }
}

impl<G: GlacierClient> InventoryTracker<G> {
    pub fn new(client: Arc<G>) -> Self {
        Self { client }
    }

    /// Start an inventory retrieval for a vault.
    pub async fn initiate(&self, vault: &VaultName) -> Result<RetrievalJob, SweepError> {
        let job_id = self.client.initiate_inventory_job(vault).await?;
        tracing::info!(vault = %vault, job_id = %job_id, "inventory retrieval initiated");
        Ok(RetrievalJob::new(vault.clone(), job_id))
    }

    /// Look up a job in the vault's listing.
    ///
    /// A job missing from the listing is reported as `NotFound`, which is
    /// not terminal: freshly created jobs can take a while to show up.
    pub async fn poll_status(
        &self,
        vault: &VaultName,
        job_id: &JobId,
    ) -> Result<JobPoll, SweepError> {
        let jobs = self.client.list_jobs(vault).await?;
        let Some(entry) = jobs.into_iter().find(|j| &j.job_id == job_id) else {
            tracing::debug!(vault = %vault, job_id = %job_id, "job not yet listed");
            return Ok(JobPoll::NotFound);
        };
        if !entry.completed {
            return Ok(JobPoll::Pending);
        }
        Ok(JobPoll::Completed {
            succeeded: entry.status_code == StatusCode::Succeeded,
            message: entry.status_message,
        })
    }

    /// Poll a job and fold the result into its status.
    pub async fn poll<'a>(&self, job: &'a mut RetrievalJob) -> Result<&'a JobStatus, SweepError> {
        let poll = self.poll_status(&job.vault, &job.job_id).await?;
        Ok(job.observe(&poll))
    }
}

#[cfg(test)]
#[path = "tracker_tests.rs"]
mod tests;
