// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inventory retrieval job state.
//!
//! A [`RetrievalJob`] tracks one in-flight inventory request for one vault.
//! It starts `InProgress` when the job is initiated and moves to a terminal
//! state only when a status poll observes the job as completed.

use crate::id::{JobId, VaultName};
use serde::{Deserialize, Serialize};

/// Observed state of a retrieval job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// Not yet completed (or not yet visible in the job listing)
    InProgress,
    /// Completed successfully; output is ready for download
    Succeeded,
    /// Completed unsuccessfully, with the service's status message
    Failed(String),
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobStatus::InProgress)
    }
}

crate::simple_display! {
    JobStatus {
        InProgress => "in-progress",
        Succeeded => "succeeded",
        Failed(..) => "failed",
    }
}

/// Result of one status poll for a single job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobPoll {
    /// The job is listed but has not completed
    Pending,
    /// The job is listed and has completed
    Completed { succeeded: bool, message: String },
    /// The job id was absent from the listing (listing lag); not terminal
    NotFound,
}

/// An in-flight inventory retrieval for one vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalJob {
    pub vault: VaultName,
    pub job_id: JobId,
    pub status: JobStatus,
}

impl RetrievalJob {
    pub fn new(vault: VaultName, job_id: JobId) -> Self {
        Self { vault, job_id, status: JobStatus::InProgress }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Fold a poll result into the job's status.
    ///
    /// `Pending` and `NotFound` never move the job out of `InProgress`.
    /// A terminal status is sticky.
    pub fn observe(&mut self, poll: &JobPoll) -> &JobStatus {
        if self.status.is_terminal() {
            return &self.status;
        }
        if let JobPoll::Completed { succeeded, message } = poll {
            self.status =
                if *succeeded { JobStatus::Succeeded } else { JobStatus::Failed(message.clone()) };
        }
        &self.status
    }
}

crate::builder! {
    pub struct RetrievalJobBuilder => RetrievalJob {
        into {
            vault: VaultName = "vault",
            job_id: JobId = "job-1",
        }
        set {
            status: JobStatus = JobStatus::InProgress,
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
