// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cold-storage client adapters
//!
//! The `GlacierClient` trait is the boundary between the sweep engine and
//! the storage service. It covers exactly the four calls a sweep needs:
//!
//! ```text
//! initiate_inventory_job ──► list_jobs (polled) ──► fetch_job_output
//!                                                        │
//!                                  delete_archive ◄──────┘ (once per archive)
//! ```
//!
//! Every failure surfaces as a [`ClientError`]; callers treat it as local to
//! the one unit of work that made the call.

mod aws_cli;

pub use aws_cli::AwsCliClient;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeGlacierClient, GlacierCall};

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;
use vs_core::{ArchiveId, JobId, VaultName};

/// Errors from storage client calls
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` exited with status {code}: {stderr}")]
    Exit { command: String, code: i32, stderr: String },
    #[error("unparseable response from `{command}`: {message}")]
    Parse { command: String, message: String },
}

/// Status code reported for a retrieval job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    InProgress,
    Succeeded,
    Failed,
}

impl StatusCode {
    /// Parse a status code; unknown codes are treated as still running.
    pub fn parse(s: &str) -> Self {
        match s {
            "Succeeded" => StatusCode::Succeeded,
            "Failed" => StatusCode::Failed,
            _ => StatusCode::InProgress,
        }
    }
}

vs_core::simple_display! {
    StatusCode {
        InProgress => "InProgress",
        Succeeded => "Succeeded",
        Failed => "Failed",
    }
}

/// One entry of a vault's job listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDescription {
    pub job_id: JobId,
    pub completed: bool,
    pub status_code: StatusCode,
    pub status_message: String,
}

/// Client for the cold-storage service
#[async_trait]
pub trait GlacierClient: Send + Sync + 'static {
    /// Start an inventory retrieval job for a vault, returning its id.
    async fn initiate_inventory_job(&self, vault: &VaultName) -> Result<JobId, ClientError>;

    /// List the vault's jobs as currently known to the service.
    ///
    /// Freshly initiated jobs may be missing from the listing for a while.
    async fn list_jobs(&self, vault: &VaultName) -> Result<Vec<JobDescription>, ClientError>;

    /// Write a completed job's output to `dest`.
    async fn fetch_job_output(
        &self,
        vault: &VaultName,
        job_id: &JobId,
        dest: &Path,
    ) -> Result<(), ClientError>;

    /// Delete one archive. Deleting an already-deleted archive is the
    /// service's concern; callers issue the same call either way.
    async fn delete_archive(
        &self,
        vault: &VaultName,
        archive_id: &ArchiveId,
    ) -> Result<(), ClientError>;
}
