// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted in-memory `GlacierClient` for tests.

use super::{ClientError, GlacierClient, JobDescription, StatusCode};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use vs_core::{ArchiveId, JobId, VaultName};

/// Recorded client call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlacierCall {
    InitiateJob { vault: VaultName },
    ListJobs { vault: VaultName },
    FetchJobOutput { vault: VaultName, job_id: JobId, dest: PathBuf },
    DeleteArchive { vault: VaultName, archive_id: ArchiveId },
}

#[derive(Debug, Clone)]
enum Outcome {
    Succeeded { archives: Vec<ArchiveId> },
    Failed { message: String },
}

#[derive(Debug, Clone)]
struct VaultScript {
    outcome: Outcome,
    /// Polls during which the job is absent from the listing
    hidden_polls: usize,
    /// Listed polls that report the job as not yet completed
    pending_polls: usize,
}

impl Default for VaultScript {
    fn default() -> Self {
        Self { outcome: Outcome::Succeeded { archives: Vec::new() }, hidden_polls: 0, pending_polls: 0 }
    }
}

#[derive(Debug, Clone)]
struct LiveJob {
    job_id: JobId,
    polls: usize,
}

#[derive(Default)]
struct FakeGlacierState {
    calls: Vec<GlacierCall>,
    scripts: HashMap<VaultName, VaultScript>,
    jobs: HashMap<VaultName, LiveJob>,
    initiate_failures: HashSet<VaultName>,
    fetch_failures: HashSet<VaultName>,
    list_failures: HashMap<VaultName, usize>,
    delete_failures: HashSet<ArchiveId>,
    delete_latency: Option<Duration>,
    next_job: u64,
    in_flight: usize,
    max_in_flight: usize,
}

/// Fake storage client with scripted job outcomes
#[derive(Clone, Default)]
pub struct FakeGlacierClient {
    inner: Arc<Mutex<FakeGlacierState>>,
}

fn scripted_failure(command: &str, detail: &str) -> ClientError {
    ClientError::Exit { command: command.to_string(), code: 254, stderr: detail.to_string() }
}

impl FakeGlacierClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a vault whose retrieval job succeeds with the given archive ids.
    pub fn with_inventory(self, vault: &str, archives: &[&str]) -> Self {
        self.script(vault).outcome =
            Outcome::Succeeded { archives: archives.iter().map(|a| ArchiveId::new(*a)).collect() };
        self
    }

    /// Script a vault whose retrieval job completes unsuccessfully.
    pub fn with_failed_job(self, vault: &str, message: &str) -> Self {
        self.script(vault).outcome = Outcome::Failed { message: message.to_string() };
        self
    }

    /// Number of polls that report the job as listed but not completed.
    pub fn pending_polls(self, vault: &str, n: usize) -> Self {
        self.script(vault).pending_polls = n;
        self
    }

    /// Number of polls during which the job is missing from the listing.
    pub fn hidden_polls(self, vault: &str, n: usize) -> Self {
        self.script(vault).hidden_polls = n;
        self
    }

    pub fn fail_initiate(self, vault: &str) -> Self {
        self.inner.lock().initiate_failures.insert(VaultName::new(vault));
        self
    }

    pub fn fail_fetch(self, vault: &str) -> Self {
        self.inner.lock().fetch_failures.insert(VaultName::new(vault));
        self
    }

    /// Fail the next `n` listing calls for a vault.
    pub fn fail_list(self, vault: &str, n: usize) -> Self {
        self.inner.lock().list_failures.insert(VaultName::new(vault), n);
        self
    }

    pub fn fail_delete(self, archive_id: &str) -> Self {
        self.inner.lock().delete_failures.insert(ArchiveId::new(archive_id));
        self
    }

    /// Make every delete take this long (virtual time under a paused runtime).
    pub fn delete_latency(self, latency: Duration) -> Self {
        self.inner.lock().delete_latency = Some(latency);
        self
    }

    fn script(&self, vault: &str) -> parking_lot::MappedMutexGuard<'_, VaultScript> {
        parking_lot::MutexGuard::map(self.inner.lock(), |s| {
            s.scripts.entry(VaultName::new(vault)).or_default()
        })
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<GlacierCall> {
        self.inner.lock().calls.clone()
    }

    /// Archive ids passed to `delete_archive` for a vault, in call order.
    pub fn deletes_for(&self, vault: &str) -> Vec<ArchiveId> {
        self.inner
            .lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                GlacierCall::DeleteArchive { vault: v, archive_id } if v == vault => {
                    Some(archive_id.clone())
                }
                _ => None,
            })
            .collect()
    }

    /// Highest number of deletes observed in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.inner.lock().max_in_flight
    }

    /// Job id assigned to a vault's most recent initiation.
    pub fn job_id(&self, vault: &str) -> Option<JobId> {
        self.inner.lock().jobs.get(vault).map(|j| j.job_id.clone())
    }
}

#[async_trait]
impl GlacierClient for FakeGlacierClient {
    async fn initiate_inventory_job(&self, vault: &VaultName) -> Result<JobId, ClientError> {
        let mut state = self.inner.lock();
        state.calls.push(GlacierCall::InitiateJob { vault: vault.clone() });
        if state.initiate_failures.contains(vault) {
            return Err(scripted_failure("initiate-job", "scripted initiate failure"));
        }
        state.next_job += 1;
        let job_id = JobId::new(format!("job-{}-{}", vault, state.next_job));
        state.jobs.insert(vault.clone(), LiveJob { job_id: job_id.clone(), polls: 0 });
        Ok(job_id)
    }

    async fn list_jobs(&self, vault: &VaultName) -> Result<Vec<JobDescription>, ClientError> {
        let mut state = self.inner.lock();
        state.calls.push(GlacierCall::ListJobs { vault: vault.clone() });
        if let Some(remaining) = state.list_failures.get_mut(vault) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(scripted_failure("list-jobs", "scripted list failure"));
            }
        }
        let script = state.scripts.get(vault).cloned().unwrap_or_default();
        let Some(job) = state.jobs.get_mut(vault) else {
            return Ok(Vec::new());
        };
        job.polls += 1;
        if job.polls <= script.hidden_polls {
            return Ok(Vec::new());
        }
        let listed = job.polls - script.hidden_polls;
        let description = if listed <= script.pending_polls {
            JobDescription {
                job_id: job.job_id.clone(),
                completed: false,
                status_code: StatusCode::InProgress,
                status_message: String::new(),
            }
        } else {
            match &script.outcome {
                Outcome::Succeeded { .. } => JobDescription {
                    job_id: job.job_id.clone(),
                    completed: true,
                    status_code: StatusCode::Succeeded,
                    status_message: "Succeeded".to_string(),
                },
                Outcome::Failed { message } => JobDescription {
                    job_id: job.job_id.clone(),
                    completed: true,
                    status_code: StatusCode::Failed,
                    status_message: message.clone(),
                },
            }
        };
        Ok(vec![description])
    }

    async fn fetch_job_output(
        &self,
        vault: &VaultName,
        job_id: &JobId,
        dest: &Path,
    ) -> Result<(), ClientError> {
        let body = {
            let mut state = self.inner.lock();
            state.calls.push(GlacierCall::FetchJobOutput {
                vault: vault.clone(),
                job_id: job_id.clone(),
                dest: dest.to_path_buf(),
            });
            if state.fetch_failures.contains(vault) {
                return Err(scripted_failure("get-job-output", "scripted fetch failure"));
            }
            let archives = match state.scripts.get(vault).map(|s| &s.outcome) {
                Some(Outcome::Succeeded { archives }) => archives.clone(),
                _ => Vec::new(),
            };
            let list: Vec<serde_json::Value> =
                archives.iter().map(|a| serde_json::json!({ "ArchiveId": a })).collect();
            serde_json::json!({
                "VaultARN": format!("arn:aws:glacier:fake:0:vaults/{vault}"),
                "ArchiveList": list,
            })
            .to_string()
        };
        tokio::fs::write(dest, body).await.map_err(|source| ClientError::Spawn {
            command: format!("get-job-output {}", dest.display()),
            source,
        })
    }

    async fn delete_archive(
        &self,
        vault: &VaultName,
        archive_id: &ArchiveId,
    ) -> Result<(), ClientError> {
        let latency = {
            let mut state = self.inner.lock();
            state.calls.push(GlacierCall::DeleteArchive {
                vault: vault.clone(),
                archive_id: archive_id.clone(),
            });
            state.in_flight += 1;
            state.max_in_flight = state.max_in_flight.max(state.in_flight);
            state.delete_latency
        };
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        } else {
            tokio::task::yield_now().await;
        }
        let mut state = self.inner.lock();
        state.in_flight -= 1;
        if state.delete_failures.contains(archive_id) {
            return Err(scripted_failure("delete-archive", "scripted delete failure"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
