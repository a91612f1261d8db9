// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded deletion worker pool.
//!
//! A batch deletes every archive listed in one inventory file. Archives are
//! walked in inventory order in fixed-size chunks; within a chunk each
//! archive gets its own task, and a process-wide semaphore caps how many
//! deletes run at once across every batch sharing the pool.
//!
//! A failed delete is counted and logged and never stops the batch.

use crate::config::SweepConfig;
use crate::error::SweepError;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::{JoinHandle, JoinSet};
use vs_adapters::GlacierClient;
use vs_core::{ArchiveId, BatchProgress, Clock, InventoryRecord, VaultName};

/// Outcome of one deletion batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    pub vault: VaultName,
    pub file: PathBuf,
    pub total: u64,
    pub completed: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub elapsed: Duration,
}

/// Tracks deletes currently holding a slot, and the high-water mark.
#[derive(Debug, Default)]
struct SlotGauge {
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl SlotGauge {
    fn enter(&self, cap: usize) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        debug_assert!(now <= cap, "{now} deletes in flight with a cap of {cap}");
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn exit(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Deletes archives with bounded, process-wide concurrency
pub struct DeletionPool<G, C> {
    client: Arc<G>,
    clock: C,
    slots: Arc<Semaphore>,
    gauge: Arc<SlotGauge>,
    concurrency: usize,
    chunk_size: usize,
}

impl<G, C: Clone> Clone for DeletionPool<G, C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            clock: self.clock.clone(),
            slots: Arc::clone(&self.slots),
            gauge: Arc::clone(&self.gauge),
            concurrency: self.concurrency,
            chunk_size: self.chunk_size,
        }
    }
}

impl<G, C> DeletionPool<G, C>
where
    G: GlacierClient,
    C: Clock,
{
    /// Create a pool. Concurrency and chunk size are clamped to at least 1.
    pub fn new(client: Arc<G>, clock: C, concurrency: usize, chunk_size: usize) -> Self {
        let concurrency = concurrency.max(1);
        Self {
            client,
            clock,
            slots: Arc::new(Semaphore::new(concurrency)),
            gauge: Arc::new(SlotGauge::default()),
            concurrency,
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn from_config(client: Arc<G>, clock: C, config: &SweepConfig) -> Self {
        Self::new(client, clock, config.concurrency, config.chunk_size)
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Most deletes this pool has had in flight at once.
    pub fn peak_in_flight(&self) -> usize {
        self.gauge.peak.load(Ordering::SeqCst)
    }

    /// Run a batch as an independent task.
    pub fn spawn_batch(
        &self,
        file: PathBuf,
        vault: VaultName,
    ) -> JoinHandle<Result<BatchResult, SweepError>> {
        let pool = self.clone();
        tokio::spawn(async move { pool.delete_all(&file, &vault).await })
    }

    /// Delete every archive listed in `file` from `vault`.
    ///
    /// Fails only when the inventory cannot be read or parsed.
    pub async fn delete_all(
        &self,
        file: &Path,
        vault: &VaultName,
    ) -> Result<BatchResult, SweepError> {
        let text = tokio::fs::read_to_string(file).await.map_err(|source| {
            SweepError::Inventory(vs_core::InventoryError::Io { path: file.to_path_buf(), source })
        })?;
        let record = InventoryRecord::parse(&text, file)?;
        let archive_ids = record.archive_ids();
        let progress = Arc::new(BatchProgress::new(archive_ids.len() as u64, self.clock.now()));

        tracing::info!(
            vault = %vault,
            file = %file.display(),
            archives = archive_ids.len(),
            bytes = record.total_size(),
            "deletion batch started"
        );

        for chunk in archive_ids.chunks(self.chunk_size) {
            self.run_chunk(chunk, vault, &progress).await?;
        }

        let snap = progress.snapshot(self.clock.now());
        tracing::info!(
            vault = %vault,
            file = %file.display(),
            succeeded = snap.succeeded,
            failed = snap.failed,
            "deletion batch finished"
        );
        Ok(BatchResult {
            vault: vault.clone(),
            file: file.to_path_buf(),
            total: snap.total,
            completed: snap.completed,
            succeeded: snap.succeeded,
            failed: snap.failed,
            elapsed: snap.elapsed,
        })
    }

    async fn run_chunk(
        &self,
        chunk: &[ArchiveId],
        vault: &VaultName,
        progress: &Arc<BatchProgress>,
    ) -> Result<(), SweepError> {
        let mut tasks = JoinSet::new();
        for archive_id in chunk {
            // Admission: wait for a free slot before launching the next delete
            let permit = Arc::clone(&self.slots).acquire_owned().await.map_err(|e| {
                SweepError::ProcessManagement { vault: vault.clone(), message: e.to_string() }
            })?;
            let client = Arc::clone(&self.client);
            let clock = self.clock.clone();
            let gauge = Arc::clone(&self.gauge);
            let progress = Arc::clone(progress);
            let vault = vault.clone();
            let archive_id = archive_id.clone();
            let cap = self.concurrency;

            tasks.spawn(async move {
                gauge.enter(cap);
                let result = client.delete_archive(&vault, &archive_id).await;
                gauge.exit();
                drop(permit);

                if let Err(e) = &result {
                    tracing::error!(
                        vault = %vault,
                        archive_id = %archive_id,
                        error = %e,
                        "archive delete failed"
                    );
                }
                let snap = progress.record(result.is_ok(), clock.now());
                tracing::info!(vault = %vault, "{snap}");
            });
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                // The task never recorded its outcome; count it as a failure
                tracing::error!(vault = %vault, error = %e, "deletion task did not complete");
                progress.record(false, self.clock.now());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "deletion_tests.rs"]
mod tests;
