// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sweep configuration

use std::path::PathBuf;
use std::time::Duration;

/// Wait between full status sweeps while retrieval jobs are outstanding.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1200);
/// Wait between reaps once only deletion batches remain.
pub const DEFAULT_REAP_INTERVAL: Duration = Duration::from_secs(10);
/// Process-wide cap on concurrently running deletes.
pub const DEFAULT_CONCURRENCY: usize = 32;
/// Archives per bookkeeping chunk within a batch.
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// Engine configuration
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Directory inventory files are written to and resumed from
    pub work_dir: PathBuf,
    /// Vault list file, one name per line
    pub vault_list: PathBuf,
    pub poll_interval: Duration,
    pub reap_interval: Duration,
    pub concurrency: usize,
    pub chunk_size: usize,
}

impl SweepConfig {
    pub fn new(work_dir: impl Into<PathBuf>, vault_list: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            vault_list: vault_list.into(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            reap_interval: DEFAULT_REAP_INTERVAL,
            concurrency: DEFAULT_CONCURRENCY,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    vs_core::setters! {
        set {
            poll_interval: Duration,
            reap_interval: Duration,
            concurrency: usize,
            chunk_size: usize,
        }
    }
}
