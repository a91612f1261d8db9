// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! vs-engine: Retrieval tracking, bounded deletion, and run orchestration

pub mod config;
pub mod deletion;
pub mod download;
pub mod error;
pub mod orchestrator;
pub mod resume;
pub mod tracker;

pub use config::{
    SweepConfig, DEFAULT_CHUNK_SIZE, DEFAULT_CONCURRENCY, DEFAULT_POLL_INTERVAL,
    DEFAULT_REAP_INTERVAL,
};
pub use deletion::{BatchResult, DeletionPool};
pub use download::{download, Downloaded};
pub use error::SweepError;
pub use orchestrator::{Orchestrator, RunSummary, VaultFailure};
pub use resume::{resume_from_disk, ResumeSummary};
pub use tracker::InventoryTracker;
