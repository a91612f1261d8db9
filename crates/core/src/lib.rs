// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! vs-core: Domain types for the vault-sweep tool

pub mod macros;

pub mod clock;
pub mod id;
pub mod inventory;
pub mod job;
pub mod progress;
pub mod time_fmt;
pub mod vault;

pub use clock::{stamp_from_epoch_ms, Clock, FakeClock, SystemClock};
pub use id::{short, ArchiveId, JobId, VaultName};
pub use inventory::{
    inventory_file_name, is_inventory_file, ArchiveEntry, InventoryError, InventoryRecord,
};
#[cfg(any(test, feature = "test-support"))]
pub use job::RetrievalJobBuilder;
pub use job::{JobPoll, JobStatus, RetrievalJob};
pub use progress::{BatchProgress, ProgressSnapshot};
pub use time_fmt::{format_elapsed, format_hms};
pub use vault::{owning_vault, parse_vault_list, read_vault_list, VaultListError};
