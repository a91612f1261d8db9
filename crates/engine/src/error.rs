// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sweep engine errors.
//!
//! Everything here is local to one unit of work (one initiation, one poll,
//! one download, one batch). Only a missing vault list or an unreadable
//! working directory ends a resume run.

use std::path::PathBuf;
use thiserror::Error;
use vs_adapters::ClientError;
use vs_core::{InventoryError, VaultListError, VaultName};

#[derive(Debug, Error)]
pub enum SweepError {
    #[error(transparent)]
    ExternalCall(#[from] ClientError),
    #[error(transparent)]
    Inventory(#[from] InventoryError),
    #[error(transparent)]
    VaultList(#[from] VaultListError),
    #[error("deletion task for {vault} did not complete: {message}")]
    ProcessManagement { vault: VaultName, message: String },
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SweepError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SweepError::Io { path: path.into(), source }
    }
}
