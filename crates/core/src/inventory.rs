// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inventory records: the downloaded output of a successful retrieval job.
//!
//! On disk an inventory is the service's JSON document, written once under
//! a name that embeds the vault, the job id and a wall-clock stamp:
//!
//! ```text
//! {vault}_{job_id}_{YYYYmmddHHMMSS}.json
//! ```

use crate::id::{ArchiveId, JobId, VaultName};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File extension of inventory records
pub const INVENTORY_EXT: &str = "json";

/// Errors loading an inventory record
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("cannot read inventory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed inventory {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// One archive entry in an inventory. Only the id is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    #[serde(rename = "ArchiveId")]
    pub archive_id: ArchiveId,
    #[serde(rename = "ArchiveDescription", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "CreationDate", default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    #[serde(rename = "Size", default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

/// A vault inventory as returned by the storage service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    #[serde(rename = "VaultARN", default, skip_serializing_if = "Option::is_none")]
    pub vault_arn: Option<String>,
    #[serde(rename = "InventoryDate", default, skip_serializing_if = "Option::is_none")]
    pub inventory_date: Option<String>,
    #[serde(rename = "ArchiveList")]
    pub archives: Vec<ArchiveEntry>,
}

impl InventoryRecord {
    /// Parse an inventory document. `path` is used for error context only.
    pub fn parse(text: &str, path: &Path) -> Result<Self, InventoryError> {
        serde_json::from_str(text)
            .map_err(|e| InventoryError::Parse { path: path.to_path_buf(), message: e.to_string() })
    }

    /// Load and parse an inventory file.
    pub fn load(path: &Path) -> Result<Self, InventoryError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| InventoryError::Io { path: path.to_path_buf(), source })?;
        Self::parse(&text, path)
    }

    /// Archive ids in inventory order.
    pub fn archive_ids(&self) -> Vec<ArchiveId> {
        self.archives.iter().map(|a| a.archive_id.clone()).collect()
    }

    pub fn total_size(&self) -> u64 {
        self.archives.iter().filter_map(|a| a.size).sum()
    }
}

/// File name for a downloaded inventory.
pub fn inventory_file_name(vault: &VaultName, job_id: &JobId, stamp: &str) -> String {
    format!("{vault}_{job_id}_{stamp}.{INVENTORY_EXT}")
}

/// Whether a path looks like an inventory record (by extension).
pub fn is_inventory_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == INVENTORY_EXT)
}

#[cfg(test)]
#[path = "inventory_tests.rs"]
mod tests;
