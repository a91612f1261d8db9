// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const ACCOUNT_ID_VAR: &str = "AWS_ACCOUNT_ID";
pub const REGION_VAR: &str = "AWS_REGION";

/// Missing required configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(ConfigError::Missing(name))
}

/// Account the vaults belong to (`AWS_ACCOUNT_ID`, required)
pub fn account_id() -> Result<String, ConfigError> {
    required(ACCOUNT_ID_VAR)
}

/// Region the vaults live in (`AWS_REGION`, required)
pub fn region() -> Result<String, ConfigError> {
    required(REGION_VAR)
}

/// Poll interval override (`VSWEEP_POLL_INTERVAL_SECS`)
pub fn poll_interval() -> Option<Duration> {
    std::env::var("VSWEEP_POLL_INTERVAL_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_secs)
}

/// Delete concurrency override (`VSWEEP_CONCURRENCY`)
pub fn concurrency() -> Option<usize> {
    std::env::var("VSWEEP_CONCURRENCY").ok().and_then(|s| s.parse::<usize>().ok())
}

/// Resolve state directory: VSWEEP_STATE_DIR > XDG_STATE_HOME/vsweep >
/// platform state dir > ./.vsweep
pub fn state_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("VSWEEP_STATE_DIR").filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    if let Some(xdg) = std::env::var_os("XDG_STATE_HOME").filter(|d| !d.is_empty()) {
        return PathBuf::from(xdg).join("vsweep");
    }
    dirs::state_dir()
        .map(|d| d.join("vsweep"))
        .unwrap_or_else(|| PathBuf::from(".vsweep"))
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
