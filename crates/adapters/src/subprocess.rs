// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess execution for CLI-backed adapters.
//!
//! No timeout is applied: a hung call holds its caller until it returns.

use crate::glacier::ClientError;
use std::ffi::OsStr;

/// Captured output of a successful command
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Render a command line for logs and error messages.
pub fn display_command<S: AsRef<OsStr>>(program: &OsStr, args: &[S]) -> String {
    let mut parts = vec![program.to_string_lossy().into_owned()];
    parts.extend(args.iter().map(|a| a.as_ref().to_string_lossy().into_owned()));
    parts.join(" ")
}

/// Run a command to completion, mapping spawn failures and non-zero exits to
/// [`ClientError`].
///
/// With `echo` set, the command line and its raw output are logged at info
/// level; otherwise at debug.
pub async fn run_command<S: AsRef<OsStr>>(
    program: &OsStr,
    args: &[S],
    echo: bool,
) -> Result<CommandOutput, ClientError> {
    let command = display_command(program, args);
    if echo {
        tracing::info!(%command, "running");
    } else {
        tracing::debug!(%command, "running");
    }

    let output = tokio::process::Command::new(program)
        .args(args)
        .stdin(std::process::Stdio::null())
        .output()
        .await
        .map_err(|source| ClientError::Spawn { command: command.clone(), source })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    let code = output.status.code().unwrap_or(-1);
    if echo {
        tracing::info!(%command, code, %stdout, %stderr, "command output");
    } else {
        tracing::debug!(%command, code, %stdout, %stderr, "command output");
    }

    if !output.status.success() {
        return Err(ClientError::Exit { command, code, stderr: stderr.trim().to_string() });
    }
    Ok(CommandOutput { stdout, stderr })
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
