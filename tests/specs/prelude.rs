// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Helpers shared by the specs.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A `vsweep` invocation with a scrubbed environment.
pub struct CliBuilder {
    cmd: assert_cmd::Command,
}

/// Start a `vsweep` invocation.
///
/// AWS credentials and every `VSWEEP_*` override are removed so each spec
/// states exactly the configuration it relies on.
pub fn cli() -> CliBuilder {
    let mut cmd = assert_cmd::Command::cargo_bin("vsweep").unwrap();
    for var in [
        "AWS_ACCOUNT_ID",
        "AWS_REGION",
        "VSWEEP_STATE_DIR",
        "VSWEEP_POLL_INTERVAL_SECS",
        "VSWEEP_CONCURRENCY",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    CliBuilder { cmd }
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Run inside `project`, with credentials set and logs kept in the project.
    pub fn in_project(mut self, project: &Project) -> Self {
        self.cmd
            .current_dir(project.path())
            .env("AWS_ACCOUNT_ID", "123456789012")
            .env("AWS_REGION", "us-east-1")
            .env("VSWEEP_STATE_DIR", project.path().join(".state"));
        self
    }

    /// Run and require exit code 0.
    pub fn passes(self) -> RunOutput {
        self.exits_with(0)
    }

    /// Run and require the given exit code.
    pub fn exits_with(mut self, code: i32) -> RunOutput {
        let output = self.cmd.output().unwrap();
        let out = RunOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        assert_eq!(
            output.status.code(),
            Some(code),
            "unexpected exit status\nstdout:\n{}\nstderr:\n{}",
            out.stdout,
            out.stderr
        );
        out
    }
}

/// Captured output of a finished run
pub struct RunOutput {
    pub stdout: String,
    pub stderr: String,
}

impl RunOutput {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout.contains(needle), "stdout missing {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr.contains(needle), "stderr missing {needle:?}:\n{}", self.stderr);
        self
    }

    pub fn stderr_lacks(self, needle: &str) -> Self {
        assert!(!self.stderr.contains(needle), "stderr has {needle:?}:\n{}", self.stderr);
        self
    }
}

/// Scratch working directory for a run
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self { dir: TempDir::new().unwrap() }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the project root, creating parent dirs.
    pub fn file(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// Write an inventory file listing the given archive ids.
    pub fn inventory(&self, rel: &str, ids: &[&str]) -> PathBuf {
        let list: Vec<String> =
            ids.iter().map(|id| format!(r#"{{"ArchiveId":"{id}"}}"#)).collect();
        self.file(rel, &format!(r#"{{"ArchiveList":[{}]}}"#, list.join(",")))
    }
}
