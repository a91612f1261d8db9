// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `GlacierClient` backed by the `aws` command-line tool.

use super::{ClientError, GlacierClient, JobDescription, StatusCode};
use crate::subprocess::{display_command, run_command};
use async_trait::async_trait;
use serde::Deserialize;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use vs_core::{ArchiveId, JobId, VaultName};

const INVENTORY_JOB_PARAMETERS: &str = r#"{"Type":"inventory-retrieval"}"#;

#[derive(Deserialize)]
struct InitiateJobResponse {
    #[serde(rename = "jobId")]
    job_id: String,
}

#[derive(Deserialize)]
struct ListJobsResponse {
    #[serde(rename = "JobList", default)]
    job_list: Vec<JobListEntry>,
}

#[derive(Deserialize)]
struct JobListEntry {
    #[serde(rename = "JobId")]
    job_id: String,
    #[serde(rename = "Completed", default)]
    completed: bool,
    #[serde(rename = "StatusCode", default)]
    status_code: String,
    #[serde(rename = "StatusMessage", default)]
    status_message: Option<String>,
}

/// Storage client that shells out to `aws glacier …`
#[derive(Debug, Clone)]
pub struct AwsCliClient {
    program: PathBuf,
    account_id: String,
    region: String,
    verbose: bool,
}

impl AwsCliClient {
    pub fn new(account_id: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            program: PathBuf::from("aws"),
            account_id: account_id.into(),
            region: region.into(),
            verbose: false,
        }
    }

    vs_core::setters! {
        into {
            program: PathBuf,
        }
        set {
            verbose: bool,
        }
    }

    /// Arguments shared by every vault-scoped `aws glacier` call.
    fn args(&self, operation: &str, vault: &VaultName) -> Vec<OsString> {
        vec![
            "glacier".into(),
            operation.into(),
            "--account-id".into(),
            self.account_id.clone().into(),
            "--region".into(),
            self.region.clone().into(),
            "--vault-name".into(),
            vault.as_str().into(),
            "--output".into(),
            "json".into(),
        ]
    }

    async fn run(&self, args: &[OsString]) -> Result<String, ClientError> {
        let out = run_command(self.program.as_os_str(), args, self.verbose).await?;
        Ok(out.stdout)
    }

    fn command_line(&self, args: &[OsString]) -> String {
        display_command(self.program.as_os_str(), args)
    }
}

fn parse_json<'a, T: Deserialize<'a>>(command: String, stdout: &'a str) -> Result<T, ClientError> {
    serde_json::from_str(stdout).map_err(|e| ClientError::Parse { command, message: e.to_string() })
}

/// Parse `aws glacier initiate-job` output.
pub(crate) fn parse_initiate_response(command: String, stdout: &str) -> Result<JobId, ClientError> {
    let resp: InitiateJobResponse = parse_json(command.clone(), stdout)?;
    if resp.job_id.is_empty() {
        return Err(ClientError::Parse { command, message: "empty jobId".to_string() });
    }
    Ok(JobId::new(resp.job_id))
}

/// Parse `aws glacier list-jobs` output.
pub(crate) fn parse_list_response(
    command: String,
    stdout: &str,
) -> Result<Vec<JobDescription>, ClientError> {
    let resp: ListJobsResponse = parse_json(command, stdout)?;
    Ok(resp
        .job_list
        .into_iter()
        .map(|entry| JobDescription {
            job_id: JobId::new(entry.job_id),
            completed: entry.completed,
            status_code: StatusCode::parse(&entry.status_code),
            status_message: entry.status_message.unwrap_or_default(),
        })
        .collect())
}

#[async_trait]
impl GlacierClient for AwsCliClient {
    async fn initiate_inventory_job(&self, vault: &VaultName) -> Result<JobId, ClientError> {
        let mut args = self.args("initiate-job", vault);
        args.push("--job-parameters".into());
        args.push(INVENTORY_JOB_PARAMETERS.into());
        let stdout = self.run(&args).await?;
        parse_initiate_response(self.command_line(&args), &stdout)
    }

    async fn list_jobs(&self, vault: &VaultName) -> Result<Vec<JobDescription>, ClientError> {
        let args = self.args("list-jobs", vault);
        let stdout = self.run(&args).await?;
        parse_list_response(self.command_line(&args), &stdout)
    }

    async fn fetch_job_output(
        &self,
        vault: &VaultName,
        job_id: &JobId,
        dest: &Path,
    ) -> Result<(), ClientError> {
        let mut args = self.args("get-job-output", vault);
        args.push("--job-id".into());
        args.push(job_id.as_str().into());
        args.push(dest.as_os_str().to_owned());
        self.run(&args).await?;
        Ok(())
    }

    async fn delete_archive(
        &self,
        vault: &VaultName,
        archive_id: &ArchiveId,
    ) -> Result<(), ClientError> {
        let mut args = self.args("delete-archive", vault);
        // `=` form: archive ids may start with `-`
        let mut flag = OsString::from("--archive-id=");
        flag.push(OsStr::new(archive_id.as_str()));
        args.push(flag);
        self.run(&args).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "aws_cli_tests.rs"]
mod tests;
