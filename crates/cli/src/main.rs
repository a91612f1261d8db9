// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! vsweep: empty Glacier vaults by deleting every archive they hold

mod env;
mod exit_error;
mod logging;
mod run;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use exit_error::ExitError;
use std::path::PathBuf;
use std::time::Duration;
use vs_adapters::AwsCliClient;
use vs_engine::{SweepConfig, DEFAULT_CONCURRENCY, DEFAULT_POLL_INTERVAL};

#[derive(Parser, Debug)]
#[command(name = "vsweep", version, about = "Delete every archive from a list of Glacier vaults")]
struct Cli {
    /// Skip retrieval; delete from inventory files already in --dir
    #[arg(long)]
    delete_only: bool,

    /// Echo every aws call and its raw output
    #[arg(short, long)]
    verbose: bool,

    /// Vault list, one name per line
    #[arg(long, value_name = "FILE", default_value = "vaults.txt")]
    vaults: PathBuf,

    /// Directory inventory files are written to and resumed from
    #[arg(long, value_name = "DIR", default_value = ".")]
    dir: PathBuf,

    /// Seconds between retrieval status sweeps
    #[arg(long, value_name = "SECS")]
    poll_interval: Option<u64>,

    /// Maximum deletes in flight at once
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,
}

impl Cli {
    fn config(&self) -> SweepConfig {
        let poll_interval = self
            .poll_interval
            .map(Duration::from_secs)
            .or_else(env::poll_interval)
            .unwrap_or(DEFAULT_POLL_INTERVAL);
        let concurrency = self.concurrency.or_else(env::concurrency).unwrap_or(DEFAULT_CONCURRENCY);
        SweepConfig::new(&self.dir, &self.vaults)
            .poll_interval(poll_interval)
            .concurrency(concurrency)
    }
}

fn usage_error(e: env::ConfigError) -> ExitError {
    let usage = Cli::command().render_usage();
    ExitError::config(format!(
        "{e}\n\nSet {} and {} before running.\n\n{usage}",
        env::ACCOUNT_ID_VAR,
        env::REGION_VAR
    ))
}

async fn run(cli: Cli) -> Result<()> {
    let account_id = env::account_id().map_err(usage_error)?;
    let region = env::region().map_err(usage_error)?;

    let _guard = logging::init(&env::state_dir(), cli.verbose);
    let config = cli.config();
    let client = AwsCliClient::new(account_id, region).verbose(cli.verbose);
    tracing::debug!(?config, "starting");

    if cli.delete_only {
        run::resume(client, config).await
    } else {
        run::sweep(client, config).await
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        match err.downcast_ref::<ExitError>() {
            Some(exit) => {
                eprintln!("error: {}", exit.message);
                std::process::exit(exit.code);
            }
            None => {
                eprintln!("error: {err:#}");
                std::process::exit(1);
            }
        }
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
