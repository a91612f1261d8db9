// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing setup: compact stderr output plus a plain log file in the state
//! directory. `RUST_LOG` overrides the default filter.

use std::io::IsTerminal;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_FILE: &str = "vsweep.log";

fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "info,vsweep=debug,vs_engine=debug,vs_adapters=debug"
    } else {
        "info"
    }
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must outlive every
/// log call. Without a usable state directory only stderr is written.
pub fn init(state_dir: &Path, verbose: bool) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .compact();

    let (file, guard) = match std::fs::create_dir_all(state_dir) {
        Ok(()) => {
            let appender = tracing_appender::rolling::never(state_dir, LOG_FILE);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_writer(writer).with_ansi(false)), Some(guard))
        }
        Err(e) => {
            eprintln!(
                "warning: cannot create log directory {}: {e}; logging to stderr only",
                state_dir.display()
            );
            (None, None)
        }
    };

    tracing_subscriber::registry().with(filter).with(console).with(file).init();
    guard
}
