// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deletion batch progress counters.
//!
//! One [`BatchProgress`] is shared by every worker of a single deletion
//! batch. All counters sit behind one lock so a recorded outcome and the
//! snapshot taken with it are consistent: `completed == succeeded + failed`
//! holds in every snapshot.

use crate::time_fmt::format_hms;
use parking_lot::Mutex;
use std::fmt;
use std::time::{Duration, Instant};

#[derive(Debug, Default, Clone, Copy)]
struct Counts {
    completed: u64,
    succeeded: u64,
    failed: u64,
}

/// Shared counters for one deletion batch
#[derive(Debug)]
pub struct BatchProgress {
    total: u64,
    started: Instant,
    counts: Mutex<Counts>,
}

impl BatchProgress {
    pub fn new(total: u64, started: Instant) -> Self {
        Self { total, started, counts: Mutex::new(Counts::default()) }
    }

    /// Record one finished delete and return the counters as of that moment.
    pub fn record(&self, succeeded: bool, now: Instant) -> ProgressSnapshot {
        let mut counts = self.counts.lock();
        counts.completed += 1;
        if succeeded {
            counts.succeeded += 1;
        } else {
            counts.failed += 1;
        }
        self.snapshot_of(*counts, now)
    }

    pub fn snapshot(&self, now: Instant) -> ProgressSnapshot {
        let counts = *self.counts.lock();
        self.snapshot_of(counts, now)
    }

    fn snapshot_of(&self, counts: Counts, now: Instant) -> ProgressSnapshot {
        ProgressSnapshot {
            total: self.total,
            completed: counts.completed,
            succeeded: counts.succeeded,
            failed: counts.failed,
            elapsed: now.saturating_duration_since(self.started),
        }
    }
}

/// Point-in-time view of a batch's counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub total: u64,
    pub completed: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub elapsed: Duration,
}

impl ProgressSnapshot {
    pub fn remaining(&self) -> u64 {
        self.total.saturating_sub(self.completed)
    }

    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.completed as f64 * 100.0 / self.total as f64
    }

    /// Observed seconds per successful delete; zero until the first success.
    pub fn secs_per_success(&self) -> f64 {
        if self.succeeded == 0 {
            return 0.0;
        }
        self.elapsed.as_secs_f64() / self.succeeded as f64
    }

    /// Projected time to finish the remaining deletes at the observed rate.
    pub fn eta(&self) -> Duration {
        let secs = self.secs_per_success() * self.remaining() as f64;
        if secs.is_finite() && secs > 0.0 {
            Duration::from_secs_f64(secs)
        } else {
            Duration::ZERO
        }
    }
}

impl fmt::Display for ProgressSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} ({:.1}%) ok={} failed={} rate={:.2}s/archive eta={}",
            self.completed,
            self.total,
            self.percent(),
            self.succeeded,
            self.failed,
            self.secs_per_success(),
            format_hms(self.eta()),
        )
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
