// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;
use std::sync::Arc;

#[test]
fn eta_is_zero_without_successes() {
    let start = Instant::now();
    let progress = BatchProgress::new(10, start);
    let snap = progress.record(false, start + Duration::from_secs(90));
    assert_eq!(snap.secs_per_success(), 0.0);
    assert_eq!(snap.eta(), Duration::ZERO);
    assert_eq!(format_hms(snap.eta()), "0h0m0s");
}

#[test]
fn eta_projects_elapsed_per_success_over_remaining() {
    let start = Instant::now();
    let progress = BatchProgress::new(10, start);
    progress.record(true, start);
    let snap = progress.record(true, start + Duration::from_secs(20));
    // 20s / 2 successes = 10s each, 8 remaining
    assert_eq!(snap.remaining(), 8);
    assert_eq!(snap.eta(), Duration::from_secs(80));
}

#[test]
fn eta_is_zero_when_done() {
    let start = Instant::now();
    let progress = BatchProgress::new(1, start);
    let snap = progress.record(true, start + Duration::from_secs(5));
    assert_eq!(snap.remaining(), 0);
    assert_eq!(snap.eta(), Duration::ZERO);
    assert_eq!(snap.percent(), 100.0);
}

#[test]
fn empty_batch_reports_complete() {
    let start = Instant::now();
    let snap = BatchProgress::new(0, start).snapshot(start);
    assert_eq!(snap.percent(), 100.0);
    assert_eq!(snap.eta(), Duration::ZERO);
}

#[test]
fn display_shows_counts_split_and_eta() {
    let start = Instant::now();
    let progress = BatchProgress::new(4, start);
    progress.record(true, start);
    let snap = progress.record(false, start + Duration::from_secs(3600));
    assert_eq!(
        snap.to_string(),
        "2/4 (50.0%) ok=1 failed=1 rate=3600.00s/archive eta=2h0m0s"
    );
}

#[test]
fn concurrent_records_keep_counts_consistent() {
    let start = Instant::now();
    let progress = Arc::new(BatchProgress::new(800, start));
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let progress = Arc::clone(&progress);
            std::thread::spawn(move || {
                for i in 0..100 {
                    let snap = progress.record((i + t) % 3 != 0, Instant::now());
                    assert_eq!(snap.completed, snap.succeeded + snap.failed);
                    assert!(snap.completed <= snap.total);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    let snap = progress.snapshot(Instant::now());
    assert_eq!(snap.completed, 800);
    assert_eq!(snap.succeeded + snap.failed, 800);
}

proptest! {
    #[test]
    fn snapshots_respect_invariants(outcomes in proptest::collection::vec(any::<bool>(), 0..200), secs in 0u64..100_000) {
        let start = Instant::now();
        let total = outcomes.len() as u64;
        let progress = BatchProgress::new(total, start);
        for ok in &outcomes {
            let snap = progress.record(*ok, start + Duration::from_secs(secs));
            prop_assert_eq!(snap.completed, snap.succeeded + snap.failed);
            prop_assert!(snap.completed <= snap.total);
            prop_assert!(snap.percent() <= 100.0);
            prop_assert!(snap.eta() <= Duration::from_secs(secs.saturating_mul(total.max(1))));
        }
    }
}
