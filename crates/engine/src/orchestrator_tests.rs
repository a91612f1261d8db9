// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;
use tempfile::TempDir;
use vs_adapters::{FakeGlacierClient, GlacierCall};
use vs_core::FakeClock;

fn orchestrator(
    fake: &FakeGlacierClient,
    dir: &TempDir,
) -> Orchestrator<FakeGlacierClient, FakeClock> {
    let config = SweepConfig::new(dir.path(), dir.path().join("vaults.txt"))
        .poll_interval(Duration::from_secs(60))
        .reap_interval(Duration::from_secs(1));
    Orchestrator::new(Arc::new(fake.clone()), FakeClock::new(), config)
}

fn vaults(names: &[&str]) -> Vec<VaultName> {
    names.iter().map(|n| VaultName::new(*n)).collect()
}

fn polls_for(fake: &FakeGlacierClient, vault: &str) -> usize {
    fake.calls()
        .iter()
        .filter(|c| matches!(c, GlacierCall::ListJobs { vault: v } if v == vault))
        .count()
}

#[tokio::test(start_paused = true)]
async fn succeeded_vault_is_emptied_and_failed_vault_is_reported() {
    let dir = TempDir::new().unwrap();
    let fake = FakeGlacierClient::new()
        .with_inventory("a", &["a1", "a2", "a3"])
        .pending_polls("a", 2)
        .with_failed_job("b", "Inventory retrieval failed: vault locked");

    let summary = orchestrator(&fake, &dir).run(&vaults(&["a", "b"])).await;

    assert_eq!(summary.downloads.len(), 1);
    let file_name = summary.downloads[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(file_name.starts_with("a_job-a-1_"), "{file_name}");
    assert!(summary.downloads[0].exists());

    assert_eq!(summary.batches.len(), 1);
    assert_eq!(summary.batches[0].vault, "a");
    assert_eq!(summary.batches[0].succeeded, 3);
    assert_eq!(summary.batches[0].failed, 0);
    assert_eq!(fake.deletes_for("a").len(), 3);

    assert!(fake.deletes_for("b").is_empty());
    assert!(!fake.calls().iter().any(
        |c| matches!(c, GlacierCall::FetchJobOutput { vault, .. } if vault == "b")
    ));
    assert!(summary.initiation_failures.is_empty());
    assert_eq!(summary.failed_jobs.len(), 1);
    assert_eq!(summary.failed_jobs[0].vault, "b");
    assert_eq!(summary.failed_jobs[0].message, "Inventory retrieval failed: vault locked");
}

#[tokio::test(start_paused = true)]
async fn failed_initiation_excludes_vault() {
    let dir = TempDir::new().unwrap();
    let fake = FakeGlacierClient::new().fail_initiate("a").with_inventory("b", &["b1"]);

    let summary = orchestrator(&fake, &dir).run(&vaults(&["a", "b"])).await;

    assert_eq!(summary.initiation_failures.len(), 1);
    assert_eq!(summary.initiation_failures[0].vault, "a");
    assert_eq!(summary.initiation_failures[0].job_id, None);
    assert_eq!(polls_for(&fake, "a"), 0);
    assert_eq!(summary.succeeded(), 1);
}

#[tokio::test(start_paused = true)]
async fn unlisted_job_keeps_being_polled() {
    let dir = TempDir::new().unwrap();
    let fake = FakeGlacierClient::new().with_inventory("a", &["a1"]).hidden_polls("a", 3);

    let summary = orchestrator(&fake, &dir).run(&vaults(&["a"])).await;

    assert_eq!(polls_for(&fake, "a"), 4);
    assert_eq!(summary.succeeded(), 1);
}

#[tokio::test(start_paused = true)]
async fn poll_error_is_retried_next_sweep() {
    let dir = TempDir::new().unwrap();
    let fake = FakeGlacierClient::new().with_inventory("a", &["a1", "a2"]).fail_list("a", 2);

    let summary = orchestrator(&fake, &dir).run(&vaults(&["a"])).await;

    assert_eq!(polls_for(&fake, "a"), 3);
    assert_eq!(summary.succeeded(), 2);
    assert!(summary.failed_jobs.is_empty());
}

#[tokio::test(start_paused = true)]
async fn download_failure_skips_deletion() {
    let dir = TempDir::new().unwrap();
    let fake = FakeGlacierClient::new().with_inventory("a", &["a1"]).fail_fetch("a");

    let summary = orchestrator(&fake, &dir).run(&vaults(&["a"])).await;

    assert_eq!(summary.download_failures.len(), 1);
    assert!(summary.download_failures[0].job_id.is_some());
    assert!(summary.batches.is_empty());
    assert!(fake.deletes_for("a").is_empty());
}

#[tokio::test(start_paused = true)]
async fn delete_failures_are_counted_not_fatal() {
    let dir = TempDir::new().unwrap();
    let fake = FakeGlacierClient::new()
        .with_inventory("a", &["a1", "a2", "a3"])
        .with_inventory("b", &["b1", "b2"])
        .fail_delete("a2");

    let summary = orchestrator(&fake, &dir).run(&vaults(&["a", "b"])).await;

    assert_eq!(summary.batches.len(), 2);
    assert_eq!(summary.succeeded(), 4);
    assert_eq!(summary.failed(), 1);
}

#[tokio::test(start_paused = true)]
async fn run_waits_for_slow_batches() {
    let dir = TempDir::new().unwrap();
    let ids: Vec<String> = (0..64).map(|i| format!("x{i}")).collect();
    let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    let fake = FakeGlacierClient::new()
        .with_inventory("a", &id_refs)
        .delete_latency(Duration::from_secs(5));

    let orch = orchestrator(&fake, &dir);
    let summary = orch.run(&vaults(&["a"])).await;

    assert_eq!(summary.succeeded(), 64);
    assert!(orch.pool().peak_in_flight() <= 32);
}

#[tokio::test(start_paused = true)]
async fn empty_vault_list_finishes_without_calls() {
    let dir = TempDir::new().unwrap();
    let fake = FakeGlacierClient::new();
    let summary = orchestrator(&fake, &dir).run(&[]).await;
    assert!(fake.calls().is_empty());
    assert!(summary.batches.is_empty());
}
