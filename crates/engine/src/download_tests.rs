// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;
use tempfile::TempDir;
use vs_adapters::{FakeGlacierClient, GlacierCall};
use vs_core::{FakeClock, InventoryRecord, JobStatus};

#[tokio::test]
async fn download_writes_named_inventory() {
    let dir = TempDir::new().unwrap();
    let fake = FakeGlacierClient::new().with_inventory("photos", &["a1", "a2"]);
    let job = RetrievalJob::builder()
        .vault("photos")
        .job_id("JOB7")
        .status(JobStatus::Succeeded)
        .build();

    let out = download(&fake, &FakeClock::new(), dir.path(), &job).await.unwrap();

    assert_eq!(out.vault, "photos");
    assert_eq!(out.path, dir.path().join("photos_JOB7_20240101000000.json"));
    let record = InventoryRecord::load(&out.path).unwrap();
    assert_eq!(record.archives.len(), 2);
    assert!(matches!(
        &fake.calls()[0],
        GlacierCall::FetchJobOutput { job_id, .. } if job_id == "JOB7"
    ));
}

#[tokio::test]
async fn repeated_downloads_do_not_collide() {
    let dir = TempDir::new().unwrap();
    let fake = FakeGlacierClient::new();
    let clock = FakeClock::new();
    let job = RetrievalJob::builder().vault("v").job_id("J").build();

    let first = download(&fake, &clock, dir.path(), &job).await.unwrap();
    clock.advance(Duration::from_secs(1));
    let second = download(&fake, &clock, dir.path(), &job).await.unwrap();

    assert_ne!(first.path, second.path);
    assert!(first.path.exists());
    assert!(second.path.exists());
}

#[tokio::test]
async fn download_creates_missing_directory() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("inventories").join("2024");
    let job = RetrievalJob::builder().vault("v").build();
    let out = download(&FakeGlacierClient::new(), &FakeClock::new(), &nested, &job).await.unwrap();
    assert!(out.path.starts_with(&nested));
    assert!(out.path.exists());
}

#[tokio::test]
async fn fetch_failure_is_reported() {
    let dir = TempDir::new().unwrap();
    let fake = FakeGlacierClient::new().fail_fetch("v");
    let job = RetrievalJob::builder().vault("v").build();
    let err = download(&fake, &FakeClock::new(), dir.path(), &job).await.unwrap_err();
    assert!(matches!(err, SweepError::ExternalCall(_)));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
