// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Adapters for external I/O: the cold-storage service client

pub mod glacier;
pub mod subprocess;

pub use glacier::{AwsCliClient, ClientError, GlacierClient, JobDescription, StatusCode};

// Test support
#[cfg(any(test, feature = "test-support"))]
pub use glacier::{FakeGlacierClient, GlacierCall};
