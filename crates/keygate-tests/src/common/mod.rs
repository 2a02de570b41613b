// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Common Test Utilities
//!
//! Shared utilities, fixtures, and helpers for the keygate integration
//! tests.
//!
//! ## Module Structure
//!
//! - `mocks`: In-memory collaborator implementations for testing
//! - `fixtures`: Pre-built test data and configurations
//! - `builders`: Builder patterns for constructing test objects

pub mod builders;
pub mod fixtures;
pub mod mocks;

// Re-exports for convenience
pub use builders::*;
pub use fixtures::*;
pub use mocks::*;

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Initialize test logging. Call this at the start of each test module.
pub fn init_test_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| {
                        EnvFilter::new("warn,keygate_rbac=debug,keygate_password=debug")
                    }),
            )
            .with_test_writer()
            .init();
    });
}
