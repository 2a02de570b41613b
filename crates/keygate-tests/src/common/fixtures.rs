// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Fixtures
//!
//! Pre-built test data for consistent and reproducible testing.
//!
//! ## Design Principles
//!
//! - Fixtures are immutable and thread-safe
//! - Each fixture represents a realistic scenario
//! - Fixtures can be composed for complex test scenarios

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use keygate_core::types::{Ability, Role, RoleId, User};
use keygate_token::{AuthConfig, TokenService};

/// The shared HMAC secret used across the integration tests.
pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// A fixed instant for deterministic claims.
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp")
}

// =============================================================================
// Auth Fixtures
// =============================================================================

/// Fixture providing standard token configurations and services.
pub struct AuthFixtures;

impl AuthFixtures {
    /// An HS256 configuration with a one hour lifetime.
    pub fn hmac_config() -> AuthConfig {
        Self::hmac_config_with(Duration::from_secs(3600), false)
    }

    /// An HS256 configuration with the given lifetime and validation switch.
    pub fn hmac_config_with(expiration: Duration, skip_claims_validation: bool) -> AuthConfig {
        AuthConfig::hmac("HS256", TEST_SECRET, expiration, skip_claims_validation)
            .expect("valid HMAC config")
    }

    /// An RS256 configuration with placeholder PEMs.
    ///
    /// The key material passes shape validation but is not usable for real
    /// signing; intended for confusion-guard and error-path tests.
    pub fn rsa_config_with_placeholder_keys() -> AuthConfig {
        AuthConfig::rsa(
            "RS256",
            b"placeholder private pem".to_vec(),
            b"placeholder public pem".to_vec(),
            Duration::from_secs(3600),
            false,
        )
        .expect("valid RSA config shape")
    }

    /// A token service with a fixed clock and sequential claims IDs.
    pub fn deterministic_token_service(config: AuthConfig) -> TokenService {
        TokenService::new(config)
            .with_clock(fixed_now)
            .with_claims_id_generator(sequential_claims_ids())
    }
}

/// A claims-ID generator producing `"claims-1"`, `"claims-2"`, ...
pub fn sequential_claims_ids() -> impl Fn() -> String + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(0));
    move || format!("claims-{}", counter.fetch_add(1, Ordering::SeqCst) + 1)
}

// =============================================================================
// User Fixtures
// =============================================================================

/// Fixture providing standard users.
pub struct UserFixtures;

impl UserFixtures {
    /// A user holding the reader and editor roles, in that order.
    pub fn alice() -> User {
        User::new(
            "user-alice",
            "alice",
            vec![RoleId::new("reader"), RoleId::new("editor")],
        )
    }

    /// A user with no roles at all.
    pub fn bob() -> User {
        User::new("user-bob", "bob", vec![])
    }

    /// A user whose single role grants no abilities.
    pub fn carol() -> User {
        User::new("user-carol", "carol", vec![RoleId::new("idle")])
    }
}

// =============================================================================
// Role Fixtures
// =============================================================================

/// Fixture providing standard roles.
pub struct RoleFixtures;

impl RoleFixtures {
    /// Read access to documents.
    pub fn reader() -> Role {
        Role::new("reader", vec![Ability::new("read", "doc*")])
    }

    /// Write access to documents plus report publishing.
    pub fn editor() -> Role {
        Role::new(
            "editor",
            vec![
                Ability::new("write", "doc*"),
                Ability::new("{read,write}", "report-*"),
            ],
        )
    }

    /// Unrestricted access.
    pub fn admin() -> Role {
        Role::new("admin", vec![Ability::new("*", "*")])
    }

    /// A role with no abilities.
    pub fn idle() -> Role {
        Role::new("idle", vec![])
    }

    /// A role whose only abilities are inert (empty patterns).
    pub fn broken() -> Role {
        Role::new(
            "broken",
            vec![Ability::new("", "doc1"), Ability::new("read", "")],
        )
    }

    /// The standard role set.
    pub fn all() -> Vec<Role> {
        vec![
            Self::reader(),
            Self::editor(),
            Self::admin(),
            Self::idle(),
            Self::broken(),
        ]
    }
}
