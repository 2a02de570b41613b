// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authentication driver abstraction.
//!
//! This module provides the core trait that every authentication driver
//! implements, giving callers a single interface regardless of how
//! credentials are verified.
//!
//! # Design Principles
//!
//! - **Mechanism Agnostic**: All drivers expose the same four operations
//! - **Async First**: Collaborator I/O is awaited, never blocked on
//! - **Thread Safe**: Drivers are `Send + Sync` and immutable after
//!   construction
//! - **Extensible**: New authentication mechanisms are added by implementing
//!   this trait in their own crate

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::DriverResult;
use crate::types::{Token, User};

// =============================================================================
// AuthDriver Trait
// =============================================================================

/// The core trait that all authentication drivers must implement.
///
/// A driver orchestrates the full lifecycle of an authenticated session:
/// verifying credentials, issuing and persisting signed tokens, resolving a
/// presented token back to a user, and deciding whether that user may act.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`. Drivers hold no mutable state,
/// so a single instance can serve concurrent callers.
#[async_trait]
pub trait AuthDriver: Send + Sync {
    /// Verifies the given credentials and resolves them to a user.
    ///
    /// Credential keys are driver-specific; the password driver requires
    /// `"username"` and `"password"`.
    ///
    /// # Errors
    ///
    /// - `DriverError::MissingField` - A required credential key is absent;
    ///   the underlying handler is never invoked in this case
    /// - `DriverError::Login` - The credentials did not verify
    async fn login(&self, credentials: &HashMap<String, String>) -> DriverResult<User>;

    /// Issues a signed token for the user and persists it.
    ///
    /// # Errors
    ///
    /// - `DriverError::Token` - Signing failed; nothing was stored
    /// - `DriverError::Storage` - The token was signed but could not be
    ///   persisted
    async fn issue_token(&self, user: &User) -> DriverResult<Token>;

    /// Resolves a presented token string to the user it was issued for.
    ///
    /// # Errors
    ///
    /// - `DriverError::Token` - The token could not be parsed or verified
    /// - `DriverError::NotFound` - The token is valid but its user no longer
    ///   exists
    /// - `DriverError::Dependency` - The user store is failing
    async fn authenticate(&self, token: &str) -> DriverResult<User>;

    /// Decides whether the user may take `action` on `object`.
    ///
    /// # Errors
    ///
    /// - `DriverError::Authorization` - The user has no abilities, no ability
    ///   matched, or role resolution failed
    async fn authorize(&self, user: &User, action: &str, object: &str) -> DriverResult<()>;
}
