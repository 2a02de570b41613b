// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Collaborator contracts consumed by authentication drivers.
//!
//! keygate performs no I/O of its own: user lookup, role lookup, token
//! persistence, and credential verification are all delegated to injected
//! implementations of the traits in this module. Implementations must be
//! `Send + Sync`; calls are awaited sequentially within a flow, so any
//! timeout policy belongs to the implementation or the caller.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::error::StoreResult;
use crate::types::{Role, RoleId, Token, User};

// =============================================================================
// Lookup & Storage Services
// =============================================================================

/// Read access to the user store.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Finds a single user by ID.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` - No user with the given ID exists
    /// - `StoreError::Unavailable` - The store is failing
    async fn find_one_by_id(&self, id: &str) -> StoreResult<User>;
}

/// Read access to the role store.
#[async_trait]
pub trait RoleService: Send + Sync {
    /// Finds the roles with the given IDs.
    ///
    /// The returned sequence preserves the order of `ids`; IDs that resolve
    /// to nothing are simply absent from the result.
    ///
    /// # Errors
    ///
    /// - `StoreError::Unavailable` - The store is failing
    async fn find_by_ids(&self, ids: &[RoleId]) -> StoreResult<Vec<Role>>;
}

/// Write access to the token store.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Persists an issued token.
    ///
    /// # Errors
    ///
    /// - `StoreError::Unavailable` - The store is failing
    async fn store(&self, token: &Token) -> StoreResult<()>;
}

// =============================================================================
// Login Handler
// =============================================================================

/// A credential verification failure reported by a [`LoginHandler`].
#[derive(Debug, Error)]
#[error("{message}")]
pub struct LoginError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl LoginError {
    /// Creates a new login error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new login error with an underlying cause.
    pub fn with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// The conventional rejection for credentials that do not verify.
    pub fn invalid_credentials() -> Self {
        Self::new("invalid credentials")
    }
}

/// Verifies a username/password pair and resolves it to a user.
///
/// Credential verification is entirely the handler's responsibility —
/// keygate never sees password hashes. Any async closure with the matching
/// shape is a handler:
///
/// ```
/// use keygate_core::services::{LoginError, LoginHandler};
/// use keygate_core::types::User;
///
/// let handler = |username: String, _password: String| async move {
///     if username == "alice" {
///         Ok(User::new("u1", username, vec![]))
///     } else {
///         Err(LoginError::invalid_credentials())
///     }
/// };
/// # let _: &dyn LoginHandler = &handler;
/// ```
#[async_trait]
pub trait LoginHandler: Send + Sync {
    /// Verifies the credentials and returns the matching user.
    async fn login(&self, username: &str, password: &str) -> Result<User, LoginError>;
}

#[async_trait]
impl<F, Fut> LoginHandler for F
where
    F: Fn(String, String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<User, LoginError>> + Send + 'static,
{
    async fn login(&self, username: &str, password: &str) -> Result<User, LoginError> {
        (self)(username.to_string(), password.to_string()).await
    }
}

// =============================================================================
// Dependencies
// =============================================================================

/// The collaborators every authentication driver requires.
///
/// All fields are mandatory: a driver cannot be constructed with a missing
/// collaborator, so "missing dependency" is a construction-time impossibility
/// rather than a per-call check.
#[derive(Clone)]
pub struct Dependencies {
    users: Arc<dyn UserService>,
    roles: Arc<dyn RoleService>,
    tokens: Arc<dyn TokenStore>,
}

impl Dependencies {
    /// Creates a new dependency set.
    pub fn new(
        users: Arc<dyn UserService>,
        roles: Arc<dyn RoleService>,
        tokens: Arc<dyn TokenStore>,
    ) -> Self {
        Self { users, roles, tokens }
    }

    /// Returns the user service.
    pub fn users(&self) -> &Arc<dyn UserService> {
        &self.users
    }

    /// Returns the role service.
    pub fn roles(&self) -> &Arc<dyn RoleService> {
        &self.roles
    }

    /// Returns the token store.
    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }
}

impl std::fmt::Debug for Dependencies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dependencies").finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================
