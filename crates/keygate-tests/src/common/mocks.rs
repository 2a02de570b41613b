// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Mock Implementations
//!
//! In-memory collaborator implementations for testing keygate components in
//! isolation.
//!
//! ## Design Principles
//!
//! - Configurable behavior for different test scenarios
//! - Recording of interactions for verification
//! - Thread-safe for concurrent testing
//! - Easy to set up error injection

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use keygate_core::error::{StoreError, StoreResult};
use keygate_core::services::{LoginError, LoginHandler, RoleService, TokenStore, UserService};
use keygate_core::types::{Role, RoleId, Token, User};

// =============================================================================
// MemoryUserService
// =============================================================================

/// An in-memory user store with failure injection.
pub struct MemoryUserService {
    users: RwLock<HashMap<String, User>>,
    fail_all: AtomicBool,
    find_count: AtomicU64,
}

impl MemoryUserService {
    /// Creates an empty user store.
    pub fn new() -> Self {
        Self::with_users(Vec::new())
    }

    /// Creates a user store seeded with the given users.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let users = users
            .into_iter()
            .map(|user| (user.id().to_string(), user))
            .collect();
        Self {
            users: RwLock::new(users),
            fail_all: AtomicBool::new(false),
            find_count: AtomicU64::new(0),
        }
    }

    /// Inserts a user.
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id().to_string(), user);
    }

    /// Removes a user by ID.
    pub async fn remove(&self, id: &str) {
        self.users.write().await.remove(id);
    }

    /// Makes every lookup fail with `StoreError::Unavailable`.
    pub fn fail_all(&self, fail: bool) {
        self.fail_all.store(fail, Ordering::SeqCst);
    }

    /// Returns the number of lookups performed.
    pub fn find_count(&self) -> u64 {
        self.find_count.load(Ordering::SeqCst)
    }
}

impl Default for MemoryUserService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserService for MemoryUserService {
    async fn find_one_by_id(&self, id: &str) -> StoreResult<User> {
        self.find_count.fetch_add(1, Ordering::SeqCst);

        if self.fail_all.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("user store offline"));
        }

        self.users
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("user", id))
    }
}

// =============================================================================
// MemoryRoleService
// =============================================================================

/// An in-memory role store with failure injection.
pub struct MemoryRoleService {
    roles: RwLock<HashMap<RoleId, Role>>,
    fail_all: AtomicBool,
    find_count: AtomicU64,
}

impl MemoryRoleService {
    /// Creates an empty role store.
    pub fn new() -> Self {
        Self::with_roles(Vec::new())
    }

    /// Creates a role store seeded with the given roles.
    pub fn with_roles(roles: impl IntoIterator<Item = Role>) -> Self {
        let roles = roles
            .into_iter()
            .map(|role| (role.id().clone(), role))
            .collect();
        Self {
            roles: RwLock::new(roles),
            fail_all: AtomicBool::new(false),
            find_count: AtomicU64::new(0),
        }
    }

    /// Inserts a role.
    pub async fn insert(&self, role: Role) {
        self.roles.write().await.insert(role.id().clone(), role);
    }

    /// Makes every lookup fail with `StoreError::Unavailable`.
    pub fn fail_all(&self, fail: bool) {
        self.fail_all.store(fail, Ordering::SeqCst);
    }

    /// Returns the number of lookups performed.
    pub fn find_count(&self) -> u64 {
        self.find_count.load(Ordering::SeqCst)
    }
}

impl Default for MemoryRoleService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoleService for MemoryRoleService {
    async fn find_by_ids(&self, ids: &[RoleId]) -> StoreResult<Vec<Role>> {
        self.find_count.fetch_add(1, Ordering::SeqCst);

        if self.fail_all.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("role store offline"));
        }

        let roles = self.roles.read().await;
        // Preserve the requested order; unresolved IDs are simply absent.
        Ok(ids.iter().filter_map(|id| roles.get(id).cloned()).collect())
    }
}

// =============================================================================
// MemoryTokenStore
// =============================================================================

/// An in-memory token store with failure injection.
pub struct MemoryTokenStore {
    tokens: RwLock<Vec<Token>>,
    fail_all: AtomicBool,
    store_count: AtomicU64,
}

impl MemoryTokenStore {
    /// Creates an empty token store.
    pub fn new() -> Self {
        Self {
            tokens: RwLock::new(Vec::new()),
            fail_all: AtomicBool::new(false),
            store_count: AtomicU64::new(0),
        }
    }

    /// Makes every store call fail with `StoreError::Unavailable`.
    pub fn fail_all(&self, fail: bool) {
        self.fail_all.store(fail, Ordering::SeqCst);
    }

    /// Returns the number of store calls attempted.
    pub fn store_count(&self) -> u64 {
        self.store_count.load(Ordering::SeqCst)
    }

    /// Returns a snapshot of the stored tokens.
    pub async fn stored(&self) -> Vec<Token> {
        self.tokens.read().await.clone()
    }
}

impl Default for MemoryTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn store(&self, token: &Token) -> StoreResult<()> {
        self.store_count.fetch_add(1, Ordering::SeqCst);

        if self.fail_all.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("token store offline"));
        }

        self.tokens.write().await.push(token.clone());
        Ok(())
    }
}

// =============================================================================
// StaticLoginHandler
// =============================================================================

/// A login handler backed by a static credential table.
pub struct StaticLoginHandler {
    credentials: HashMap<String, (String, User)>,
    call_count: AtomicU64,
}

impl StaticLoginHandler {
    /// Creates a handler from `(username, password, user)` entries.
    pub fn new(entries: impl IntoIterator<Item = (String, String, User)>) -> Self {
        let credentials = entries
            .into_iter()
            .map(|(username, password, user)| (username, (password, user)))
            .collect();
        Self {
            credentials,
            call_count: AtomicU64::new(0),
        }
    }

    /// Returns the number of login attempts handled.
    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LoginHandler for StaticLoginHandler {
    async fn login(&self, username: &str, password: &str) -> Result<User, LoginError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        match self.credentials.get(username) {
            Some((expected, user)) if expected == password => Ok(user.clone()),
            _ => Err(LoginError::invalid_credentials()),
        }
    }
}
