// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Builders
//!
//! Builder patterns for constructing test objects, plus a fully wired
//! password driver backed by the in-memory mocks.

use std::sync::Arc;

use keygate_core::services::Dependencies;
use keygate_core::types::{Ability, Role, RoleId, User};
use keygate_password::PasswordDriver;
use keygate_token::AuthConfig;

use super::fixtures::{AuthFixtures, RoleFixtures, UserFixtures, TEST_SECRET};
use super::mocks::{MemoryRoleService, MemoryTokenStore, MemoryUserService, StaticLoginHandler};

// =============================================================================
// UserBuilder
// =============================================================================

/// Builder for test users.
#[derive(Debug)]
pub struct UserBuilder {
    id: String,
    username: String,
    roles: Vec<RoleId>,
}

impl UserBuilder {
    /// Creates a builder; the username defaults to the ID.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            username: id.clone(),
            id,
            roles: Vec::new(),
        }
    }

    /// Sets the username.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Adds a role.
    pub fn role(mut self, role: impl Into<RoleId>) -> Self {
        self.roles.push(role.into());
        self
    }

    /// Builds the user.
    pub fn build(self) -> User {
        User::new(self.id, self.username, self.roles)
    }
}

// =============================================================================
// RoleBuilder
// =============================================================================

/// Builder for test roles.
#[derive(Debug)]
pub struct RoleBuilder {
    id: RoleId,
    abilities: Vec<Ability>,
}

impl RoleBuilder {
    /// Creates a builder.
    pub fn new(id: impl Into<RoleId>) -> Self {
        Self {
            id: id.into(),
            abilities: Vec::new(),
        }
    }

    /// Adds an ability.
    pub fn ability(mut self, action: impl Into<String>, object: impl Into<String>) -> Self {
        self.abilities.push(Ability::new(action, object));
        self
    }

    /// Builds the role.
    pub fn build(self) -> Role {
        Role::new(self.id, self.abilities)
    }
}

// =============================================================================
// TestDriver
// =============================================================================

/// A password driver wired to in-memory mocks, with handles to every mock
/// for interaction verification and failure injection.
pub struct TestDriver {
    /// The driver under test.
    pub driver: PasswordDriver,
    /// The backing user store.
    pub users: Arc<MemoryUserService>,
    /// The backing role store.
    pub roles: Arc<MemoryRoleService>,
    /// The backing token store.
    pub tokens: Arc<MemoryTokenStore>,
    /// The login handler.
    pub handler: Arc<StaticLoginHandler>,
}

/// Builder for [`TestDriver`].
pub struct TestDriverBuilder {
    config: AuthConfig,
    users: Vec<User>,
    roles: Vec<Role>,
    credentials: Vec<(String, String, User)>,
}

impl TestDriverBuilder {
    /// Creates a builder with the standard HMAC configuration, the fixture
    /// role set, and alice/bob/carol registered with password `"s3cret"`.
    pub fn new() -> Self {
        let users = vec![UserFixtures::alice(), UserFixtures::bob(), UserFixtures::carol()];
        let credentials = users
            .iter()
            .map(|user| {
                (
                    user.username().to_string(),
                    "s3cret".to_string(),
                    user.clone(),
                )
            })
            .collect();

        Self {
            config: AuthFixtures::hmac_config(),
            users,
            roles: RoleFixtures::all(),
            credentials,
        }
    }

    /// Replaces the configuration.
    pub fn config(mut self, config: AuthConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds a user to the user store.
    pub fn user(mut self, user: User) -> Self {
        self.users.push(user);
        self
    }

    /// Adds a role to the role store.
    pub fn role(mut self, role: Role) -> Self {
        self.roles.push(role);
        self
    }

    /// Registers a credential entry with the login handler.
    pub fn credential(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
        user: User,
    ) -> Self {
        self.credentials.push((username.into(), password.into(), user));
        self
    }

    /// Builds the wired driver.
    pub fn build(self) -> TestDriver {
        let users = Arc::new(MemoryUserService::with_users(self.users));
        let roles = Arc::new(MemoryRoleService::with_roles(self.roles));
        let tokens = Arc::new(MemoryTokenStore::new());
        let handler = Arc::new(StaticLoginHandler::new(self.credentials));

        let deps = Dependencies::new(users.clone(), roles.clone(), tokens.clone());
        let driver = PasswordDriver::new(self.config, deps, handler.clone());

        TestDriver {
            driver,
            users,
            roles,
            tokens,
            handler,
        }
    }
}

impl Default for TestDriverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDriver {
    /// The password every fixture credential is registered with.
    pub const PASSWORD: &'static str = "s3cret";

    /// The shared HMAC secret the default configuration signs with.
    pub const SECRET: &'static str = TEST_SECRET;
}
