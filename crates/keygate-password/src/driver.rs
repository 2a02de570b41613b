// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The password authentication driver.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use keygate_core::driver::AuthDriver;
use keygate_core::error::{DriverError, DriverResult, StoreError};
use keygate_core::services::{Dependencies, LoginHandler};
use keygate_core::types::{Ability, Token, User};
use keygate_rbac::{AbilityMatcher, AuthorizationEngine, GlobMatcher};
use keygate_token::{AuthConfig, TokenService};

// =============================================================================
// PasswordDriver
// =============================================================================

/// Password-based authentication.
///
/// The driver is the façade consumed by callers: it verifies credentials
/// through the injected [`LoginHandler`], issues and persists signed tokens,
/// resolves presented tokens back to users, and answers authorization
/// questions through the role-based engine.
///
/// Every collaborator is provided at construction; the driver holds no
/// mutable state and can be shared across concurrent callers.
#[derive(Clone)]
pub struct PasswordDriver {
    config: AuthConfig,
    deps: Dependencies,
    tokens: TokenService,
    engine: AuthorizationEngine,
    handler: Arc<dyn LoginHandler>,
}

impl PasswordDriver {
    /// Creates a new password driver with the default glob ability matcher.
    pub fn new(config: AuthConfig, deps: Dependencies, handler: Arc<dyn LoginHandler>) -> Self {
        let tokens = TokenService::new(config.clone());
        let engine =
            AuthorizationEngine::new(deps.roles().clone(), Arc::new(GlobMatcher::new()));

        Self {
            config,
            deps,
            tokens,
            engine,
            handler,
        }
    }

    /// Replaces the ability matcher.
    pub fn with_matcher(mut self, matcher: Arc<dyn AbilityMatcher>) -> Self {
        self.engine = AuthorizationEngine::new(self.deps.roles().clone(), matcher);
        self
    }

    /// Replaces the token service. Intended for deterministic tests that
    /// need a fixed clock or claims-ID generator.
    pub fn with_token_service(mut self, tokens: TokenService) -> Self {
        self.tokens = tokens;
        self
    }

    /// Returns the authentication configuration.
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Returns the token service.
    pub fn token_service(&self) -> &TokenService {
        &self.tokens
    }

    /// Persists an issued token.
    ///
    /// # Errors
    ///
    /// - `DriverError::Storage` - The token store is failing
    pub async fn store_token(&self, token: &Token) -> DriverResult<()> {
        self.deps
            .tokens()
            .store(token)
            .await
            .map_err(|e| DriverError::storage_with("could not store token", e))
    }

    /// Parses a compact token string to a [`Token`].
    ///
    /// # Errors
    ///
    /// - `DriverError::Token` - The token could not be parsed or verified
    pub fn parse_token(&self, value: &str) -> DriverResult<Token> {
        self.tokens
            .parse(value)
            .map_err(|e| DriverError::token("could not parse token", e))
    }

    /// Resolves a parsed token to the user it was issued for.
    ///
    /// # Errors
    ///
    /// - `DriverError::NotFound` - The user no longer exists
    /// - `DriverError::Dependency` - The user store is failing
    pub async fn user_from_token(&self, token: &Token) -> DriverResult<User> {
        self.deps
            .users()
            .find_one_by_id(token.user_id())
            .await
            .map_err(|e| match e {
                StoreError::NotFound { .. } => DriverError::not_found("user", token.user_id()),
                other => {
                    DriverError::dependency_with("could not find the user with the given id", other)
                }
            })
    }

    /// Returns all abilities granted to the user through its roles.
    ///
    /// # Errors
    ///
    /// - `DriverError::Authorization` - Role resolution failed
    pub async fn user_abilities(&self, user: &User) -> DriverResult<Vec<Ability>> {
        Ok(self.engine.user_abilities(user).await?)
    }
}

#[async_trait]
impl AuthDriver for PasswordDriver {
    async fn login(&self, credentials: &HashMap<String, String>) -> DriverResult<User> {
        // Fail fast on missing fields; the handler is never invoked.
        let username = credentials
            .get("username")
            .ok_or(DriverError::MissingField { field: "username" })?;
        let password = credentials
            .get("password")
            .ok_or(DriverError::MissingField { field: "password" })?;

        let user = self
            .handler
            .login(username, password)
            .await
            .map_err(|e| DriverError::login_with("could not login", e))?;

        tracing::debug!(user = user.id(), "login succeeded");
        Ok(user)
    }

    async fn issue_token(&self, user: &User) -> DriverResult<Token> {
        let claims = self.tokens.new_claims(user);
        let token = self
            .tokens
            .issue(&claims)
            .map_err(|e| DriverError::token("could not issue token", e))?;

        self.store_token(&token).await?;

        tracing::debug!(user = user.id(), token = token.id(), "token issued");
        Ok(token)
    }

    async fn authenticate(&self, token: &str) -> DriverResult<User> {
        let token = self.parse_token(token)?;
        let user = self.user_from_token(&token).await?;

        tracing::debug!(user = user.id(), token = token.id(), "token authenticated");
        Ok(user)
    }

    async fn authorize(&self, user: &User, action: &str, object: &str) -> DriverResult<()> {
        Ok(self.engine.authorize(user, action, object).await?)
    }
}

impl std::fmt::Debug for PasswordDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordDriver")
            .field("algorithm", &self.config.algorithm())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::Duration;

    use keygate_core::error::StoreResult;
    use keygate_core::services::{LoginError, RoleService, TokenStore, UserService};
    use keygate_core::types::{Role, RoleId};

    struct NoUsers;

    #[async_trait]
    impl UserService for NoUsers {
        async fn find_one_by_id(&self, id: &str) -> StoreResult<User> {
            Err(StoreError::not_found("user", id))
        }
    }

    struct NoRoles;

    #[async_trait]
    impl RoleService for NoRoles {
        async fn find_by_ids(&self, _ids: &[RoleId]) -> StoreResult<Vec<Role>> {
            Ok(Vec::new())
        }
    }

    struct NullTokenStore;

    #[async_trait]
    impl TokenStore for NullTokenStore {
        async fn store(&self, _token: &Token) -> StoreResult<()> {
            Ok(())
        }
    }

    struct CountingHandler {
        calls: AtomicU64,
    }

    #[async_trait]
    impl LoginHandler for CountingHandler {
        async fn login(&self, username: &str, password: &str) -> Result<User, LoginError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if username == "alice" && password == "s3cret" {
                Ok(User::new("u1", username, vec![]))
            } else {
                Err(LoginError::invalid_credentials())
            }
        }
    }

    fn driver(handler: Arc<CountingHandler>) -> PasswordDriver {
        let config =
            AuthConfig::hmac("HS256", "a-shared-secret", Duration::from_secs(3600), false)
                .unwrap();
        let deps = Dependencies::new(Arc::new(NoUsers), Arc::new(NoRoles), Arc::new(NullTokenStore));
        PasswordDriver::new(config, deps, handler)
    }

    #[tokio::test]
    async fn test_missing_field_fails_before_handler() {
        let handler = Arc::new(CountingHandler { calls: AtomicU64::new(0) });
        let driver = driver(handler.clone());

        let mut credentials = HashMap::new();
        credentials.insert("password".to_string(), "x".to_string());

        let error = driver.login(&credentials).await.unwrap_err();
        assert!(matches!(error, DriverError::MissingField { field: "username" }));
        assert_eq!(handler.calls.load(Ordering::SeqCst), 0);

        let mut credentials = HashMap::new();
        credentials.insert("username".to_string(), "alice".to_string());

        let error = driver.login(&credentials).await.unwrap_err();
        assert!(matches!(error, DriverError::MissingField { field: "password" }));
        assert_eq!(handler.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_login_delegates_to_handler() {
        let handler = Arc::new(CountingHandler { calls: AtomicU64::new(0) });
        let driver = driver(handler.clone());

        let mut credentials = HashMap::new();
        credentials.insert("username".to_string(), "alice".to_string());
        credentials.insert("password".to_string(), "s3cret".to_string());

        let user = driver.login(&credentials).await.unwrap();
        assert_eq!(user.id(), "u1");
        assert_eq!(handler.calls.load(Ordering::SeqCst), 1);

        credentials.insert("password".to_string(), "wrong".to_string());
        let error = driver.login(&credentials).await.unwrap_err();
        assert!(matches!(error, DriverError::Login { .. }));
        assert_eq!(handler.calls.load(Ordering::SeqCst), 2);
    }
}
