// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Unified error hierarchy for keygate.
//!
//! This module defines a comprehensive error type system that:
//!
//! - Provides clear, descriptive error messages
//! - Supports error chaining for traceability
//! - Distinguishes error kinds programmatically without sentinel values
//! - Maps errors to appropriate HTTP status codes
//! - Supports structured logging
//!
//! # Error Hierarchy
//!
//! ```text
//! KeygateError (root)
//! ├── ConfigError   - Algorithm and key material validation
//! ├── TokenError    - Token signing and parsing
//! ├── AuthzError    - Authorization decisions
//! ├── StoreError    - Collaborator lookup/storage failures
//! └── DriverError   - Authentication driver orchestration
//! ```
//!
//! # Examples
//!
//! ```
//! use keygate_core::error::{AuthzError, KeygateError};
//!
//! let error = AuthzError::forbidden("write", "doc1");
//! assert_eq!(error.error_type(), "forbidden");
//!
//! let root: KeygateError = error.into();
//! assert_eq!(root.status_code(), 403);
//! ```

use thiserror::Error;

/// A boxed error cause preserved for inspection.
type Cause = Box<dyn std::error::Error + Send + Sync>;

// =============================================================================
// KeygateError - Root Error Type
// =============================================================================

/// The root error type for keygate.
///
/// All errors in keygate can be converted to this type, providing a unified
/// error handling interface across the entire system.
#[derive(Debug, Error)]
pub enum KeygateError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Token error.
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// Authorization error.
    #[error("Authorization error: {0}")]
    Authz(#[from] AuthzError),

    /// Collaborator store error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Authentication driver error.
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),
}

impl KeygateError {
    /// Returns the error type as a string for logging/metrics.
    pub fn error_type(&self) -> &'static str {
        match self {
            KeygateError::Config(_) => "config",
            KeygateError::Token(_) => "token",
            KeygateError::Authz(_) => "authz",
            KeygateError::Store(_) => "store",
            KeygateError::Driver(_) => "driver",
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            KeygateError::Config(_) => 500,
            KeygateError::Token(_) => 401,
            KeygateError::Authz(e) => e.status_code(),
            KeygateError::Store(e) => e.status_code(),
            KeygateError::Driver(e) => e.status_code(),
        }
    }
}

// =============================================================================
// ConfigError
// =============================================================================

/// Algorithm and key material validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The algorithm name is not recognized.
    #[error("Invalid algorithm: {name}")]
    InvalidAlgorithm {
        /// The rejected algorithm name.
        name: String,
    },

    /// The key material's shape does not match the algorithm family.
    #[error("Invalid key for {family}: {message}")]
    InvalidKey {
        /// The algorithm family the key was provided for.
        family: &'static str,
        /// Error message.
        message: String,
    },

    /// The algorithm declared in a token does not belong to the configured
    /// family.
    #[error("Unexpected signing method: expected {configured}, observed {observed}")]
    UnexpectedSigningMethod {
        /// The configured algorithm family.
        configured: &'static str,
        /// The algorithm family declared in the token.
        observed: &'static str,
    },
}

impl ConfigError {
    /// Creates an invalid algorithm error.
    pub fn invalid_algorithm(name: impl Into<String>) -> Self {
        Self::InvalidAlgorithm { name: name.into() }
    }

    /// Creates an invalid key error.
    pub fn invalid_key(family: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidKey {
            family,
            message: message.into(),
        }
    }

    /// Creates an unexpected signing method error.
    pub fn unexpected_signing_method(configured: &'static str, observed: &'static str) -> Self {
        Self::UnexpectedSigningMethod { configured, observed }
    }

    /// Returns the error type for logging/metrics.
    pub fn error_type(&self) -> &'static str {
        match self {
            ConfigError::InvalidAlgorithm { .. } => "invalid_algorithm",
            ConfigError::InvalidKey { .. } => "invalid_key",
            ConfigError::UnexpectedSigningMethod { .. } => "unexpected_signing_method",
        }
    }
}

// =============================================================================
// TokenError
// =============================================================================

/// Token signing and parsing errors.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Signing the claims failed.
    #[error("Could not sign token: {message}")]
    Signing {
        /// Error message.
        message: String,
        /// Underlying error.
        #[source]
        source: Option<Cause>,
    },

    /// A lower-level failure occurred while parsing.
    #[error("Could not parse token: {message}")]
    Parse {
        /// Error message.
        message: String,
        /// Underlying error.
        #[source]
        source: Option<Cause>,
    },

    /// The token's signature or structure is invalid, or the token is
    /// expired.
    #[error("Invalid token: {message}")]
    InvalidToken {
        /// Error message.
        message: String,
    },

    /// The token's claims cannot be decoded into the expected shape.
    #[error("Invalid claims: {message}")]
    InvalidClaims {
        /// Error message.
        message: String,
    },

    /// Key resolution failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl TokenError {
    /// Creates a signing error.
    pub fn signing(message: impl Into<String>) -> Self {
        Self::Signing {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a signing error with a source.
    pub fn signing_with<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Signing {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a parse error with a source.
    pub fn parse_with<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Parse {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an invalid token error.
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::InvalidToken { message: message.into() }
    }

    /// Creates an invalid claims error.
    pub fn invalid_claims(message: impl Into<String>) -> Self {
        Self::InvalidClaims { message: message.into() }
    }

    /// Returns the error type for logging/metrics.
    pub fn error_type(&self) -> &'static str {
        match self {
            TokenError::Signing { .. } => "signing",
            TokenError::Parse { .. } => "parse",
            TokenError::InvalidToken { .. } => "invalid_token",
            TokenError::InvalidClaims { .. } => "invalid_claims",
            TokenError::Config(e) => e.error_type(),
        }
    }
}

// =============================================================================
// AuthzError
// =============================================================================

/// Authorization errors.
#[derive(Debug, Error)]
pub enum AuthzError {
    /// The user has no abilities at all.
    #[error("User has no abilities")]
    NoAbilities,

    /// No ability granted the requested action on the object.
    #[error("Forbidden: {action} on {object}")]
    Forbidden {
        /// The requested action.
        action: String,
        /// The requested object.
        object: String,
    },

    /// A collaborator required for the decision failed.
    #[error("Dependency failed: {message}")]
    Dependency {
        /// Error message.
        message: String,
        /// Underlying error.
        #[source]
        source: Option<Cause>,
    },
}

impl AuthzError {
    /// Creates a forbidden error.
    pub fn forbidden(action: impl Into<String>, object: impl Into<String>) -> Self {
        Self::Forbidden {
            action: action.into(),
            object: object.into(),
        }
    }

    /// Creates a dependency error.
    pub fn dependency(message: impl Into<String>) -> Self {
        Self::Dependency {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a dependency error with a source.
    pub fn dependency_with<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Dependency {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns the error type for logging/metrics.
    pub fn error_type(&self) -> &'static str {
        match self {
            AuthzError::NoAbilities => "no_abilities",
            AuthzError::Forbidden { .. } => "forbidden",
            AuthzError::Dependency { .. } => "dependency",
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            AuthzError::NoAbilities | AuthzError::Forbidden { .. } => 403,
            AuthzError::Dependency { .. } => 503,
        }
    }
}

// =============================================================================
// StoreError
// =============================================================================

/// Collaborator lookup and storage errors.
///
/// These errors are produced by the injected [`UserService`], [`RoleService`],
/// and [`TokenStore`] implementations; layers that consume them wrap them
/// with context.
///
/// [`UserService`]: crate::services::UserService
/// [`RoleService`]: crate::services::RoleService
/// [`TokenStore`]: crate::services::TokenStore
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested record does not exist.
    #[error("{resource} not found: {id}")]
    NotFound {
        /// The kind of record.
        resource: &'static str,
        /// The requested ID.
        id: String,
    },

    /// The store is missing or failing.
    #[error("Store unavailable: {message}")]
    Unavailable {
        /// Error message.
        message: String,
        /// Underlying error.
        #[source]
        source: Option<Cause>,
    },
}

impl StoreError {
    /// Creates a not found error.
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an unavailable error with a source.
    pub fn unavailable_with<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Unavailable {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns the error type for logging/metrics.
    pub fn error_type(&self) -> &'static str {
        match self {
            StoreError::NotFound { .. } => "not_found",
            StoreError::Unavailable { .. } => "unavailable",
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::NotFound { .. } => 404,
            StoreError::Unavailable { .. } => 503,
        }
    }
}

// =============================================================================
// DriverError
// =============================================================================

/// Authentication driver orchestration errors.
#[derive(Debug, Error)]
pub enum DriverError {
    /// A required credential field is missing.
    #[error("Missing credential field: {field}")]
    MissingField {
        /// The missing field name.
        field: &'static str,
    },

    /// The login handler rejected the credentials.
    #[error("Could not login: {message}")]
    Login {
        /// Error message.
        message: String,
        /// Underlying error.
        #[source]
        source: Option<Cause>,
    },

    /// A token was signed but could not be persisted.
    #[error("Could not store token: {message}")]
    Storage {
        /// Error message.
        message: String,
        /// Underlying error.
        #[source]
        source: Option<Cause>,
    },

    /// A collaborator required by the driver failed.
    #[error("Dependency failed: {message}")]
    Dependency {
        /// Error message.
        message: String,
        /// Underlying error.
        #[source]
        source: Option<Cause>,
    },

    /// A record referenced by a valid token no longer exists.
    #[error("{resource} not found: {id}")]
    NotFound {
        /// The kind of record.
        resource: &'static str,
        /// The requested ID.
        id: String,
    },

    /// A token operation failed.
    #[error("{message}")]
    Token {
        /// Contextual message.
        message: String,
        /// The underlying token error.
        #[source]
        source: TokenError,
    },

    /// Authorization was denied or could not be decided.
    #[error(transparent)]
    Authorization(#[from] AuthzError),
}

impl DriverError {
    /// Creates a missing field error.
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Creates a login error with a source.
    pub fn login_with<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Login {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a storage error with a source.
    pub fn storage_with<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a dependency error with a source.
    pub fn dependency_with<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Dependency {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Creates a token error with context.
    pub fn token(message: impl Into<String>, source: TokenError) -> Self {
        Self::Token {
            message: message.into(),
            source,
        }
    }

    /// Returns the error type for logging/metrics.
    pub fn error_type(&self) -> &'static str {
        match self {
            DriverError::MissingField { .. } => "missing_field",
            DriverError::Login { .. } => "login",
            DriverError::Storage { .. } => "storage",
            DriverError::Dependency { .. } => "dependency",
            DriverError::NotFound { .. } => "not_found",
            DriverError::Token { .. } => "token",
            DriverError::Authorization(e) => e.error_type(),
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            DriverError::MissingField { .. } => 400,
            DriverError::Login { .. } | DriverError::Token { .. } => 401,
            DriverError::NotFound { .. } => 404,
            DriverError::Storage { .. } | DriverError::Dependency { .. } => 503,
            DriverError::Authorization(e) => e.status_code(),
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// A Result type with KeygateError.
pub type KeygateResult<T> = Result<T, KeygateError>;

/// A Result type with ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// A Result type with TokenError.
pub type TokenResult<T> = Result<T, TokenError>;

/// A Result type with AuthzError.
pub type AuthzResult<T> = Result<T, AuthzError>;

/// A Result type with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

/// A Result type with DriverError.
pub type DriverResult<T> = Result<T, DriverError>;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let error = ConfigError::invalid_algorithm("HS1024");
        assert!(matches!(error, ConfigError::InvalidAlgorithm { .. }));
        assert_eq!(error.error_type(), "invalid_algorithm");

        let error = ConfigError::unexpected_signing_method("RSA", "HMAC");
        assert!(error.to_string().contains("expected RSA"));
        assert!(error.to_string().contains("observed HMAC"));
    }

    #[test]
    fn test_token_error_kinds_distinguishable() {
        assert_eq!(TokenError::signing("boom").error_type(), "signing");
        assert_eq!(TokenError::parse("boom").error_type(), "parse");
        assert_eq!(TokenError::invalid_token("bad sig").error_type(), "invalid_token");
        assert_eq!(TokenError::invalid_claims("bad shape").error_type(), "invalid_claims");
    }

    #[test]
    fn test_authz_error_status_code() {
        assert_eq!(AuthzError::NoAbilities.status_code(), 403);
        assert_eq!(AuthzError::forbidden("write", "doc1").status_code(), 403);
        assert_eq!(AuthzError::dependency("role lookup failed").status_code(), 503);
    }

    #[test]
    fn test_store_error() {
        let error = StoreError::not_found("user", "u42");
        assert_eq!(error.status_code(), 404);
        assert!(error.to_string().contains("u42"));
    }

    #[test]
    fn test_driver_error_source_chain() {
        let cause = StoreError::unavailable("connection refused");
        let error = DriverError::storage_with("could not store token", cause);

        assert_eq!(error.error_type(), "storage");
        let source = std::error::Error::source(&error).expect("source preserved");
        assert!(source.to_string().contains("connection refused"));
    }

    #[test]
    fn test_root_error_conversion() {
        let error: KeygateError = AuthzError::NoAbilities.into();
        assert_eq!(error.error_type(), "authz");
        assert_eq!(error.status_code(), 403);

        let error: KeygateError = TokenError::invalid_token("tampered").into();
        assert_eq!(error.status_code(), 401);
    }
}
