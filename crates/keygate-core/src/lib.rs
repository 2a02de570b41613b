// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # keygate-core
//!
//! Core abstractions and shared types for the keygate authentication toolkit.
//!
//! This crate provides the foundational pieces used across all keygate
//! components:
//!
//! - **Types**: The identity data model — `User`, `Role`, `Ability`,
//!   `RoleId`, `Token`
//! - **Error**: Unified error hierarchy with programmatically
//!   distinguishable kinds
//! - **Services**: Capability interfaces for user/role lookup, token
//!   storage, and credential verification
//! - **Driver**: The pluggable `AuthDriver` contract implemented by
//!   concrete authentication mechanisms
//!
//! ## Example
//!
//! ```
//! use keygate_core::types::{Ability, Role, RoleId, User};
//!
//! let role = Role::new("editor", vec![Ability::new("read", "doc*")]);
//! let user = User::new("u1", "alice", vec![role.id().clone()]);
//!
//! assert!(user.has_role(&RoleId::new("editor")));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod driver;
pub mod error;
pub mod services;
pub mod types;

// =============================================================================
// Re-exports for convenience
// =============================================================================

pub use driver::AuthDriver;
pub use error::{
    AuthzError, AuthzResult, ConfigError, ConfigResult, DriverError, DriverResult, KeygateError,
    KeygateResult, StoreError, StoreResult, TokenError, TokenResult,
};
pub use services::{Dependencies, LoginError, LoginHandler, RoleService, TokenStore, UserService};
pub use types::{Ability, Role, RoleId, Token, User};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
