// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # keygate-token
//!
//! Claims construction, multi-algorithm signing, and verification for the
//! keygate authentication toolkit.
//!
//! This crate provides:
//!
//! - **Config**: [`AuthConfig`] — algorithm family, key material, token
//!   lifetime; every invariant enforced at construction time
//! - **Keys**: typed key resolution with the algorithm-confusion guard
//! - **Claims**: the `{"user":{...},"exp","iat","jti"}` wire payload
//! - **Service**: [`TokenService`] — `new_claims` / `issue` / `parse` with
//!   injectable clock and claims-ID generation
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use keygate_core::types::User;
//! use keygate_token::{AuthConfig, TokenService};
//!
//! let config = AuthConfig::hmac("HS256", "a-shared-secret", Duration::from_secs(3600), false)?;
//! let service = TokenService::new(config);
//!
//! let token = service.issue(&service.new_claims(&User::new("u1", "alice", vec![])))?;
//! assert_eq!(service.parse(token.value())?, token);
//! # Ok::<(), keygate_core::error::KeygateError>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod claims;
pub mod config;
pub mod keys;
pub mod service;

// =============================================================================
// Re-exports for convenience
// =============================================================================

pub use claims::{Claims, UserClaims};
pub use config::{AlgorithmFamily, AuthConfig, AuthSettings, KeyMaterial};
pub use service::{ClaimsIdGenerator, Clock, TokenService};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
