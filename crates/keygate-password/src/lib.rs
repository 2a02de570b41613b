// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # keygate-password
//!
//! Password-based authentication driver for the keygate toolkit.
//!
//! [`PasswordDriver`] implements the [`AuthDriver`] contract from
//! `keygate-core`: it verifies credentials through an injected login
//! handler, issues and persists signed identity tokens, resolves presented
//! tokens back to users, and authorizes actions through the role-based
//! engine.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use keygate_core::services::{Dependencies, LoginError};
//! use keygate_core::types::User;
//! use keygate_password::PasswordDriver;
//! use keygate_token::AuthConfig;
//! # fn dependencies() -> Dependencies { unimplemented!() }
//!
//! let config = AuthConfig::hmac("HS256", "a-shared-secret", Duration::from_secs(3600), false)?;
//!
//! let handler = |username: String, password: String| async move {
//!     // Verify against your credential store here.
//!     if username == "alice" && password == "s3cret" {
//!         Ok(User::new("u1", username, vec![]))
//!     } else {
//!         Err(LoginError::invalid_credentials())
//!     }
//! };
//!
//! let driver = PasswordDriver::new(config, dependencies(), Arc::new(handler));
//! # Ok::<(), keygate_core::error::KeygateError>(())
//! ```
//!
//! [`AuthDriver`]: keygate_core::driver::AuthDriver

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

mod driver;

pub use driver::PasswordDriver;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
