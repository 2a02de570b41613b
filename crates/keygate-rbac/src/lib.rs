// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # keygate-rbac
//!
//! Role-based authorization for the keygate authentication toolkit.
//!
//! This crate provides:
//!
//! - **Matcher**: the pluggable [`AbilityMatcher`] contract plus the default
//!   glob implementation
//! - **Engine**: the [`AuthorizationEngine`] — ability aggregation across a
//!   user's roles and first-match-wins permission evaluation
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use keygate_rbac::{AuthorizationEngine, GlobMatcher};
//! # use keygate_core::services::RoleService;
//! # fn role_service() -> Arc<dyn RoleService> { unimplemented!() }
//!
//! let engine = AuthorizationEngine::new(role_service(), Arc::new(GlobMatcher::new()));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod engine;
pub mod matcher;

// =============================================================================
// Re-exports for convenience
// =============================================================================

pub use engine::AuthorizationEngine;
pub use matcher::{AbilityMatcher, GlobMatcher, MatchError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
