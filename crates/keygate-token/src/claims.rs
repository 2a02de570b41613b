// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Token claims.
//!
//! The wire payload of a signed token:
//! `{"user":{"id","username","roles"},"exp","iat","jti"}` with `exp`/`iat`
//! as integer seconds since epoch and `jti` as the claims ID.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use keygate_core::types::{RoleId, User};

// =============================================================================
// UserClaims
// =============================================================================

/// The identity snapshot embedded in a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaims {
    /// User ID.
    pub id: String,
    /// Username.
    pub username: String,
    /// Role IDs, in their original order.
    #[serde(default)]
    pub roles: Vec<RoleId>,
}

impl From<&User> for UserClaims {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
            roles: user.roles().to_vec(),
        }
    }
}

// =============================================================================
// Claims
// =============================================================================

/// Claims for a signed identity token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// The user the token was issued for.
    pub user: UserClaims,
    /// Expiration time (Unix timestamp, seconds).
    pub exp: i64,
    /// Issued at time (Unix timestamp, seconds).
    pub iat: i64,
    /// Claims ID, unique per issuance.
    pub jti: String,
}

impl Claims {
    /// Returns the ID of the user the claims were built for.
    pub fn user_id(&self) -> &str {
        &self.user.id
    }

    /// Returns the issuance time, if the timestamp is representable.
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    /// Returns the expiration time, if the timestamp is representable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

// =============================================================================
// Tests
// =============================================================================
