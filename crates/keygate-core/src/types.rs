// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Core data types for keygate.
//!
//! This module provides the identity and authorization data model shared by
//! every keygate component. All types are immutable snapshots: once
//! constructed they are never mutated, which makes them safe to share across
//! concurrent callers without coordination.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Identifiers
// =============================================================================

/// A unique identifier for a role.
///
/// Role IDs should be stable across restarts and unique within a deployment.
///
/// # Examples
///
/// ```
/// use keygate_core::types::RoleId;
///
/// let id = RoleId::new("editor");
/// assert_eq!(id.as_str(), "editor");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(String);

impl RoleId {
    /// Creates a new role ID.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the ID and returns the inner string.
    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RoleId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RoleId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for RoleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// User
// =============================================================================

/// An authenticated identity.
///
/// A `User` is an immutable snapshot of an identity at the time it was read
/// from the user store: an ID, a username, and an ordered sequence of role
/// IDs. Role order is significant — it determines the order in which
/// abilities are aggregated during authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: String,
    username: String,
    roles: Vec<RoleId>,
}

impl User {
    /// Creates a new user snapshot.
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        roles: impl IntoIterator<Item = RoleId>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            roles: roles.into_iter().collect(),
        }
    }

    /// Returns the user ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the user's role IDs in their original order.
    pub fn roles(&self) -> &[RoleId] {
        &self.roles
    }

    /// Returns `true` if the user holds the given role.
    pub fn has_role(&self, role: &RoleId) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

// =============================================================================
// Ability
// =============================================================================

/// A permitted action/object pattern pair granted by a role.
///
/// Both fields are pattern strings interpreted by the configured ability
/// matcher. An ability whose action or object pattern is empty is *inert*:
/// it is never eligible to match, regardless of how a matcher would treat an
/// empty pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    action: String,
    object: String,
}

impl Ability {
    /// Creates a new ability.
    pub fn new(action: impl Into<String>, object: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            object: object.into(),
        }
    }

    /// Returns the action pattern.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Returns the object pattern.
    pub fn object(&self) -> &str {
        &self.object
    }

    /// Returns `true` if this ability can never match.
    ///
    /// An empty action or object pattern makes the ability inert, not a
    /// wildcard.
    pub fn is_inert(&self) -> bool {
        self.action.is_empty() || self.object.is_empty()
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.action, self.object)
    }
}

// =============================================================================
// Role
// =============================================================================

/// A named set of abilities.
///
/// Ability order within a role is preserved when abilities are aggregated
/// for authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    id: RoleId,
    abilities: Vec<Ability>,
}

impl Role {
    /// Creates a new role.
    pub fn new(id: impl Into<RoleId>, abilities: impl IntoIterator<Item = Ability>) -> Self {
        Self {
            id: id.into(),
            abilities: abilities.into_iter().collect(),
        }
    }

    /// Returns the role ID.
    pub fn id(&self) -> &RoleId {
        &self.id
    }

    /// Returns the role's abilities in their original order.
    pub fn abilities(&self) -> &[Ability] {
        &self.abilities
    }
}

// =============================================================================
// Token
// =============================================================================

/// A signed identity token.
///
/// A `Token` is a read-only projection of the claims it was derived from plus
/// the compact signed wire value. It is never mutated after creation;
/// re-parsing a token's `value` yields an equal `Token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    id: String,
    user_id: String,
    value: String,
    issued_at: DateTime<Utc>,
    expired_at: DateTime<Utc>,
}

impl Token {
    /// Creates a new token projection.
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        value: impl Into<String>,
        issued_at: DateTime<Utc>,
        expired_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            value: value.into(),
            issued_at,
            expired_at,
        }
    }

    /// Returns the token ID (the claims ID it was issued with).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the ID of the user the token was issued for.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Returns the compact signed wire value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the issuance time.
    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Returns the expiration time.
    pub fn expired_at(&self) -> DateTime<Utc> {
        self.expired_at
    }

    /// Returns `true` if the token is expired at the given instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expired_at
    }
}

// =============================================================================
// Tests
// =============================================================================
