// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Role-based authorization.

use std::sync::Arc;

use keygate_core::error::{AuthzError, AuthzResult};
use keygate_core::services::RoleService;
use keygate_core::types::{Ability, User};

use crate::matcher::AbilityMatcher;

// =============================================================================
// AuthorizationEngine
// =============================================================================

/// Aggregates a user's abilities and decides whether a requested action on
/// an object is permitted.
///
/// Policy is a union of per-ability grants: any matching ability is
/// sufficient and there are no deny rules, so the first-match-wins scan is
/// purely a short-circuit. The engine is immutable after construction and
/// safe to share across concurrent callers.
#[derive(Clone)]
pub struct AuthorizationEngine {
    roles: Arc<dyn RoleService>,
    matcher: Arc<dyn AbilityMatcher>,
}

impl AuthorizationEngine {
    /// Creates a new engine.
    pub fn new(roles: Arc<dyn RoleService>, matcher: Arc<dyn AbilityMatcher>) -> Self {
        Self { roles, matcher }
    }

    /// Returns all abilities granted to the user through its roles.
    ///
    /// A user with no role IDs yields an empty sequence without any lookup.
    /// Otherwise abilities are concatenated across resolved roles,
    /// preserving role order, then ability order within each role.
    ///
    /// # Errors
    ///
    /// - `AuthzError::Dependency` - Role resolution failed
    pub async fn user_abilities(&self, user: &User) -> AuthzResult<Vec<Ability>> {
        let role_ids = user.roles();
        if role_ids.is_empty() {
            return Ok(Vec::new());
        }

        let roles = self
            .roles
            .find_by_ids(role_ids)
            .await
            .map_err(|e| AuthzError::dependency_with("could not fetch roles", e))?;

        Ok(roles
            .into_iter()
            .flat_map(|role| role.abilities().to_vec())
            .collect())
    }

    /// Decides whether `user` may take `action` on `object`.
    ///
    /// Abilities are scanned in order; inert abilities (empty action or
    /// object pattern) are skipped, and a matcher error counts as a
    /// non-match. The scan stops at the first ability whose action and
    /// object patterns both match.
    ///
    /// # Errors
    ///
    /// - `AuthzError::NoAbilities` - The user's roles grant no abilities at
    ///   all
    /// - `AuthzError::Forbidden` - No ability matched
    /// - `AuthzError::Dependency` - Role resolution failed
    pub async fn authorize(&self, user: &User, action: &str, object: &str) -> AuthzResult<()> {
        let abilities = self.user_abilities(user).await?;
        if abilities.is_empty() {
            return Err(AuthzError::NoAbilities);
        }

        if self.scan(action, object, &abilities) {
            tracing::debug!(user = user.id(), action, object, "authorization granted");
            Ok(())
        } else {
            tracing::debug!(user = user.id(), action, object, "authorization denied");
            Err(AuthzError::forbidden(action, object))
        }
    }

    fn scan(&self, action: &str, object: &str, abilities: &[Ability]) -> bool {
        for ability in abilities {
            if ability.is_inert() {
                continue;
            }

            if !self.matches(action, ability.action()) {
                continue;
            }

            if !self.matches(object, ability.object()) {
                continue;
            }

            return true;
        }

        false
    }

    // Fail-closed: a matcher error is a non-match.
    fn matches(&self, candidate: &str, pattern: &str) -> bool {
        match self.matcher.matches(candidate, pattern) {
            Ok(matched) => matched,
            Err(error) => {
                tracing::warn!(pattern, %error, "matcher failed; treating as non-match");
                false
            }
        }
    }
}

impl std::fmt::Debug for AuthorizationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationEngine").finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================
