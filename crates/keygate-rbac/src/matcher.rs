// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Pluggable ability pattern matching.
//!
//! The authorization engine tests requested action/object pairs against role
//! ability patterns through the [`AbilityMatcher`] trait. The syntax is a
//! pluggable strategy; whatever the implementation, two guarantees hold for
//! the engine to be usable:
//!
//! - An exact literal always matches itself
//! - The documented wildcard matches any candidate
//!
//! A matcher error is treated as a non-match by the engine (fail-closed),
//! never as a fatal authorization error.

use thiserror::Error;

use glob_match::glob_match;

// =============================================================================
// MatchError
// =============================================================================

/// A matcher-level failure.
///
/// The authorization scan downgrades this to "no match"; it exists so
/// matcher implementations with fallible syntaxes (e.g. compiled
/// expressions) have somewhere to report.
#[derive(Debug, Error)]
#[error("match failed: {message}")]
pub struct MatchError {
    message: String,
}

impl MatchError {
    /// Creates a new match error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// =============================================================================
// AbilityMatcher
// =============================================================================

/// Tests a candidate string against an ability pattern.
pub trait AbilityMatcher: Send + Sync {
    /// Returns `true` if `candidate` matches `pattern`.
    ///
    /// # Errors
    ///
    /// Implementations may fail on syntactically invalid patterns; the
    /// authorization engine treats any error as a non-match.
    fn matches(&self, candidate: &str, pattern: &str) -> Result<bool, MatchError>;
}

// =============================================================================
// GlobMatcher
// =============================================================================

/// The default matcher: glob-style patterns.
///
/// Supported syntax:
///
/// - `*` matches any sequence of characters (`doc*` matches `doc1`)
/// - `?` matches any single character
/// - `[abc]` matches one character from the set
/// - `{read,write}` matches either alternative
/// - Exact strings match exactly
///
/// A bare `*` therefore matches any candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobMatcher;

impl GlobMatcher {
    /// Creates a new glob matcher.
    pub fn new() -> Self {
        Self
    }
}

impl AbilityMatcher for GlobMatcher {
    fn matches(&self, candidate: &str, pattern: &str) -> Result<bool, MatchError> {
        Ok(glob_match(pattern, candidate))
    }
}

// =============================================================================
// Tests
// =============================================================================
