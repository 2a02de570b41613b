// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Token issuance and verification.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, decode_header, encode, Header, Validation};
use uuid::Uuid;

use keygate_core::error::{TokenError, TokenResult};
use keygate_core::types::{Token, User};

use crate::claims::{Claims, UserClaims};
use crate::config::AuthConfig;
use crate::keys;

// =============================================================================
// Injectable closures
// =============================================================================

/// The current-time source used when building claims.
///
/// Must be safe for concurrent invocation if the service is shared across
/// threads.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// The claims-ID generator; every issuance gets a fresh ID.
///
/// Must be safe for concurrent invocation if the service is shared across
/// threads.
pub type ClaimsIdGenerator = Arc<dyn Fn() -> String + Send + Sync>;

// =============================================================================
// TokenService
// =============================================================================

/// Builds, signs, and verifies identity tokens.
///
/// The service holds an immutable [`AuthConfig`] plus injected clock and
/// claims-ID closures; it has no other state and performs no I/O, so a
/// single instance can serve concurrent callers. Token persistence is the
/// caller's responsibility.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use keygate_core::types::User;
/// use keygate_token::{AuthConfig, TokenService};
///
/// let config = AuthConfig::hmac("HS256", "a-shared-secret", Duration::from_secs(3600), false)?;
/// let service = TokenService::new(config);
///
/// let user = User::new("u1", "alice", vec![]);
/// let token = service.issue(&service.new_claims(&user))?;
///
/// let parsed = service.parse(token.value())?;
/// assert_eq!(parsed, token);
/// # Ok::<(), keygate_core::error::KeygateError>(())
/// ```
#[derive(Clone)]
pub struct TokenService {
    config: AuthConfig,
    clock: Clock,
    claims_ids: ClaimsIdGenerator,
}

impl TokenService {
    /// Creates a new token service with the real clock and UUIDv4 claims IDs.
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config,
            clock: Arc::new(Utc::now),
            claims_ids: Arc::new(|| Uuid::new_v4().to_string()),
        }
    }

    /// Overrides the clock. Intended for deterministic tests.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Overrides the claims-ID generator. Intended for deterministic tests.
    pub fn with_claims_id_generator(
        mut self,
        generator: impl Fn() -> String + Send + Sync + 'static,
    ) -> Self {
        self.claims_ids = Arc::new(generator);
        self
    }

    /// Returns the service configuration.
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Builds claims for a user.
    ///
    /// The clock is read exactly once: `iat` and `exp` derive from the same
    /// instant, so they can never skew apart. The claims ID is freshly
    /// generated per call.
    pub fn new_claims(&self, user: &User) -> Claims {
        let now = (self.clock)();
        let iat = now.timestamp();
        let exp = iat + self.config.expiration().as_secs() as i64;

        Claims {
            user: UserClaims::from(user),
            exp,
            iat,
            jti: (self.claims_ids)(),
        }
    }

    /// Signs the claims into a token.
    ///
    /// The returned token's metadata derives from the claims; its `value` is
    /// the compact signed string.
    ///
    /// # Errors
    ///
    /// - `TokenError::Config` - The signing key could not be resolved
    /// - `TokenError::Signing` - The signing operation itself failed
    pub fn issue(&self, claims: &Claims) -> TokenResult<Token> {
        let key = keys::signing_key(&self.config)?;
        let header = Header::new(self.config.algorithm());

        let value = encode(&header, claims, &key)
            .map_err(|e| TokenError::signing_with("could not sign claims", e))?;

        token_from_claims(claims, value)
    }

    /// Parses and verifies a compact token string.
    ///
    /// The verification key is resolved against the algorithm declared in
    /// the token's header, which must belong to the configured family.
    /// Temporal claims (`exp`) are validated with zero leeway unless the
    /// configuration says to skip claims validation. On success the returned
    /// token's `value` is the original input string.
    ///
    /// # Errors
    ///
    /// - `TokenError::Config` - The declared algorithm family does not match
    ///   the configured one, or the verification key could not be resolved
    /// - `TokenError::InvalidToken` - The signature or structure is invalid,
    ///   or the token is expired
    /// - `TokenError::InvalidClaims` - The claims cannot be decoded into the
    ///   expected shape
    /// - `TokenError::Parse` - Any other lower-level failure
    pub fn parse(&self, value: &str) -> TokenResult<Token> {
        let header = decode_header(value)
            .map_err(|e| TokenError::invalid_token(format!("malformed token: {e}")))?;

        let key = keys::verifying_key(&self.config, header.alg)?;

        let mut validation = Validation::new(self.config.algorithm());
        validation.leeway = 0;
        validation.validate_aud = false;
        if self.config.skip_claims_validation() {
            validation.validate_exp = false;
            validation.required_spec_claims = Default::default();
        }

        let data = decode::<Claims>(value, &key, &validation).map_err(map_decode_error)?;

        token_from_claims(&data.claims, value.to_string())
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &self.config.algorithm())
            .field("family", &self.config.family())
            .field("expiration", &self.config.expiration())
            .finish_non_exhaustive()
    }
}

fn token_from_claims(claims: &Claims, value: String) -> TokenResult<Token> {
    let issued_at = claims
        .issued_at()
        .ok_or_else(|| TokenError::invalid_claims("issued-at timestamp out of range"))?;
    let expired_at = claims
        .expires_at()
        .ok_or_else(|| TokenError::invalid_claims("expiration timestamp out of range"))?;

    Ok(Token::new(
        claims.jti.clone(),
        claims.user.id.clone(),
        value,
        issued_at,
        expired_at,
    ))
}

fn map_decode_error(error: jsonwebtoken::errors::Error) -> TokenError {
    use jsonwebtoken::errors::ErrorKind;

    match error.kind() {
        ErrorKind::ExpiredSignature => TokenError::invalid_token("token is expired"),
        ErrorKind::ImmatureSignature => TokenError::invalid_token("token is not valid yet"),
        ErrorKind::InvalidSignature => TokenError::invalid_token("signature mismatch"),
        ErrorKind::InvalidToken | ErrorKind::InvalidAlgorithm | ErrorKind::Base64(_) => {
            TokenError::invalid_token(format!("invalid token: {error}"))
        }
        ErrorKind::Json(_) => {
            TokenError::invalid_claims(format!("claims do not match the expected shape: {error}"))
        }
        ErrorKind::MissingRequiredClaim(claim) => {
            TokenError::invalid_claims(format!("missing required claim: {claim}"))
        }
        _ => TokenError::parse(format!("token rejected: {error}")),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use keygate_core::error::ConfigError;
    use keygate_core::types::RoleId;
    use std::time::Duration;

    const SECRET: &str = "a-shared-secret-long-enough-for-tests";

    fn fixed_now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn service(expiration: Duration, skip: bool) -> TokenService {
        let config = AuthConfig::hmac("HS256", SECRET, expiration, skip).unwrap();
        TokenService::new(config)
            .with_clock(fixed_now)
            .with_claims_id_generator(|| "claims-1".to_string())
    }

    fn test_user() -> User {
        User::new("u1", "alice", vec![RoleId::new("admin")])
    }

    #[test]
    fn test_new_claims_single_clock_read() {
        let service = service(Duration::from_secs(3600), false);
        let claims = service.new_claims(&test_user());

        assert_eq!(claims.iat, 1_700_000_000);
        assert_eq!(claims.exp, 1_700_000_000 + 3600);
        assert_eq!(claims.jti, "claims-1");
        assert_eq!(claims.user.username, "alice");
        assert_eq!(claims.user.roles, vec![RoleId::new("admin")]);
    }

    #[test]
    fn test_issue_then_parse_round_trip() {
        let service = service(Duration::from_secs(3600), false);
        // Parse validates against the real clock, so issue relative to it.
        let service = service.with_clock(Utc::now);

        let claims = service.new_claims(&test_user());
        let issued = service.issue(&claims).unwrap();

        assert_eq!(issued.id(), claims.jti);
        assert_eq!(issued.user_id(), "u1");

        let parsed = service.parse(issued.value()).unwrap();
        assert_eq!(parsed, issued);
        assert_eq!(parsed.value(), issued.value());
    }

    #[test]
    fn test_expired_token_fails_parse() {
        let service = service(Duration::from_secs(0), false);
        let claims = service.new_claims(&test_user());
        let issued = service.issue(&claims).unwrap();

        let error = service.parse(issued.value()).unwrap_err();
        assert!(matches!(error, TokenError::InvalidToken { .. }));
    }

    #[test]
    fn test_skip_claims_validation_parses_expired_token() {
        let strict = service(Duration::from_secs(0), false);
        let issued = strict.issue(&strict.new_claims(&test_user())).unwrap();

        let lenient = service(Duration::from_secs(0), true);
        let parsed = lenient.parse(issued.value()).unwrap();
        assert_eq!(parsed.user_id(), "u1");
        assert_eq!(parsed.id(), "claims-1");
    }

    #[test]
    fn test_wrong_secret_fails_parse() {
        let service_a = service(Duration::from_secs(3600), false).with_clock(Utc::now);
        let issued = service_a.issue(&service_a.new_claims(&test_user())).unwrap();

        let config = AuthConfig::hmac("HS256", "another-secret", Duration::from_secs(3600), false)
            .unwrap();
        let service_b = TokenService::new(config);

        let error = service_b.parse(issued.value()).unwrap_err();
        assert!(matches!(error, TokenError::InvalidToken { .. }));
    }

    #[test]
    fn test_algorithm_confusion_is_rejected() {
        let hmac = service(Duration::from_secs(3600), false).with_clock(Utc::now);
        let issued = hmac.issue(&hmac.new_claims(&test_user())).unwrap();

        // A verifier provisioned for RSA must never accept an HMAC token,
        // whatever its key material contains.
        let config = AuthConfig::rsa(
            "RS256",
            b"unused".to_vec(),
            b"unused".to_vec(),
            Duration::from_secs(3600),
            false,
        )
        .unwrap();
        let rsa = TokenService::new(config);

        let error = rsa.parse(issued.value()).unwrap_err();
        assert!(matches!(
            error,
            TokenError::Config(ConfigError::UnexpectedSigningMethod { .. })
        ));
    }

    #[test]
    fn test_tampered_token_fails_parse() {
        let service = service(Duration::from_secs(3600), false).with_clock(Utc::now);
        let issued = service.issue(&service.new_claims(&test_user())).unwrap();

        let mut tampered = issued.value().to_string();
        tampered.pop();
        tampered.push('x');

        assert!(service.parse(&tampered).is_err());
    }

    #[test]
    fn test_garbage_string_is_invalid_token() {
        let service = service(Duration::from_secs(3600), false);
        let error = service.parse("definitely not a token").unwrap_err();
        assert!(matches!(error, TokenError::InvalidToken { .. }));
    }

    #[test]
    fn test_fresh_claims_id_per_issuance() {
        let config = AuthConfig::hmac("HS256", SECRET, Duration::from_secs(3600), false).unwrap();
        let service = TokenService::new(config).with_clock(fixed_now);

        let a = service.new_claims(&test_user());
        let b = service.new_claims(&test_user());
        assert_ne!(a.jti, b.jti);
    }
}
