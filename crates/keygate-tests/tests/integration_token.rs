// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Integration tests for the token subsystem: claims construction, signing,
//! parsing, and the algorithm-confusion guard.

use std::time::Duration;

use keygate_core::error::{ConfigError, TokenError};
use keygate_tests::common::{
    fixed_now, init_test_logging, AuthFixtures, UserFixtures, TEST_SECRET,
};
use keygate_token::{AuthConfig, KeyMaterial, TokenService};

#[tokio::test]
async fn test_token_round_trip() {
    init_test_logging();

    let service = TokenService::new(AuthFixtures::hmac_config());
    let user = UserFixtures::alice();

    let claims = service.new_claims(&user);
    let issued = service.issue(&claims).unwrap();

    assert_eq!(issued.id(), claims.jti);
    assert_eq!(issued.user_id(), user.id());

    let parsed = service.parse(issued.value()).unwrap();
    assert_eq!(parsed, issued);
    assert_eq!(parsed.value(), issued.value());
}

#[tokio::test]
async fn test_deterministic_claims() {
    init_test_logging();

    let service = AuthFixtures::deterministic_token_service(AuthFixtures::hmac_config());
    let user = UserFixtures::alice();

    let first = service.new_claims(&user);
    assert_eq!(first.jti, "claims-1");
    assert_eq!(first.iat, fixed_now().timestamp());
    assert_eq!(first.exp, fixed_now().timestamp() + 3600);
    assert_eq!(first.user.id, user.id());
    assert_eq!(first.user.username, "alice");
    assert_eq!(first.user.roles, user.roles().to_vec());

    // Claims IDs are fresh per issuance, never reused.
    let second = service.new_claims(&user);
    assert_eq!(second.jti, "claims-2");
}

#[tokio::test]
async fn test_expired_token_fails_unless_validation_skipped() {
    init_test_logging();

    // Zero lifetime and a clock far in the past: immediately expired.
    let strict = AuthFixtures::deterministic_token_service(AuthFixtures::hmac_config_with(
        Duration::from_secs(0),
        false,
    ));
    let issued = strict.issue(&strict.new_claims(&UserFixtures::alice())).unwrap();

    let error = strict.parse(issued.value()).unwrap_err();
    assert!(matches!(error, TokenError::InvalidToken { .. }));

    // The same token parses once claims validation is skipped.
    let lenient =
        TokenService::new(AuthFixtures::hmac_config_with(Duration::from_secs(0), true));
    let parsed = lenient.parse(issued.value()).unwrap();
    assert_eq!(parsed.user_id(), UserFixtures::alice().id());
    assert_eq!(parsed.id(), issued.id());
}

#[tokio::test]
async fn test_algorithm_confusion_never_verifies() {
    init_test_logging();

    let hmac = TokenService::new(AuthFixtures::hmac_config());
    let issued = hmac.issue(&hmac.new_claims(&UserFixtures::alice())).unwrap();

    let rsa = TokenService::new(AuthFixtures::rsa_config_with_placeholder_keys());

    let error = rsa.parse(issued.value()).unwrap_err();
    assert!(matches!(
        error,
        TokenError::Config(ConfigError::UnexpectedSigningMethod {
            configured: "RSA",
            observed: "HMAC",
        })
    ));
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    init_test_logging();

    let other = TokenService::new(
        AuthConfig::hmac("HS256", "a-different-secret", Duration::from_secs(3600), false)
            .unwrap(),
    );
    let issued = other.issue(&other.new_claims(&UserFixtures::alice())).unwrap();

    let service = TokenService::new(AuthFixtures::hmac_config());
    let error = service.parse(issued.value()).unwrap_err();
    assert!(matches!(error, TokenError::InvalidToken { .. }));
}

#[tokio::test]
async fn test_config_construction_failures() {
    init_test_logging();

    // Unrecognized algorithm name.
    let error =
        AuthConfig::hmac("HS9000", TEST_SECRET, Duration::from_secs(60), false).unwrap_err();
    assert!(matches!(error, ConfigError::InvalidAlgorithm { .. }));

    // Key shape mismatched against the declared family.
    let error = AuthConfig::new(
        "RS256",
        KeyMaterial::secret("just bytes"),
        KeyMaterial::RsaPublicPem(b"pem".to_vec()),
        Duration::from_secs(60),
        false,
    )
    .unwrap_err();
    assert!(matches!(error, ConfigError::InvalidKey { family: "RSA", .. }));
}

#[tokio::test]
async fn test_parse_rejects_garbage_and_tampering() {
    init_test_logging();

    let service = TokenService::new(AuthFixtures::hmac_config());

    assert!(matches!(
        service.parse("not-a-token").unwrap_err(),
        TokenError::InvalidToken { .. }
    ));

    let issued = service.issue(&service.new_claims(&UserFixtures::alice())).unwrap();
    let mut tampered = issued.value().to_string();
    let flipped = if tampered.pop() == Some('A') { 'B' } else { 'A' };
    tampered.push(flipped);

    assert!(service.parse(&tampered).is_err());
}
