// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Key resolution.
//!
//! Turns the opaque [`KeyMaterial`] held by an [`AuthConfig`] into the typed
//! keys `jsonwebtoken` signs and verifies with. The verifying path
//! additionally takes the algorithm *declared in the token being parsed* and
//! refuses to produce a key unless that algorithm belongs to the configured
//! family — the algorithm-confusion guard: a token signed with a weaker or
//! attacker-chosen algorithm is rejected before any key material is touched.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};

use keygate_core::error::{ConfigError, ConfigResult};

use crate::config::{AlgorithmFamily, AuthConfig, KeyMaterial};

/// Resolves the typed signing key for the configured algorithm family.
///
/// # Errors
///
/// Returns `ConfigError::InvalidKey` if the key material's shape does not
/// match the family or its PEM encoding cannot be parsed.
pub fn signing_key(config: &AuthConfig) -> ConfigResult<EncodingKey> {
    let family = config.family();
    match (family, config.signing_key()) {
        (AlgorithmFamily::Hmac, KeyMaterial::Secret(bytes)) => {
            Ok(EncodingKey::from_secret(bytes))
        }
        (AlgorithmFamily::Rsa | AlgorithmFamily::RsaPss, KeyMaterial::RsaPrivatePem(pem)) => {
            EncodingKey::from_rsa_pem(pem)
                .map_err(|e| ConfigError::invalid_key(family.as_str(), e.to_string()))
        }
        (AlgorithmFamily::Ecdsa, KeyMaterial::EcPrivatePem(pem)) => {
            EncodingKey::from_ec_pem(pem)
                .map_err(|e| ConfigError::invalid_key(family.as_str(), e.to_string()))
        }
        (family, other) => Err(ConfigError::invalid_key(
            family.as_str(),
            format!("unexpected key shape: {}", other.shape()),
        )),
    }
}

/// Resolves the typed verification key, guarding against algorithm confusion.
///
/// `observed` is the algorithm declared in the header of the token being
/// parsed. If its family differs from the configured one the resolution
/// fails closed, even when both keys happen to be present.
///
/// # Errors
///
/// - `ConfigError::UnexpectedSigningMethod` - The observed algorithm does
///   not belong to the configured family
/// - `ConfigError::InvalidKey` - The key material's shape does not match the
///   family or its PEM encoding cannot be parsed
pub fn verifying_key(config: &AuthConfig, observed: Algorithm) -> ConfigResult<DecodingKey> {
    let family = config.family();
    let observed_family = AlgorithmFamily::of(observed);
    if observed_family != Some(family) {
        return Err(ConfigError::unexpected_signing_method(
            family.as_str(),
            observed_family.map_or("EdDSA", |f| f.as_str()),
        ));
    }

    match (family, config.verifying_key()) {
        (AlgorithmFamily::Hmac, KeyMaterial::Secret(bytes)) => {
            Ok(DecodingKey::from_secret(bytes))
        }
        (AlgorithmFamily::Rsa | AlgorithmFamily::RsaPss, KeyMaterial::RsaPublicPem(pem)) => {
            DecodingKey::from_rsa_pem(pem)
                .map_err(|e| ConfigError::invalid_key(family.as_str(), e.to_string()))
        }
        (AlgorithmFamily::Ecdsa, KeyMaterial::EcPublicPem(pem)) => {
            DecodingKey::from_ec_pem(pem)
                .map_err(|e| ConfigError::invalid_key(family.as_str(), e.to_string()))
        }
        (family, other) => Err(ConfigError::invalid_key(
            family.as_str(),
            format!("unexpected key shape: {}", other.shape()),
        )),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn hmac_config() -> AuthConfig {
        AuthConfig::hmac("HS256", "a-shared-secret", Duration::from_secs(60), false).unwrap()
    }

    #[test]
    fn test_hmac_keys_resolve() {
        let config = hmac_config();
        assert!(signing_key(&config).is_ok());
        assert!(verifying_key(&config, Algorithm::HS256).is_ok());
    }

    #[test]
    fn test_family_mismatch_is_rejected_before_key_material() {
        // RSA config with placeholder PEMs: the guard must fire on the
        // observed family alone, never reaching PEM parsing.
        let config = AuthConfig::rsa(
            "RS256",
            b"not a real pem".to_vec(),
            b"not a real pem".to_vec(),
            Duration::from_secs(60),
            false,
        )
        .unwrap();

        let error = verifying_key(&config, Algorithm::HS256).err().unwrap();
        assert!(matches!(
            error,
            ConfigError::UnexpectedSigningMethod {
                configured: "RSA",
                observed: "HMAC",
            }
        ));
    }

    #[test]
    fn test_same_family_different_strength_is_allowed() {
        // HS384 observed under an HS256 config passes the family guard;
        // the decode step still pins the exact algorithm.
        let config = hmac_config();
        assert!(verifying_key(&config, Algorithm::HS384).is_ok());
    }

    #[test]
    fn test_eddsa_observed_is_rejected() {
        let config = hmac_config();
        let error = verifying_key(&config, Algorithm::EdDSA).err().unwrap();
        assert!(matches!(
            error,
            ConfigError::UnexpectedSigningMethod { observed: "EdDSA", .. }
        ));
    }

    #[test]
    fn test_garbage_pem_is_an_invalid_key() {
        let config = AuthConfig::rsa(
            "RS256",
            b"garbage".to_vec(),
            b"garbage".to_vec(),
            Duration::from_secs(60),
            false,
        )
        .unwrap();

        let error = signing_key(&config).err().unwrap();
        assert!(matches!(error, ConfigError::InvalidKey { family: "RSA", .. }));

        let error = verifying_key(&config, Algorithm::RS256).err().unwrap();
        assert!(matches!(error, ConfigError::InvalidKey { family: "RSA", .. }));
    }
}
