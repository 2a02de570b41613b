// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Token service configuration.
//!
//! An [`AuthConfig`] is constructed once and never mutated. Every invariant
//! the token service relies on — a recognized algorithm name, key material
//! whose shape matches the algorithm family — is enforced here, at
//! construction time, so the signing and parsing paths never have to assert
//! key types at runtime.

use std::time::Duration;

use jsonwebtoken::Algorithm;
use serde::{Deserialize, Serialize};

use keygate_core::error::{ConfigError, ConfigResult};

// =============================================================================
// AlgorithmFamily
// =============================================================================

/// The recognized signing algorithm families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmFamily {
    /// HMAC with SHA-2 (HS256/HS384/HS512); symmetric byte secret.
    Hmac,
    /// RSASSA-PKCS1-v1_5 (RS256/RS384/RS512); RSA key pair.
    Rsa,
    /// RSASSA-PSS (PS256/PS384/PS512); RSA key pair.
    RsaPss,
    /// ECDSA (ES256/ES384); EC key pair.
    Ecdsa,
}

impl AlgorithmFamily {
    /// Classifies an algorithm into its family.
    ///
    /// Returns `None` for algorithms outside the recognized set (EdDSA).
    pub fn of(algorithm: Algorithm) -> Option<Self> {
        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Some(Self::Hmac),
            Algorithm::RS256 | Algorithm::RS384 | Algorithm::RS512 => Some(Self::Rsa),
            Algorithm::PS256 | Algorithm::PS384 | Algorithm::PS512 => Some(Self::RsaPss),
            Algorithm::ES256 | Algorithm::ES384 => Some(Self::Ecdsa),
            Algorithm::EdDSA => None,
        }
    }

    /// Returns the family name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hmac => "HMAC",
            Self::Rsa => "RSA",
            Self::RsaPss => "RSA-PSS",
            Self::Ecdsa => "ECDSA",
        }
    }
}

impl std::fmt::Display for AlgorithmFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// KeyMaterial
// =============================================================================

/// Opaque signing or verification key material, tagged by shape.
///
/// Each algorithm family mandates specific shapes: a symmetric byte secret
/// for HMAC, PEM-encoded private/public keys for the asymmetric families.
/// Shape is validated against the family when an [`AuthConfig`] is
/// constructed; PEM well-formedness is checked where the typed key is
/// actually built.
#[derive(Clone)]
pub enum KeyMaterial {
    /// A symmetric byte secret (HMAC).
    Secret(Vec<u8>),
    /// A PEM-encoded RSA private key (RSA, RSA-PSS signing).
    RsaPrivatePem(Vec<u8>),
    /// A PEM-encoded RSA public key (RSA, RSA-PSS verification).
    RsaPublicPem(Vec<u8>),
    /// A PEM-encoded EC private key (ECDSA signing).
    EcPrivatePem(Vec<u8>),
    /// A PEM-encoded EC public key (ECDSA verification).
    EcPublicPem(Vec<u8>),
}

impl KeyMaterial {
    /// Creates a symmetric secret.
    pub fn secret(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Secret(bytes.into())
    }

    /// Returns the shape name for error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Secret(_) => "secret",
            Self::RsaPrivatePem(_) => "RSA private key",
            Self::RsaPublicPem(_) => "RSA public key",
            Self::EcPrivatePem(_) => "EC private key",
            Self::EcPublicPem(_) => "EC public key",
        }
    }
}

impl std::fmt::Debug for KeyMaterial {
    // Key bytes never reach logs.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.shape())
    }
}

// =============================================================================
// AuthConfig
// =============================================================================

/// Immutable token service configuration.
///
/// Holds the signing algorithm, its family, the signing and verification key
/// material (equal for symmetric families), the token lifetime, and the
/// claims-validation switch. An invalid algorithm name or a key whose shape
/// does not match the algorithm family is a construction-time failure.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    algorithm: Algorithm,
    family: AlgorithmFamily,
    signing_key: KeyMaterial,
    verifying_key: KeyMaterial,
    expiration: Duration,
    skip_claims_validation: bool,
}

impl AuthConfig {
    /// Creates a configuration from an algorithm name and key material.
    ///
    /// # Errors
    ///
    /// - `ConfigError::InvalidAlgorithm` - The name is not a recognized
    ///   algorithm
    /// - `ConfigError::InvalidKey` - A key's shape does not match the
    ///   algorithm family
    pub fn new(
        algorithm: &str,
        signing_key: KeyMaterial,
        verifying_key: KeyMaterial,
        expiration: Duration,
        skip_claims_validation: bool,
    ) -> ConfigResult<Self> {
        let parsed: Algorithm = algorithm
            .parse()
            .map_err(|_| ConfigError::invalid_algorithm(algorithm))?;
        let family = AlgorithmFamily::of(parsed)
            .ok_or_else(|| ConfigError::invalid_algorithm(algorithm))?;

        check_shape(family, &signing_key, Usage::Signing)?;
        check_shape(family, &verifying_key, Usage::Verifying)?;

        Ok(Self {
            algorithm: parsed,
            family,
            signing_key,
            verifying_key,
            expiration,
            skip_claims_validation,
        })
    }

    /// Creates an HMAC configuration, using the secret for both signing and
    /// verification.
    pub fn hmac(
        algorithm: &str,
        secret: impl Into<Vec<u8>>,
        expiration: Duration,
        skip_claims_validation: bool,
    ) -> ConfigResult<Self> {
        let secret = secret.into();
        Self::new(
            algorithm,
            KeyMaterial::Secret(secret.clone()),
            KeyMaterial::Secret(secret),
            expiration,
            skip_claims_validation,
        )
    }

    /// Creates an RSA configuration from PEM-encoded keys.
    ///
    /// Covers both the RSA (RS*) and RSA-PSS (PS*) families, which share key
    /// material shapes.
    pub fn rsa(
        algorithm: &str,
        private_key_pem: impl Into<Vec<u8>>,
        public_key_pem: impl Into<Vec<u8>>,
        expiration: Duration,
        skip_claims_validation: bool,
    ) -> ConfigResult<Self> {
        Self::new(
            algorithm,
            KeyMaterial::RsaPrivatePem(private_key_pem.into()),
            KeyMaterial::RsaPublicPem(public_key_pem.into()),
            expiration,
            skip_claims_validation,
        )
    }

    /// Creates an ECDSA configuration from PEM-encoded keys.
    pub fn ecdsa(
        algorithm: &str,
        private_key_pem: impl Into<Vec<u8>>,
        public_key_pem: impl Into<Vec<u8>>,
        expiration: Duration,
        skip_claims_validation: bool,
    ) -> ConfigResult<Self> {
        Self::new(
            algorithm,
            KeyMaterial::EcPrivatePem(private_key_pem.into()),
            KeyMaterial::EcPublicPem(public_key_pem.into()),
            expiration,
            skip_claims_validation,
        )
    }

    /// Returns the configured algorithm.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Returns the configured algorithm family.
    pub fn family(&self) -> AlgorithmFamily {
        self.family
    }

    /// Returns the signing key material.
    pub fn signing_key(&self) -> &KeyMaterial {
        &self.signing_key
    }

    /// Returns the verification key material.
    pub fn verifying_key(&self) -> &KeyMaterial {
        &self.verifying_key
    }

    /// Returns the token lifetime.
    pub fn expiration(&self) -> Duration {
        self.expiration
    }

    /// Returns `true` if temporal claims validation is skipped during parse.
    pub fn skip_claims_validation(&self) -> bool {
        self.skip_claims_validation
    }
}

#[derive(Clone, Copy)]
enum Usage {
    Signing,
    Verifying,
}

fn check_shape(family: AlgorithmFamily, key: &KeyMaterial, usage: Usage) -> ConfigResult<()> {
    let ok = match (family, usage) {
        (AlgorithmFamily::Hmac, _) => matches!(key, KeyMaterial::Secret(_)),
        (AlgorithmFamily::Rsa | AlgorithmFamily::RsaPss, Usage::Signing) => {
            matches!(key, KeyMaterial::RsaPrivatePem(_))
        }
        (AlgorithmFamily::Rsa | AlgorithmFamily::RsaPss, Usage::Verifying) => {
            matches!(key, KeyMaterial::RsaPublicPem(_))
        }
        (AlgorithmFamily::Ecdsa, Usage::Signing) => matches!(key, KeyMaterial::EcPrivatePem(_)),
        (AlgorithmFamily::Ecdsa, Usage::Verifying) => matches!(key, KeyMaterial::EcPublicPem(_)),
    };

    if ok {
        Ok(())
    } else {
        Err(ConfigError::invalid_key(
            family.as_str(),
            format!("unexpected key shape: {}", key.shape()),
        ))
    }
}

// =============================================================================
// AuthSettings
// =============================================================================

/// Serde-facing configuration, convertible into an [`AuthConfig`].
///
/// The algorithm travels as its string name; which key fields are required
/// depends on the algorithm family.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// Algorithm name, e.g. `"HS256"`.
    pub algorithm: String,
    /// Symmetric secret (HMAC families).
    #[serde(skip_serializing)]
    pub secret: Option<String>,
    /// PEM-encoded private key (asymmetric families).
    #[serde(skip_serializing)]
    pub private_key_pem: Option<String>,
    /// PEM-encoded public key (asymmetric families).
    pub public_key_pem: Option<String>,
    /// Token lifetime in seconds.
    pub expiration_secs: u64,
    /// Whether to skip temporal claims validation during parse.
    pub skip_claims_validation: bool,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            algorithm: "HS256".to_string(),
            secret: None,
            private_key_pem: None,
            public_key_pem: None,
            expiration_secs: 3600,
            skip_claims_validation: false,
        }
    }
}

impl TryFrom<AuthSettings> for AuthConfig {
    type Error = ConfigError;

    fn try_from(settings: AuthSettings) -> ConfigResult<Self> {
        let parsed: Algorithm = settings
            .algorithm
            .parse()
            .map_err(|_| ConfigError::invalid_algorithm(settings.algorithm.as_str()))?;
        let family = AlgorithmFamily::of(parsed)
            .ok_or_else(|| ConfigError::invalid_algorithm(settings.algorithm.as_str()))?;

        let expiration = Duration::from_secs(settings.expiration_secs);

        match family {
            AlgorithmFamily::Hmac => {
                let secret = settings.secret.ok_or_else(|| {
                    ConfigError::invalid_key(family.as_str(), "secret is required")
                })?;
                AuthConfig::hmac(
                    &settings.algorithm,
                    secret,
                    expiration,
                    settings.skip_claims_validation,
                )
            }
            AlgorithmFamily::Rsa | AlgorithmFamily::RsaPss => {
                let (private, public) = require_pem_pair(family, &settings)?;
                AuthConfig::rsa(
                    &settings.algorithm,
                    private,
                    public,
                    expiration,
                    settings.skip_claims_validation,
                )
            }
            AlgorithmFamily::Ecdsa => {
                let (private, public) = require_pem_pair(family, &settings)?;
                AuthConfig::ecdsa(
                    &settings.algorithm,
                    private,
                    public,
                    expiration,
                    settings.skip_claims_validation,
                )
            }
        }
    }
}

fn require_pem_pair(
    family: AlgorithmFamily,
    settings: &AuthSettings,
) -> ConfigResult<(Vec<u8>, Vec<u8>)> {
    let private = settings.private_key_pem.as_ref().ok_or_else(|| {
        ConfigError::invalid_key(family.as_str(), "private_key_pem is required")
    })?;
    let public = settings.public_key_pem.as_ref().ok_or_else(|| {
        ConfigError::invalid_key(family.as_str(), "public_key_pem is required")
    })?;
    Ok((private.clone().into_bytes(), public.clone().into_bytes()))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EXPIRATION: Duration = Duration::from_secs(3600);

    #[test]
    fn test_hmac_config() {
        let config = AuthConfig::hmac("HS256", "a-shared-secret", EXPIRATION, false).unwrap();

        assert_eq!(config.algorithm(), Algorithm::HS256);
        assert_eq!(config.family(), AlgorithmFamily::Hmac);
        assert_eq!(config.expiration(), EXPIRATION);
        assert!(!config.skip_claims_validation());
    }

    #[test]
    fn test_invalid_algorithm_name_fails_construction() {
        let error = AuthConfig::hmac("HS1024", "secret", EXPIRATION, false).unwrap_err();
        assert!(matches!(error, ConfigError::InvalidAlgorithm { .. }));

        // EdDSA is outside the recognized families.
        let error = AuthConfig::hmac("EdDSA", "secret", EXPIRATION, false).unwrap_err();
        assert!(matches!(error, ConfigError::InvalidAlgorithm { .. }));
    }

    #[test]
    fn test_key_shape_mismatch_fails_construction() {
        // A byte secret where an RSA private key is required.
        let error = AuthConfig::new(
            "RS256",
            KeyMaterial::secret("not a key pair"),
            KeyMaterial::RsaPublicPem(b"---".to_vec()),
            EXPIRATION,
            false,
        )
        .unwrap_err();
        assert!(matches!(error, ConfigError::InvalidKey { family: "RSA", .. }));

        // An EC key offered to an HMAC config.
        let error = AuthConfig::new(
            "HS256",
            KeyMaterial::EcPrivatePem(b"---".to_vec()),
            KeyMaterial::secret("secret"),
            EXPIRATION,
            false,
        )
        .unwrap_err();
        assert!(matches!(error, ConfigError::InvalidKey { family: "HMAC", .. }));
    }

    #[test]
    fn test_family_classification() {
        assert_eq!(AlgorithmFamily::of(Algorithm::HS512), Some(AlgorithmFamily::Hmac));
        assert_eq!(AlgorithmFamily::of(Algorithm::RS384), Some(AlgorithmFamily::Rsa));
        assert_eq!(AlgorithmFamily::of(Algorithm::PS256), Some(AlgorithmFamily::RsaPss));
        assert_eq!(AlgorithmFamily::of(Algorithm::ES384), Some(AlgorithmFamily::Ecdsa));
        assert_eq!(AlgorithmFamily::of(Algorithm::EdDSA), None);
    }

    #[test]
    fn test_pss_uses_rsa_key_shapes() {
        let config = AuthConfig::rsa("PS256", b"priv".to_vec(), b"pub".to_vec(), EXPIRATION, false)
            .unwrap();
        assert_eq!(config.family(), AlgorithmFamily::RsaPss);
    }

    #[test]
    fn test_key_material_debug_redacts() {
        let material = KeyMaterial::secret("super-secret-bytes");
        assert_eq!(format!("{:?}", material), "secret");
    }

    #[test]
    fn test_settings_round_trip_hmac() {
        let settings: AuthSettings = serde_json::from_str(
            r#"{"algorithm":"HS384","secret":"shared","expiration_secs":600}"#,
        )
        .unwrap();

        let config = AuthConfig::try_from(settings).unwrap();
        assert_eq!(config.algorithm(), Algorithm::HS384);
        assert_eq!(config.expiration(), Duration::from_secs(600));
    }

    #[test]
    fn test_settings_missing_secret() {
        let settings: AuthSettings =
            serde_json::from_str(r#"{"algorithm":"HS256"}"#).unwrap();

        let error = AuthConfig::try_from(settings).unwrap_err();
        assert!(matches!(error, ConfigError::InvalidKey { .. }));
    }

    #[test]
    fn test_settings_never_serialize_secrets() {
        let settings = AuthSettings {
            secret: Some("hush-hush".to_string()),
            private_key_pem: Some("PRIVATE KEY BYTES".to_string()),
            ..AuthSettings::default()
        };

        let json = serde_json::to_string(&settings).unwrap();
        assert!(!json.contains("hush-hush"));
        assert!(!json.contains("PRIVATE KEY BYTES"));
    }
}
