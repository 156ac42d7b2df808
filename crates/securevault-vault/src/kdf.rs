// SPDX-FileCopyrightText: 2026 SecureVault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Password-based key derivation.
//!
//! The default is PBKDF2-HMAC-SHA256 with a 16-byte salt, which is what every
//! existing vault was created with. Argon2id (Version 0x13) is available for
//! new vaults. The parameters used are recorded in the settings record so a
//! vault always unlocks with the KDF it was created with.

use std::num::NonZeroU32;

use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};
use secrecy::{ExposeSecret, SecretString};
use securevault_config::model::VaultConfig;
use securevault_core::{KdfAlgorithm, VaultError, VaultSettings};
use tracing::debug;
use zeroize::Zeroizing;

use crate::crypto::{KEY_LEN, MasterKey};

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// Lowest PBKDF2 iteration count accepted for derivation.
pub const MIN_PBKDF2_ITERATIONS: u32 = 100_000;

/// Lowest Argon2id memory cost (KiB) accepted for derivation.
pub const MIN_ARGON2_MEMORY_COST: u32 = 32_768;

/// Lowest Argon2id pass count accepted for derivation.
pub const MIN_ARGON2_ITERATIONS: u32 = 2;

/// Random per-vault salt. Not secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Salt([u8; SALT_LEN]);

impl Salt {
    /// Draw a fresh salt from the system CSPRNG.
    pub fn generate() -> Result<Self, VaultError> {
        let mut bytes = [0u8; SALT_LEN];
        SystemRandom::new()
            .fill(&mut bytes)
            .map_err(|_| VaultError::Derivation("failed to generate random salt".to_string()))?;
        Ok(Self(bytes))
    }

    pub fn from_bytes(bytes: [u8; SALT_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SALT_LEN] {
        &self.0
    }

    /// Lowercase hex, 32 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, VaultError> {
        let bytes = hex::decode(s)
            .map_err(|e| VaultError::Derivation(format!("stored salt is not valid hex: {e}")))?;
        let bytes: [u8; SALT_LEN] = bytes.try_into().map_err(|v: Vec<u8>| {
            VaultError::Derivation(format!(
                "stored salt must be {SALT_LEN} bytes, got {}",
                v.len()
            ))
        })?;
        Ok(Self(bytes))
    }
}

/// Which KDF to run and with what cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KdfParams {
    Pbkdf2Sha256 {
        iterations: u32,
    },
    Argon2id {
        memory_cost: u32,
        iterations: u32,
        parallelism: u32,
    },
}

impl Default for KdfParams {
    fn default() -> Self {
        Self::Pbkdf2Sha256 {
            iterations: MIN_PBKDF2_ITERATIONS,
        }
    }
}

impl KdfParams {
    /// Parameters for a new vault, taken from the `[vault]` config section.
    pub fn from_config(config: &VaultConfig) -> Self {
        match config.kdf {
            KdfAlgorithm::Pbkdf2Sha256 => Self::Pbkdf2Sha256 {
                iterations: config.pbkdf2_iterations,
            },
            KdfAlgorithm::Argon2id => Self::Argon2id {
                memory_cost: config.argon2_memory_cost,
                iterations: config.argon2_iterations,
                parallelism: config.argon2_parallelism,
            },
        }
    }

    /// Parameters an existing vault was created with.
    pub fn from_settings(settings: &VaultSettings) -> Result<Self, VaultError> {
        match settings.kdf() {
            KdfAlgorithm::Pbkdf2Sha256 => Ok(Self::Pbkdf2Sha256 {
                iterations: settings.derivation_iterations,
            }),
            KdfAlgorithm::Argon2id => {
                let memory_cost = settings.kdf_memory_cost.ok_or_else(|| {
                    VaultError::Derivation("settings lack Argon2id memory cost".to_string())
                })?;
                let parallelism = settings.kdf_parallelism.ok_or_else(|| {
                    VaultError::Derivation("settings lack Argon2id parallelism".to_string())
                })?;
                Ok(Self::Argon2id {
                    memory_cost,
                    iterations: settings.derivation_iterations,
                    parallelism,
                })
            }
        }
    }

    /// Build the settings record describing a vault keyed with these params.
    pub fn to_settings(&self, salt: &Salt) -> VaultSettings {
        let (kdf, iterations, memory_cost, parallelism) = match *self {
            // Left untagged so older readers still parse the record.
            Self::Pbkdf2Sha256 { iterations } => (None, iterations, None, None),
            Self::Argon2id {
                memory_cost,
                iterations,
                parallelism,
            } => (
                Some(KdfAlgorithm::Argon2id),
                iterations,
                Some(memory_cost),
                Some(parallelism),
            ),
        };
        VaultSettings {
            salt: salt.to_hex(),
            derivation_iterations: iterations,
            is_first_run: false,
            kdf,
            kdf_memory_cost: memory_cost,
            kdf_parallelism: parallelism,
        }
    }

    pub fn algorithm(&self) -> KdfAlgorithm {
        match self {
            Self::Pbkdf2Sha256 { .. } => KdfAlgorithm::Pbkdf2Sha256,
            Self::Argon2id { .. } => KdfAlgorithm::Argon2id,
        }
    }

    /// Reject cost parameters below the supported floor.
    pub fn validate(&self) -> Result<(), VaultError> {
        match *self {
            Self::Pbkdf2Sha256 { iterations } if iterations < MIN_PBKDF2_ITERATIONS => {
                Err(VaultError::Derivation(format!(
                    "PBKDF2 iteration count {iterations} is below the minimum of {MIN_PBKDF2_ITERATIONS}"
                )))
            }
            Self::Argon2id { memory_cost, .. } if memory_cost < MIN_ARGON2_MEMORY_COST => {
                Err(VaultError::Derivation(format!(
                    "Argon2id memory cost {memory_cost} KiB is below the minimum of {MIN_ARGON2_MEMORY_COST}"
                )))
            }
            Self::Argon2id { iterations, .. } if iterations < MIN_ARGON2_ITERATIONS => {
                Err(VaultError::Derivation(format!(
                    "Argon2id iteration count {iterations} is below the minimum of {MIN_ARGON2_ITERATIONS}"
                )))
            }
            Self::Argon2id { parallelism: 0, .. } => Err(VaultError::Derivation(
                "Argon2id parallelism must be at least 1".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// Run the KDF synchronously. CPU-bound; call from a blocking context.
pub fn derive_key_blocking(
    password: &[u8],
    salt: &Salt,
    params: &KdfParams,
) -> Result<MasterKey, VaultError> {
    if password.is_empty() {
        return Err(VaultError::Derivation("password must not be empty".to_string()));
    }
    params.validate()?;

    let mut output = Zeroizing::new([0u8; KEY_LEN]);
    match *params {
        KdfParams::Pbkdf2Sha256 { iterations } => {
            let iterations = NonZeroU32::new(iterations).ok_or_else(|| {
                VaultError::Derivation("PBKDF2 iteration count must be non-zero".to_string())
            })?;
            pbkdf2::derive(
                pbkdf2::PBKDF2_HMAC_SHA256,
                iterations,
                salt.as_bytes(),
                password,
                output.as_mut(),
            );
        }
        KdfParams::Argon2id {
            memory_cost,
            iterations,
            parallelism,
        } => {
            let argon_params =
                argon2::Params::new(memory_cost, iterations, parallelism, Some(KEY_LEN))
                    .map_err(|e| VaultError::Derivation(format!("invalid Argon2id parameters: {e}")))?;
            argon2::Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, argon_params)
                .hash_password_into(password, salt.as_bytes(), output.as_mut())
                .map_err(|e| VaultError::Derivation(format!("Argon2id key derivation failed: {e}")))?;
        }
    }

    Ok(MasterKey::from_zeroizing(output))
}

/// Derive the vault key from `password`.
///
/// With `salt: None` a fresh salt is generated (first-run setup); otherwise
/// the stored salt is reused so the same password reproduces the same key.
/// The work runs on the blocking pool so the caller's task is suspended
/// rather than stalling the runtime.
pub async fn derive_key(
    password: &SecretString,
    salt: Option<Salt>,
    params: KdfParams,
) -> Result<(MasterKey, Salt), VaultError> {
    if password.expose_secret().is_empty() {
        return Err(VaultError::Derivation("password must not be empty".to_string()));
    }
    let salt = match salt {
        Some(salt) => salt,
        None => Salt::generate()?,
    };

    // Owned copy for the blocking closure; zeroed on drop.
    let password = Zeroizing::new(password.expose_secret().as_bytes().to_vec());
    let key = tokio::task::spawn_blocking(move || derive_key_blocking(&password, &salt, &params))
        .await
        .map_err(|e| VaultError::Internal(format!("key derivation task failed: {e}")))??;

    debug!(kdf = ?params.algorithm(), "derived vault key");
    Ok((key, salt))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_argon() -> KdfParams {
        KdfParams::Argon2id {
            memory_cost: MIN_ARGON2_MEMORY_COST,
            iterations: MIN_ARGON2_ITERATIONS,
            parallelism: 1,
        }
    }

    #[test]
    fn pbkdf2_is_deterministic() {
        let salt = Salt::from_bytes([1u8; SALT_LEN]);
        let params = KdfParams::default();
        let a = derive_key_blocking(b"CorrectHorse1!", &salt, &params).unwrap();
        let b = derive_key_blocking(b"CorrectHorse1!", &salt, &params).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn pbkdf2_matches_known_vector() {
        // Reference output computed with ring directly; catches swapped
        // salt/password arguments.
        let mut expected = [0u8; KEY_LEN];
        pbkdf2::derive(
            pbkdf2::PBKDF2_HMAC_SHA256,
            NonZeroU32::new(MIN_PBKDF2_ITERATIONS).unwrap(),
            &[7u8; SALT_LEN],
            b"password",
            &mut expected,
        );
        let key =
            derive_key_blocking(b"password", &Salt::from_bytes([7u8; SALT_LEN]), &KdfParams::default())
                .unwrap();
        assert_eq!(key, MasterKey::from_bytes(expected));
    }

    #[test]
    fn different_salt_gives_different_key() {
        let params = KdfParams::default();
        let a = derive_key_blocking(b"same", &Salt::from_bytes([1u8; SALT_LEN]), &params).unwrap();
        let b = derive_key_blocking(b"same", &Salt::from_bytes([2u8; SALT_LEN]), &params).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn different_password_gives_different_key() {
        let salt = Salt::from_bytes([3u8; SALT_LEN]);
        let params = KdfParams::default();
        let a = derive_key_blocking(b"CorrectHorse1!", &salt, &params).unwrap();
        let b = derive_key_blocking(b"WrongPass1!", &salt, &params).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn argon2id_is_deterministic_and_distinct_from_pbkdf2() {
        let salt = Salt::from_bytes([4u8; SALT_LEN]);
        let a = derive_key_blocking(b"pass", &salt, &fast_argon()).unwrap();
        let b = derive_key_blocking(b"pass", &salt, &fast_argon()).unwrap();
        let p = derive_key_blocking(b"pass", &salt, &KdfParams::default()).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, p);
    }

    #[test]
    fn empty_password_is_a_derivation_error() {
        let salt = Salt::from_bytes([0u8; SALT_LEN]);
        let err = derive_key_blocking(b"", &salt, &KdfParams::default()).unwrap_err();
        assert!(matches!(err, VaultError::Derivation(_)));
    }

    #[test]
    fn weak_parameters_are_rejected() {
        let weak = [
            KdfParams::Pbkdf2Sha256 { iterations: 1_000 },
            KdfParams::Argon2id {
                memory_cost: 1024,
                iterations: 3,
                parallelism: 1,
            },
            KdfParams::Argon2id {
                memory_cost: MIN_ARGON2_MEMORY_COST,
                iterations: 1,
                parallelism: 1,
            },
            KdfParams::Argon2id {
                memory_cost: MIN_ARGON2_MEMORY_COST,
                iterations: 2,
                parallelism: 0,
            },
        ];
        for params in weak {
            assert!(
                matches!(params.validate(), Err(VaultError::Derivation(_))),
                "{params:?} should be rejected"
            );
        }
        assert!(KdfParams::default().validate().is_ok());
        assert!(fast_argon().validate().is_ok());
    }

    #[test]
    fn salt_hex_roundtrip_and_errors() {
        let salt = Salt::generate().unwrap();
        let hex = salt.to_hex();
        assert_eq!(hex.len(), 32);
        assert_eq!(hex, hex.to_lowercase());
        assert_eq!(Salt::from_hex(&hex).unwrap(), salt);

        assert!(matches!(Salt::from_hex("zz"), Err(VaultError::Derivation(_))));
        assert!(matches!(Salt::from_hex("abcd"), Err(VaultError::Derivation(_))));
    }

    #[test]
    fn generated_salts_differ() {
        assert_ne!(Salt::generate().unwrap(), Salt::generate().unwrap());
    }

    #[test]
    fn settings_roundtrip_preserves_params() {
        let salt = Salt::from_bytes([9u8; SALT_LEN]);
        for params in [KdfParams::default(), fast_argon()] {
            let settings = params.to_settings(&salt);
            assert_eq!(settings.salt, salt.to_hex());
            assert_eq!(KdfParams::from_settings(&settings).unwrap(), params);
        }
    }

    #[test]
    fn pbkdf2_settings_stay_untagged() {
        let settings = KdfParams::default().to_settings(&Salt::from_bytes([0u8; SALT_LEN]));
        assert!(settings.kdf.is_none());
        assert_eq!(settings.derivation_iterations, 100_000);
    }

    #[test]
    fn argon2_settings_without_memory_cost_are_rejected() {
        let mut settings = fast_argon().to_settings(&Salt::from_bytes([0u8; SALT_LEN]));
        settings.kdf_memory_cost = None;
        assert!(matches!(
            KdfParams::from_settings(&settings),
            Err(VaultError::Derivation(_))
        ));
    }

    #[test]
    fn from_config_picks_configured_kdf() {
        let mut config = VaultConfig::default();
        assert_eq!(
            KdfParams::from_config(&config),
            KdfParams::Pbkdf2Sha256 { iterations: 100_000 }
        );
        config.kdf = KdfAlgorithm::Argon2id;
        assert_eq!(KdfParams::from_config(&config).algorithm(), KdfAlgorithm::Argon2id);
    }

    #[tokio::test]
    async fn async_derive_generates_salt_when_absent() {
        let password = SecretString::from("CorrectHorse1!");
        let (key, salt) = derive_key(&password, None, KdfParams::default()).await.unwrap();
        let (again, same_salt) = derive_key(&password, Some(salt), KdfParams::default())
            .await
            .unwrap();
        assert_eq!(salt, same_salt);
        assert_eq!(key, again);
    }

    #[tokio::test]
    async fn async_derive_rejects_empty_password() {
        let password = SecretString::from("");
        let err = derive_key(&password, None, KdfParams::default()).await.unwrap_err();
        assert!(matches!(err, VaultError::Derivation(_)));
    }
}
