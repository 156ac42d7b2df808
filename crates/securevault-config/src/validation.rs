// SPDX-FileCopyrightText: 2026 SecureVault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks the constraints serde attributes cannot express: non-empty paths,
//! known log levels, and the KDF work-factor floors.

use crate::diagnostic::ConfigError;
use crate::model::SecureVaultConfig;

/// Lowest PBKDF2 iteration count accepted for new vaults.
pub const MIN_PBKDF2_ITERATIONS: u32 = 100_000;

/// Lowest Argon2id memory cost (KiB) accepted for new vaults.
pub const MIN_ARGON2_MEMORY_COST: u32 = 32768;

/// Lowest Argon2id iteration count accepted for new vaults.
pub const MIN_ARGON2_ITERATIONS: u32 = 2;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &SecureVaultConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    let level = config.log.level.trim().to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.level `{}` is not one of {}",
                config.log.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    // The floors apply regardless of the selected algorithm so that switching
    // `vault.kdf` later cannot silently pick up a weak leftover value.
    if config.vault.pbkdf2_iterations < MIN_PBKDF2_ITERATIONS {
        errors.push(ConfigError::Validation {
            message: format!(
                "vault.pbkdf2_iterations must be at least {MIN_PBKDF2_ITERATIONS}, got {}",
                config.vault.pbkdf2_iterations
            ),
        });
    }

    if config.vault.argon2_memory_cost < MIN_ARGON2_MEMORY_COST {
        errors.push(ConfigError::Validation {
            message: format!(
                "vault.argon2_memory_cost must be at least {MIN_ARGON2_MEMORY_COST} (32 MiB), got {}",
                config.vault.argon2_memory_cost
            ),
        });
    }

    if config.vault.argon2_iterations < MIN_ARGON2_ITERATIONS {
        errors.push(ConfigError::Validation {
            message: format!(
                "vault.argon2_iterations must be at least {MIN_ARGON2_ITERATIONS}, got {}",
                config.vault.argon2_iterations
            ),
        });
    }

    if config.vault.argon2_parallelism < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "vault.argon2_parallelism must be at least 1, got {}",
                config.vault.argon2_parallelism
            ),
        });
    }

    if errors.is_empty() {
        tracing::debug!(kdf = %config.vault.kdf, "configuration validated");
        Ok(())
    } else {
        Err(errors)
    }
}
