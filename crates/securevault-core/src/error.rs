// SPDX-FileCopyrightText: 2026 SecureVault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for SecureVault.

use thiserror::Error;

/// The primary error type used across the vault core, storage and CLI.
///
/// The first four variants form the security taxonomy. None of them is
/// recoverable at the point of origin: the core never retries, never falls
/// back to a weaker algorithm and never attempts partial decryption.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Key derivation input was invalid or the primitive is unavailable.
    #[error("could not set up vault: {0}")]
    Derivation(String),

    /// A cipher operation was attempted while the session is locked.
    #[error("vault is locked -- no active session")]
    NoActiveSession,

    /// AEAD tag verification failed.
    ///
    /// Deliberately carries no detail: a wrong password and tampered
    /// ciphertext must be indistinguishable to the caller.
    #[error("incorrect password or corrupted data")]
    Authentication,

    /// A stored record failed structural validation before reaching the cipher.
    #[error("malformed encrypted record: {0}")]
    MalformedRecord(String),

    /// Configuration errors (invalid values, unreadable files).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A referenced account or credential does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// User-supplied input was rejected (empty required field, short password).
    #[error("invalid input: {0}")]
    Validation(String),

    /// Setup was requested for a vault that already has settings.
    #[error("vault already initialized")]
    AlreadyInitialized,

    /// Unlock was requested but no vault has been set up.
    #[error("no vault found -- run setup first")]
    Uninitialized,

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl VaultError {
    /// Convenience constructor for a missing account.
    pub fn account_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "account",
            id: id.into(),
        }
    }

    /// Convenience constructor for a missing credential.
    pub fn credential_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "credential",
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_error_message_is_generic() {
        let msg = VaultError::Authentication.to_string();
        assert_eq!(msg, "incorrect password or corrupted data");
    }

    #[test]
    fn derivation_error_is_surfaced_as_setup_failure() {
        let msg = VaultError::Derivation("empty password".into()).to_string();
        assert!(msg.starts_with("could not set up vault"));
    }

    #[test]
    fn not_found_names_the_kind() {
        assert_eq!(
            VaultError::account_not_found("abc").to_string(),
            "account not found: abc"
        );
        assert_eq!(
            VaultError::credential_not_found("xyz").to_string(),
            "credential not found: xyz"
        );
    }
}
