// SPDX-FileCopyrightText: 2026 SecureVault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Building and revealing credentials.
//!
//! Only the credential value is encrypted. Labels and notes are stored in
//! plaintext so they can be listed and searched while the vault is locked;
//! do not put secrets in notes.

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use securevault_core::{Credential, CredentialType, VaultError};

use crate::session::VaultSession;

/// User input for a new or edited credential.
#[derive(Debug)]
pub struct CredentialDraft {
    pub credential_type: CredentialType,
    /// Falls back to the type's default label when blank.
    pub label: Option<String>,
    pub value: SecretString,
    pub notes: Option<String>,
}

impl CredentialDraft {
    pub fn new(credential_type: CredentialType, value: impl Into<String>) -> Self {
        Self {
            credential_type,
            label: None,
            value: SecretString::from(value.into()),
            notes: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    fn resolved_label(&self) -> String {
        self.label
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| self.credential_type.default_label())
            .to_string()
    }

    fn resolved_notes(&self) -> Option<String> {
        self.notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
    }
}

/// Encrypt a draft into a [`Credential`].
///
/// The value is trimmed and must not be empty. When `existing` is given the
/// id and creation time are kept; otherwise a new UUID is assigned.
pub async fn seal_credential(
    session: &VaultSession,
    draft: &CredentialDraft,
    existing: Option<&Credential>,
) -> Result<Credential, VaultError> {
    let value = draft.value.expose_secret().trim();
    if value.is_empty() {
        return Err(VaultError::Validation(
            "credential value is required".to_string(),
        ));
    }

    let encrypted_value = session.encrypt(value).await?;
    let now = Utc::now();
    let (id, created_at) = match existing {
        Some(c) => (c.id.clone(), c.created_at),
        None => (uuid::Uuid::new_v4().to_string(), now),
    };

    Ok(Credential {
        id,
        credential_type: draft.credential_type,
        label: draft.resolved_label(),
        encrypted_value,
        created_at,
        updated_at: now,
        notes: draft.resolved_notes(),
    })
}

/// Decrypt a credential's value.
pub async fn reveal_credential(
    session: &VaultSession,
    credential: &Credential,
) -> Result<SecretString, VaultError> {
    session.decrypt(&credential.encrypted_value).await
}

/// Mask a revealed value for display: every character becomes a bullet.
pub fn mask_secret(secret: &SecretString) -> String {
    "\u{2022}".repeat(secret.expose_secret().chars().count())
}
