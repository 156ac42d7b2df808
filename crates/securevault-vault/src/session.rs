// SPDX-FileCopyrightText: 2026 SecureVault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The session key slot.
//!
//! A [`VaultSession`] is either locked (empty slot) or unlocked (holding one
//! [`MasterKey`]). Every encrypt/decrypt goes through it; no other code keeps
//! a copy of the key.
//!
//! Cipher operations take a snapshot of the key when they start. A `lock()`
//! issued while an operation is in flight does not cancel it: the operation
//! finishes with the key it started with, and the key memory is zeroed once
//! that last reference drops. Operations started after `lock()` fail with
//! [`VaultError::NoActiveSession`].

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use secrecy::SecretString;
use securevault_core::{EncryptedData, VaultError};
use tracing::debug;
use zeroize::Zeroizing;

use crate::crypto::{self, MasterKey};
use crate::kdf::{self, KdfParams, Salt};

/// Single-slot holder for the active key.
#[derive(Default)]
pub struct VaultSession {
    slot: ArcSwapOption<MasterKey>,
}

impl std::fmt::Debug for VaultSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultSession")
            .field("unlocked", &self.is_unlocked())
            .finish()
    }
}

impl VaultSession {
    /// A locked session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `key` in the slot, replacing (and releasing) any previous key.
    pub fn install(&self, key: MasterKey) {
        self.slot.store(Some(Arc::new(key)));
    }

    /// Derive a key from `password` and install it.
    ///
    /// Returns the salt that was used: the given one, or a fresh one when
    /// `salt` is `None`. On failure the session state is left unchanged.
    /// No password check happens here; a wrong password surfaces as
    /// [`VaultError::Authentication`] on the first decrypt.
    pub async fn unlock(
        &self,
        password: &SecretString,
        salt: Option<Salt>,
        params: KdfParams,
    ) -> Result<Salt, VaultError> {
        let (key, salt) = kdf::derive_key(password, salt, params).await?;
        self.install(key);
        debug!("session unlocked");
        Ok(salt)
    }

    /// Clear the slot. Idempotent.
    pub fn lock(&self) {
        if self.slot.swap(None).is_some() {
            debug!("session locked");
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.slot.load().is_some()
    }

    fn current_key(&self) -> Result<Arc<MasterKey>, VaultError> {
        self.slot.load_full().ok_or(VaultError::NoActiveSession)
    }

    /// Encrypt `plaintext` under the active key.
    pub async fn encrypt(&self, plaintext: &str) -> Result<EncryptedData, VaultError> {
        let key = self.current_key()?;
        let plaintext = Zeroizing::new(plaintext.as_bytes().to_vec());
        tokio::task::spawn_blocking(move || crypto::seal(&key, &plaintext))
            .await
            .map_err(|e| VaultError::Internal(format!("encryption task failed: {e}")))?
    }

    /// Decrypt `data` under the active key.
    ///
    /// Plaintext that is not valid UTF-8 after successful authentication is
    /// reported as [`VaultError::MalformedRecord`].
    pub async fn decrypt(&self, data: &EncryptedData) -> Result<SecretString, VaultError> {
        let key = self.current_key()?;
        let data = data.clone();
        let bytes = tokio::task::spawn_blocking(move || crypto::open(&key, &data))
            .await
            .map_err(|e| VaultError::Internal(format!("decryption task failed: {e}")))??;

        let text = std::str::from_utf8(&bytes).map_err(|_| {
            VaultError::MalformedRecord("decrypted value is not valid UTF-8".to_string())
        })?;
        Ok(SecretString::from(text))
    }
}
