// SPDX-FileCopyrightText: 2026 SecureVault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AES-256-GCM seal/open of individual field values.
//!
//! Every call to [`seal`] generates a fresh random 96-bit nonce via the system
//! CSPRNG. Nonce reuse under one key would be catastrophic for GCM.
//! [`open`] validates the record shape before the AEAD primitive sees it and
//! reports every verification failure as the same [`VaultError::Authentication`].

use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM};
use ring::rand::{SecureRandom, SystemRandom};
use securevault_core::{CipherAlgorithm, EncryptedData, VaultError};
use zeroize::Zeroizing;

use crate::record::{self, NONCE_LEN};

/// Length of the symmetric key in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// The active symmetric key.
///
/// Lives only in memory: it is not `Clone`, not serializable, and its
/// `Debug` output is redacted. The bytes are zeroed when the last owner
/// drops it.
pub struct MasterKey {
    bytes: Zeroizing<[u8; KEY_LEN]>,
    algorithm: CipherAlgorithm,
}

impl MasterKey {
    /// Wrap raw key material for AES-256-GCM.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self::from_zeroizing(Zeroizing::new(bytes))
    }

    pub(crate) fn from_zeroizing(bytes: Zeroizing<[u8; KEY_LEN]>) -> Self {
        Self {
            bytes,
            algorithm: CipherAlgorithm::Aes256Gcm,
        }
    }

    /// The cipher this key is meant for.
    pub fn algorithm(&self) -> CipherAlgorithm {
        self.algorithm
    }

    fn aead_key(&self) -> Result<LessSafeKey, VaultError> {
        let unbound = UnboundKey::new(&AES_256_GCM, self.bytes.as_ref())
            .map_err(|_| VaultError::Internal("failed to create AES-256-GCM key".to_string()))?;
        Ok(LessSafeKey::new(unbound))
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasterKey")
            .field("algorithm", &self.algorithm)
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
impl PartialEq for MasterKey {
    fn eq(&self, other: &Self) -> bool {
        *self.bytes == *other.bytes
    }
}

/// Encrypt `plaintext` under `key` with a fresh random nonce.
///
/// The returned record carries the hex-encoded ciphertext (tag appended),
/// the nonce, and the algorithm tag.
pub fn seal(key: &MasterKey, plaintext: &[u8]) -> Result<EncryptedData, VaultError> {
    let aead = key.aead_key()?;

    let rng = SystemRandom::new();
    let mut nonce_bytes = [0u8; NONCE_LEN];
    rng.fill(&mut nonce_bytes)
        .map_err(|_| VaultError::Internal("failed to generate random nonce".to_string()))?;
    let nonce = Nonce::assume_unique_for_key(nonce_bytes);

    // Seal in place: the buffer is extended with the authentication tag.
    let mut in_out = Zeroizing::new(plaintext.to_vec());
    aead.seal_in_place_append_tag(nonce, Aad::empty(), &mut *in_out)
        .map_err(|_| VaultError::Internal("AES-256-GCM encryption failed".to_string()))?;

    Ok(record::encode(&in_out, &nonce_bytes))
}

/// Decrypt and verify `data` under `key`.
///
/// Malformed records fail with [`VaultError::MalformedRecord`] before any
/// cipher work. A wrong key, a flipped bit, or a swapped nonce all fail
/// with [`VaultError::Authentication`].
pub fn open(key: &MasterKey, data: &EncryptedData) -> Result<Zeroizing<Vec<u8>>, VaultError> {
    let sealed = record::validate(data)?;
    if sealed.algorithm != key.algorithm() {
        return Err(VaultError::Authentication);
    }

    let aead = key.aead_key()?;
    let nonce = Nonce::assume_unique_for_key(sealed.nonce);

    let mut in_out = Zeroizing::new(sealed.ciphertext);
    let plaintext_len = aead
        .open_in_place(nonce, Aad::empty(), &mut *in_out)
        .map_err(|_| VaultError::Authentication)?
        .len();
    in_out.truncate(plaintext_len);

    Ok(in_out)
}
