// SPDX-FileCopyrightText: 2026 SecureVault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structural validation of stored encrypted records.
//!
//! Records loaded from storage are untrusted. They are checked here and turned
//! into raw bytes before any cipher call, so a truncated or hand-edited record
//! surfaces as [`VaultError::MalformedRecord`] rather than a cipher failure.

use securevault_core::{CipherAlgorithm, EncryptedData, VaultError};

/// AES-GCM nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// AES-GCM authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// A record that passed validation, decoded to bytes.
#[derive(Debug)]
pub struct SealedRecord {
    /// Ciphertext with the tag appended.
    pub ciphertext: Vec<u8>,
    pub nonce: [u8; NONCE_LEN],
    pub algorithm: CipherAlgorithm,
}

/// Check an [`EncryptedData`] and decode it.
///
/// Rejects empty fields, non-hex content, a nonce that is not exactly
/// [`NONCE_LEN`] bytes, a ciphertext shorter than the tag and an unsupported
/// algorithm tag. A record with no algorithm tag is read as AES-256-GCM.
pub fn validate(data: &EncryptedData) -> Result<SealedRecord, VaultError> {
    if data.ciphertext.is_empty() {
        return Err(malformed("ciphertext is empty"));
    }
    if data.nonce.is_empty() {
        return Err(malformed("nonce is empty"));
    }

    let nonce = hex::decode(&data.nonce).map_err(|e| malformed(format!("nonce is not hex: {e}")))?;
    let nonce: [u8; NONCE_LEN] = nonce.try_into().map_err(|v: Vec<u8>| {
        malformed(format!("nonce must be {NONCE_LEN} bytes, got {}", v.len()))
    })?;

    let ciphertext = hex::decode(&data.ciphertext)
        .map_err(|e| malformed(format!("ciphertext is not hex: {e}")))?;
    if ciphertext.len() < TAG_LEN {
        return Err(malformed(format!(
            "ciphertext must be at least {TAG_LEN} bytes, got {}",
            ciphertext.len()
        )));
    }

    Ok(SealedRecord {
        ciphertext,
        nonce,
        algorithm: data.algorithm()?,
    })
}

/// Encode sealed bytes as a storable record. New records always carry the
/// algorithm tag.
pub fn encode(ciphertext: &[u8], nonce: &[u8; NONCE_LEN]) -> EncryptedData {
    EncryptedData {
        ciphertext: hex::encode(ciphertext),
        nonce: hex::encode(nonce),
        algorithm: Some(CipherAlgorithm::Aes256Gcm.to_string()),
    }
}

fn malformed(reason: impl Into<String>) -> VaultError {
    VaultError::MalformedRecord(reason.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ciphertext: &str, nonce: &str) -> EncryptedData {
        EncryptedData {
            ciphertext: ciphertext.to_string(),
            nonce: nonce.to_string(),
            algorithm: None,
        }
    }

    fn assert_malformed(data: &EncryptedData) {
        assert!(
            matches!(validate(data), Err(VaultError::MalformedRecord(_))),
            "expected MalformedRecord for {data:?}"
        );
    }

    #[test]
    fn empty_fields_are_malformed() {
        assert_malformed(&record("", &"00".repeat(NONCE_LEN)));
        assert_malformed(&record(&"00".repeat(TAG_LEN), ""));
        assert_malformed(&record("", ""));
    }

    #[test]
    fn non_hex_is_malformed() {
        assert_malformed(&record(&"zz".repeat(TAG_LEN), &"00".repeat(NONCE_LEN)));
        assert_malformed(&record(&"00".repeat(TAG_LEN), &"xy".repeat(NONCE_LEN)));
        // Odd length.
        assert_malformed(&record(&"0".repeat(33), &"00".repeat(NONCE_LEN)));
    }

    #[test]
    fn wrong_nonce_length_is_malformed() {
        assert_malformed(&record(&"00".repeat(TAG_LEN), &"00".repeat(NONCE_LEN - 1)));
        assert_malformed(&record(&"00".repeat(TAG_LEN), &"00".repeat(NONCE_LEN + 4)));
    }

    #[test]
    fn ciphertext_shorter_than_tag_is_malformed() {
        assert_malformed(&record(&"00".repeat(TAG_LEN - 1), &"00".repeat(NONCE_LEN)));
    }

    #[test]
    fn tag_only_ciphertext_is_accepted() {
        let sealed = validate(&record(&"ab".repeat(TAG_LEN), &"01".repeat(NONCE_LEN))).unwrap();
        assert_eq!(sealed.ciphertext.len(), TAG_LEN);
        assert_eq!(sealed.nonce, [0x01; NONCE_LEN]);
    }

    #[test]
    fn untagged_record_reads_as_aes_gcm() {
        let sealed = validate(&record(&"00".repeat(20), &"00".repeat(NONCE_LEN))).unwrap();
        assert_eq!(sealed.algorithm, CipherAlgorithm::Aes256Gcm);
    }

    #[test]
    fn unsupported_algorithm_tag_is_malformed() {
        let mut data = record(&"00".repeat(20), &"00".repeat(NONCE_LEN));
        data.algorithm = Some("chacha20-poly1305".to_string());
        assert_malformed(&data);
    }

    #[test]
    fn uppercase_hex_is_accepted() {
        assert!(validate(&record(&"AB".repeat(TAG_LEN), &"CD".repeat(NONCE_LEN))).is_ok());
    }

    #[test]
    fn encode_writes_lowercase_hex_and_tag() {
        let data = encode(&[0xAB; TAG_LEN], &[0xCD; NONCE_LEN]);
        assert_eq!(data.ciphertext, "ab".repeat(TAG_LEN));
        assert_eq!(data.nonce, "cd".repeat(NONCE_LEN));
        assert_eq!(data.algorithm.as_deref(), Some("aes-256-gcm"));
    }
}
