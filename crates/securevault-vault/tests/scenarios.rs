// SPDX-FileCopyrightText: 2026 SecureVault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end behavior of the key derivation, cipher and session layers.

use std::sync::Arc;

use proptest::prelude::*;
use secrecy::{ExposeSecret, SecretString};
use securevault_core::{CipherAlgorithm, EncryptedData, VaultError};
use securevault_vault::crypto::{self, KEY_LEN, MasterKey};
use securevault_vault::kdf::{KdfParams, Salt};
use securevault_vault::VaultSession;

fn password(s: &str) -> SecretString {
    SecretString::from(s)
}

#[tokio::test]
async fn correct_password_recovers_value_after_relock() {
    let session = VaultSession::new();
    let salt = session
        .unlock(&password("CorrectHorse1!"), None, KdfParams::default())
        .await
        .unwrap();

    let sealed = session.encrypt("1234").await.unwrap();
    session.lock();
    assert!(!session.is_unlocked());

    session
        .unlock(&password("CorrectHorse1!"), Some(salt), KdfParams::default())
        .await
        .unwrap();
    assert_eq!(session.decrypt(&sealed).await.unwrap().expose_secret(), "1234");
}

#[tokio::test]
async fn wrong_password_is_only_detected_at_decrypt() {
    let session = VaultSession::new();
    let salt = session
        .unlock(&password("CorrectHorse1!"), None, KdfParams::default())
        .await
        .unwrap();
    let sealed = session.encrypt("1234").await.unwrap();
    session.lock();

    session
        .unlock(&password("WrongPass1!"), Some(salt), KdfParams::default())
        .await
        .unwrap();
    assert!(session.is_unlocked());

    let err = session.decrypt(&sealed).await.unwrap_err();
    assert!(matches!(err, VaultError::Authentication));
    assert_eq!(err.to_string(), "incorrect password or corrupted data");
}

#[tokio::test]
async fn edge_case_plaintexts_roundtrip() {
    let session = VaultSession::new();
    session
        .unlock(&password("CorrectHorse1!"), None, KdfParams::default())
        .await
        .unwrap();

    let long = "x".repeat(10_000);
    for plaintext in ["", "\0", "a\0b", "नमस्ते", "🔐 pin: 0000", long.as_str()] {
        let sealed = session.encrypt(plaintext).await.unwrap();
        assert_eq!(session.decrypt(&sealed).await.unwrap().expose_secret(), plaintext);
    }
}

#[tokio::test]
async fn many_encryptions_never_repeat_a_nonce() {
    let session = VaultSession::new();
    session.install(MasterKey::from_bytes([3u8; KEY_LEN]));

    let mut nonces = std::collections::HashSet::new();
    for _ in 0..1_000 {
        let sealed = session.encrypt("same").await.unwrap();
        assert!(nonces.insert(sealed.nonce), "nonce reused");
    }
}

#[tokio::test]
async fn locked_session_rejects_everything() {
    let session = VaultSession::new();
    let record = EncryptedData {
        ciphertext: "00".repeat(16),
        nonce: "00".repeat(12),
        algorithm: None,
    };
    assert!(matches!(
        session.encrypt("x").await,
        Err(VaultError::NoActiveSession)
    ));
    assert!(matches!(
        session.decrypt(&record).await,
        Err(VaultError::NoActiveSession)
    ));
}

#[tokio::test]
async fn malformed_records_never_reach_the_cipher() {
    let session = VaultSession::new();
    session.install(MasterKey::from_bytes([4u8; KEY_LEN]));

    let cases = [
        (String::new(), "00".repeat(12)),
        ("00".repeat(16), String::new()),
        ("not hex at all!!".to_string(), "00".repeat(12)),
        ("00".repeat(16), "00".repeat(8)),
        ("00".repeat(4), "00".repeat(12)),
    ];
    for (ciphertext, nonce) in cases {
        let record = EncryptedData {
            ciphertext,
            nonce,
            algorithm: Some(CipherAlgorithm::Aes256Gcm.to_string()),
        };
        assert!(
            matches!(
                session.decrypt(&record).await,
                Err(VaultError::MalformedRecord(_))
            ),
            "{record:?} should be malformed"
        );
    }
}

#[tokio::test]
async fn legacy_untagged_record_decrypts() {
    let key = MasterKey::from_bytes([6u8; KEY_LEN]);
    let mut sealed = crypto::seal(&key, b"legacy").unwrap();
    sealed.algorithm = None;

    let json = serde_json::json!({ "data": sealed.ciphertext, "iv": sealed.nonce });
    let legacy: EncryptedData = serde_json::from_value(json).unwrap();

    let session = VaultSession::new();
    session.install(key);
    assert_eq!(session.decrypt(&legacy).await.unwrap().expose_secret(), "legacy");
}

#[tokio::test]
async fn same_password_and_salt_derive_same_key() {
    let salt = Salt::from_bytes([8u8; 16]);
    let a = VaultSession::new();
    let b = VaultSession::new();
    a.unlock(&password("CorrectHorse1!"), Some(salt), KdfParams::default())
        .await
        .unwrap();
    b.unlock(&password("CorrectHorse1!"), Some(salt), KdfParams::default())
        .await
        .unwrap();

    let sealed = a.encrypt("shared").await.unwrap();
    assert_eq!(b.decrypt(&sealed).await.unwrap().expose_secret(), "shared");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn lock_during_in_flight_decrypts_is_safe() {
    let session = Arc::new(VaultSession::new());
    session.install(MasterKey::from_bytes([9u8; KEY_LEN]));
    let sealed = session.encrypt("racing").await.unwrap();

    let mut tasks = Vec::new();
    for _ in 0..32 {
        let session = Arc::clone(&session);
        let sealed = sealed.clone();
        tasks.push(tokio::spawn(async move { session.decrypt(&sealed).await }));
    }
    session.lock();

    // Each task either finished with the key it started with, or started
    // after the lock and saw no session. Nothing else is acceptable.
    for task in tasks {
        match task.await.unwrap() {
            Ok(value) => assert_eq!(value.expose_secret(), "racing"),
            Err(VaultError::NoActiveSession) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert!(!session.is_unlocked());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn seal_open_roundtrips_any_string(plaintext in ".*") {
        let key = MasterKey::from_bytes([1u8; KEY_LEN]);
        let sealed = crypto::seal(&key, plaintext.as_bytes()).unwrap();
        let opened = crypto::open(&key, &sealed).unwrap();
        prop_assert_eq!(opened.as_slice(), plaintext.as_bytes());
    }

    #[test]
    fn seal_open_roundtrips_any_bytes(plaintext in proptest::collection::vec(any::<u8>(), 0..512)) {
        let key = MasterKey::from_bytes([2u8; KEY_LEN]);
        let sealed = crypto::seal(&key, &plaintext).unwrap();
        let opened = crypto::open(&key, &sealed).unwrap();
        prop_assert_eq!(opened.as_slice(), plaintext.as_slice());
    }

    #[test]
    fn foreign_key_never_opens(plaintext in ".{0,64}", a in any::<[u8; 32]>(), b in any::<[u8; 32]>()) {
        prop_assume!(a != b);
        let sealed = crypto::seal(&MasterKey::from_bytes(a), plaintext.as_bytes()).unwrap();
        let result = crypto::open(&MasterKey::from_bytes(b), &sealed);
        prop_assert!(matches!(result, Err(VaultError::Authentication)));
    }
}
