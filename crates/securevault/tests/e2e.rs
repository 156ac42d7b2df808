// SPDX-FileCopyrightText: 2026 SecureVault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end flows through the command layer against harness vaults.

use secrecy::SecretString;
use securevault::commands;
use securevault_core::{CredentialType, VaultError};
use securevault_test_utils::{Backend, TestHarness, TEST_PASSWORD};
use securevault_vault::{AccountDraft, CredentialDraft};

fn output(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap()
}

#[tokio::test]
async fn add_reveal_relock_on_sqlite() {
    let harness = TestHarness::builder()
        .with_backend(Backend::Sqlite)
        .with_setup()
        .build()
        .await
        .unwrap();
    let vault = &harness.vault;
    let mut out = Vec::new();

    let account_id = commands::add_account(
        vault,
        AccountDraft::new("State Bank of India (SBI)", "30012345678", "Anita Rao"),
        &mut out,
    )
    .await
    .unwrap();
    let credential_id = commands::add_credential(
        vault,
        &account_id,
        &CredentialDraft::new(CredentialType::UpiPin, "1234"),
        &mut out,
    )
    .await
    .unwrap();
    assert!(output(out).contains("Added UPI PIN"));

    vault.lock();
    let mut out = Vec::new();
    let err = commands::reveal_credential(vault, &account_id, &credential_id, false, &mut out)
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::NoActiveSession));

    vault.unlock(&SecretString::from(TEST_PASSWORD)).await.unwrap();
    commands::reveal_credential(vault, &account_id, &credential_id, false, &mut out)
        .await
        .unwrap();
    commands::reveal_credential(vault, &account_id, &credential_id, true, &mut out)
        .await
        .unwrap();
    assert_eq!(output(out), "1234\n••••\n");
}

#[tokio::test]
async fn wrong_password_cannot_reveal() {
    let harness = TestHarness::builder().with_setup().build().await.unwrap();
    let vault = &harness.vault;
    let mut out = Vec::new();

    let account_id = commands::add_account(vault, AccountDraft::new("Yes Bank", "77", "K"), &mut out)
        .await
        .unwrap();
    let credential_id = commands::add_credential(
        vault,
        &account_id,
        &CredentialDraft::new(CredentialType::NetBanking, "s3cret!"),
        &mut out,
    )
    .await
    .unwrap();

    vault.lock();
    vault.unlock(&SecretString::from("WrongPass1!")).await.unwrap();
    let err = commands::reveal_credential(vault, &account_id, &credential_id, false, &mut out)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "incorrect password or corrupted data");
    assert!(matches!(vault.verify_key().await, Err(VaultError::Authentication)));
}

#[tokio::test]
async fn list_search_and_stats_work_while_locked() {
    let harness = TestHarness::builder().with_setup().build().await.unwrap();
    let vault = &harness.vault;
    let mut out = Vec::new();

    let hdfc = commands::add_account(
        vault,
        AccountDraft::new("HDFC Bank", "50100099998888", "Priya Sharma"),
        &mut out,
    )
    .await
    .unwrap();
    commands::add_account(vault, AccountDraft::new("Axis Bank", "9170", "Rahul"), &mut out)
        .await
        .unwrap();
    commands::add_credential(
        vault,
        &hdfc,
        &CredentialDraft::new(CredentialType::DebitCardPin, "4321").with_label("Platinum debit"),
        &mut out,
    )
    .await
    .unwrap();
    vault.lock();

    let mut out = Vec::new();
    commands::search(vault, "platinum", false, &mut out, false)
        .await
        .unwrap();
    let text = output(out);
    assert!(text.contains("HDFC Bank"));
    assert!(text.contains("••••8888"));
    assert!(!text.contains("Axis Bank"));

    let mut out = Vec::new();
    commands::list_accounts(vault, Some("Axis Bank"), false, &mut out, false)
        .await
        .unwrap();
    assert!(output(out).contains("Rahul"));

    let mut out = Vec::new();
    commands::stats(vault, true, &mut out, false).await.unwrap();
    let stats: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(stats["total_accounts"], 2);
    assert_eq!(stats["total_credentials"], 1);
    assert_eq!(stats["credential_type_distribution"]["debit_card_pin"], 1);
}

#[tokio::test]
async fn json_listing_never_contains_plaintext_values() {
    let harness = TestHarness::builder().with_setup().build().await.unwrap();
    let vault = &harness.vault;
    let mut out = Vec::new();
    let id = commands::add_account(vault, AccountDraft::new("Indian Bank", "1", "x"), &mut out)
        .await
        .unwrap();
    commands::add_credential(
        vault,
        &id,
        &CredentialDraft::new(CredentialType::AtmPin, "98765"),
        &mut out,
    )
    .await
    .unwrap();

    let mut out = Vec::new();
    commands::list_accounts(vault, None, true, &mut out, false)
        .await
        .unwrap();
    let text = output(out);
    assert!(text.contains("encryptedValue"));
    assert!(!text.contains("98765"));
}

#[tokio::test]
async fn show_edit_and_remove() {
    let harness = TestHarness::builder().with_setup().build().await.unwrap();
    let vault = &harness.vault;
    let mut out = Vec::new();
    let id = commands::add_account(vault, AccountDraft::new("UCO Bank", "42", "Old Name"), &mut out)
        .await
        .unwrap();
    let credential_id = commands::add_credential(
        vault,
        &id,
        &CredentialDraft::new(CredentialType::Other, "x").with_notes("locker key"),
        &mut out,
    )
    .await
    .unwrap();

    commands::edit_account(vault, &id, AccountDraft::new("UCO Bank", "42", "New Name"), &mut out)
        .await
        .unwrap();
    commands::edit_credential(
        vault,
        &id,
        &credential_id,
        &CredentialDraft::new(CredentialType::Other, "y").with_label("Locker"),
        &mut out,
    )
    .await
    .unwrap();

    let mut out = Vec::new();
    commands::show_account(vault, &id, &mut out, false).await.unwrap();
    let text = output(out);
    assert!(text.contains("New Name"));
    assert!(text.contains("Locker (other)"));

    let mut out = Vec::new();
    commands::remove_credential(vault, &id, &credential_id, &mut out)
        .await
        .unwrap();
    commands::remove_account(vault, &id, &mut out).await.unwrap();
    assert!(matches!(
        commands::show_account(vault, &id, &mut out, false).await,
        Err(VaultError::NotFound { .. })
    ));
}

#[tokio::test]
async fn reset_requires_confirmation() {
    let harness = TestHarness::builder().with_setup().build().await.unwrap();
    let vault = &harness.vault;
    let mut out = Vec::new();
    commands::add_account(vault, AccountDraft::new("Bank of India", "5", "z"), &mut out)
        .await
        .unwrap();

    assert!(matches!(
        commands::reset(vault, false, &mut out).await,
        Err(VaultError::Validation(_))
    ));
    assert!(vault.exists().await.unwrap());

    commands::reset(vault, true, &mut out).await.unwrap();
    assert!(!vault.exists().await.unwrap());
    assert!(!vault.is_unlocked());
    assert!(vault.list_accounts().await.unwrap().is_empty());
}
