// SPDX-FileCopyrightText: 2026 SecureVault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persisted domain types: accounts, credentials, encrypted values and
//! vault settings.
//!
//! Field names serialize in camelCase so records written by earlier
//! releases of the vault keep loading unchanged.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::VaultError;

/// PBKDF2 iteration count used by every vault created before the KDF became
/// configurable. Settings records that omit the field are read with this value.
pub const LEGACY_PBKDF2_ITERATIONS: u32 = 100_000;

/// Bank names offered when creating an account. Free text is also accepted.
pub const KNOWN_BANKS: &[&str] = &[
    "State Bank of India (SBI)",
    "HDFC Bank",
    "ICICI Bank",
    "Axis Bank",
    "Yes Bank",
    "Punjab National Bank (PNB)",
    "Bank of Baroda",
    "Canara Bank",
    "Kotak Mahindra Bank",
    "Union Bank of India",
    "Indian Bank",
    "Bank of India",
    "Central Bank of India",
    "Indian Overseas Bank",
    "UCO Bank",
    "Other",
];

/// Category of a stored banking credential.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CredentialType {
    UpiPin,
    AtmPin,
    NetBanking,
    MobileBanking,
    TransactionPassword,
    DebitCardPin,
    CreditCardPin,
    Other,
}

impl CredentialType {
    /// Label used when the user does not provide one.
    pub fn default_label(self) -> &'static str {
        match self {
            Self::UpiPin => "UPI PIN",
            Self::AtmPin => "ATM PIN",
            Self::NetBanking => "Net Banking Password",
            Self::MobileBanking => "Mobile Banking PIN",
            Self::TransactionPassword => "Transaction Password",
            Self::DebitCardPin => "Debit Card PIN",
            Self::CreditCardPin => "Credit Card PIN",
            Self::Other => "Other",
        }
    }

    /// One-line description shown next to the type.
    pub fn description(self) -> &'static str {
        match self {
            Self::UpiPin => "PIN for UPI transactions",
            Self::AtmPin => "PIN for ATM withdrawals",
            Self::NetBanking => "Internet banking login password",
            Self::MobileBanking => "Mobile app login PIN/password",
            Self::TransactionPassword => "Password for online transactions",
            Self::DebitCardPin => "PIN for debit card transactions",
            Self::CreditCardPin => "PIN for credit card transactions",
            Self::Other => "Other banking credentials",
        }
    }
}

/// Kind of bank account.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AccountType {
    Savings,
    Current,
    Salary,
    Fd,
    Rd,
    CreditCard,
    Other,
}

/// Authenticated cipher that produced an [`EncryptedData`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
pub enum CipherAlgorithm {
    #[serde(rename = "aes-256-gcm")]
    #[strum(serialize = "aes-256-gcm")]
    Aes256Gcm,
}

/// Password-based key derivation function recorded in the vault settings.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
pub enum KdfAlgorithm {
    #[default]
    #[serde(rename = "pbkdf2-sha256")]
    #[strum(serialize = "pbkdf2-sha256")]
    Pbkdf2Sha256,
    #[serde(rename = "argon2id")]
    #[strum(serialize = "argon2id")]
    Argon2id,
}

/// Ciphertext and nonce of one encrypted field, hex-encoded for storage.
///
/// The ciphertext carries the 16-byte GCM tag at its end. Records written
/// before the algorithm tag existed have no `algorithm` field and are read
/// as AES-256-GCM; their legacy `data`/`iv` field names are accepted too.
/// Missing fields deserialize as empty strings and the algorithm tag is kept
/// as raw text, so structural validation, not the parser, reports them. One
/// bad record never makes the enclosing account unreadable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedData {
    #[serde(default, alias = "data")]
    pub ciphertext: String,
    #[serde(default, alias = "iv")]
    pub nonce: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
}

impl EncryptedData {
    /// The cipher this record claims. Untagged legacy records are AES-256-GCM;
    /// an unrecognized tag is a [`VaultError::MalformedRecord`].
    pub fn algorithm(&self) -> Result<CipherAlgorithm, VaultError> {
        match self.algorithm.as_deref() {
            None => Ok(CipherAlgorithm::Aes256Gcm),
            Some(tag) => tag.parse().map_err(|_| {
                VaultError::MalformedRecord(format!("unsupported cipher algorithm `{tag}`"))
            }),
        }
    }
}

/// A single banking credential. Only `encrypted_value` is secret.
///
/// `notes` is stored in plaintext. This mirrors the behavior of existing
/// vaults; whether notes should be encrypted as well is an open question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub id: String,
    #[serde(rename = "type")]
    pub credential_type: CredentialType,
    pub label: String,
    pub encrypted_value: EncryptedData,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A bank account and the credentials it exclusively owns.
///
/// `credentials` keeps insertion order, which is also display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub bank_name: String,
    /// Last digits or a masked form; never the full number.
    pub account_number: String,
    pub account_type: AccountType,
    pub account_holder_name: String,
    #[serde(default)]
    pub credentials: Vec<Credential>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Account {
    /// Look up a credential by id.
    pub fn credential(&self, id: &str) -> Option<&Credential> {
        self.credentials.iter().find(|c| c.id == id)
    }

    /// Case-insensitive match on bank name, holder name and credential
    /// labels; the account number is matched verbatim.
    pub fn matches_query(&self, query: &str) -> bool {
        let lower = query.to_lowercase();
        self.bank_name.to_lowercase().contains(&lower)
            || self.account_holder_name.to_lowercase().contains(&lower)
            || self.account_number.contains(query)
            || self
                .credentials
                .iter()
                .any(|c| c.label.to_lowercase().contains(&lower))
    }
}

/// Vault-wide settings, persisted in plaintext in a single slot.
///
/// The salt is not secret. It is fixed for the lifetime of the vault and
/// must be reused on every unlock for the derived key to match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultSettings {
    /// 16 bytes, lowercase hex (32 characters).
    pub salt: String,
    #[serde(default = "default_derivation_iterations")]
    pub derivation_iterations: u32,
    #[serde(default, alias = "isFirstTime")]
    pub is_first_run: bool,
    /// Absent on legacy vaults, which always used PBKDF2-SHA256.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kdf: Option<KdfAlgorithm>,
    /// Argon2id memory cost in KiB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kdf_memory_cost: Option<u32>,
    /// Argon2id lanes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kdf_parallelism: Option<u32>,
}

fn default_derivation_iterations() -> u32 {
    LEGACY_PBKDF2_ITERATIONS
}

impl VaultSettings {
    /// The KDF this vault was created with.
    pub fn kdf(&self) -> KdfAlgorithm {
        self.kdf.unwrap_or_default()
    }
}

/// Aggregate counts over all accounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VaultStats {
    pub total_accounts: usize,
    pub total_credentials: usize,
    pub bank_distribution: BTreeMap<String, usize>,
    pub credential_type_distribution: BTreeMap<CredentialType, usize>,
}

impl VaultStats {
    pub fn from_accounts(accounts: &[Account]) -> Self {
        let mut stats = Self {
            total_accounts: accounts.len(),
            ..Self::default()
        };
        for account in accounts {
            *stats
                .bank_distribution
                .entry(account.bank_name.clone())
                .or_default() += 1;
            for credential in &account.credentials {
                *stats
                    .credential_type_distribution
                    .entry(credential.credential_type)
                    .or_default() += 1;
                stats.total_credentials += 1;
            }
        }
        stats
    }
}
