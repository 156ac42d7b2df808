// SPDX-FileCopyrightText: 2026 SecureVault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for SecureVault.
//!
//! This crate provides the error taxonomy, the persisted domain types
//! (accounts, credentials, encrypted values, vault settings), and the
//! repository traits the rest of the workspace is written against.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::VaultError;
pub use types::{
    Account, AccountType, CipherAlgorithm, Credential, CredentialType, EncryptedData,
    KdfAlgorithm, VaultSettings, VaultStats,
};

pub use traits::{SettingsStore, StorageAdapter, VaultRepository};
