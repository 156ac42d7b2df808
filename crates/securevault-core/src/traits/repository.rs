// SPDX-FileCopyrightText: 2026 SecureVault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Account and settings repositories.

use async_trait::async_trait;

use crate::error::VaultError;
use crate::types::{Account, VaultSettings};

/// Durable map from account id to the account aggregate.
///
/// No transactions across accounts are required. Each account, including
/// its credentials, is written and read as one unit.
#[async_trait]
pub trait VaultRepository: Send + Sync {
    /// Insert or replace the account stored under `key`.
    async fn put(&self, key: &str, account: &Account) -> Result<(), VaultError>;

    /// Fetch the account stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Account>, VaultError>;

    /// Remove the account stored under `key`. Removing a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), VaultError>;

    /// All stored accounts, most recently updated first.
    async fn list(&self) -> Result<Vec<Account>, VaultError>;

    /// Remove every account.
    async fn clear(&self) -> Result<(), VaultError>;
}

/// Single-slot store for the plaintext vault settings.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn load_settings(&self) -> Result<Option<VaultSettings>, VaultError>;

    async fn save_settings(&self, settings: &VaultSettings) -> Result<(), VaultError>;

    async fn clear_settings(&self) -> Result<(), VaultError>;
}
