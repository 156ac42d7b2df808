// SPDX-FileCopyrightText: 2026 SecureVault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory repository for tests that do not need SQLite.

use std::collections::HashMap;

use async_trait::async_trait;
use securevault_core::{Account, SettingsStore, VaultError, VaultRepository, VaultSettings};
use tokio::sync::RwLock;

/// Account and settings storage backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    accounts: RwLock<HashMap<String, Account>>,
    settings: RwLock<Option<VaultSettings>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

#[async_trait]
impl VaultRepository for MemoryRepository {
    async fn put(&self, key: &str, account: &Account) -> Result<(), VaultError> {
        self.accounts
            .write()
            .await
            .insert(key.to_string(), account.clone());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Account>, VaultError> {
        Ok(self.accounts.read().await.get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<(), VaultError> {
        self.accounts.write().await.remove(key);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Account>, VaultError> {
        let mut accounts: Vec<Account> = self.accounts.read().await.values().cloned().collect();
        accounts.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then_with(|| a.id.cmp(&b.id)));
        Ok(accounts)
    }

    async fn clear(&self) -> Result<(), VaultError> {
        self.accounts.write().await.clear();
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for MemoryRepository {
    async fn load_settings(&self) -> Result<Option<VaultSettings>, VaultError> {
        Ok(self.settings.read().await.clone())
    }

    async fn save_settings(&self, settings: &VaultSettings) -> Result<(), VaultError> {
        *self.settings.write().await = Some(settings.clone());
        Ok(())
    }

    async fn clear_settings(&self) -> Result<(), VaultError> {
        *self.settings.write().await = None;
        Ok(())
    }
}
