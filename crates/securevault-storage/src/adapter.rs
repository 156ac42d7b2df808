// SPDX-FileCopyrightText: 2026 SecureVault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the storage traits.

use async_trait::async_trait;
use securevault_config::model::StorageConfig;
use securevault_core::{
    Account, SettingsStore, StorageAdapter, VaultError, VaultRepository, VaultSettings,
};
use tokio::sync::OnceCell;
use tracing::debug;

use crate::database::Database;
use crate::queries;

/// SQLite-backed account repository and settings store.
///
/// The database is opened by [`StorageAdapter::initialize`]; every other
/// operation fails with a storage error until then.
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// The connection is not opened until [`StorageAdapter::initialize`] is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    fn db(&self) -> Result<&Database, VaultError> {
        self.db.get().ok_or_else(|| VaultError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn initialize(&self) -> Result<(), VaultError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| VaultError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), VaultError> {
        let db = self.db()?;
        if self.config.wal_mode {
            db.checkpoint().await?;
            debug!("WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl VaultRepository for SqliteStorage {
    async fn put(&self, key: &str, account: &Account) -> Result<(), VaultError> {
        queries::accounts::put_account(self.db()?, key, account).await
    }

    async fn get(&self, key: &str) -> Result<Option<Account>, VaultError> {
        queries::accounts::get_account(self.db()?, key).await
    }

    async fn delete(&self, key: &str) -> Result<(), VaultError> {
        queries::accounts::delete_account(self.db()?, key).await
    }

    async fn list(&self) -> Result<Vec<Account>, VaultError> {
        queries::accounts::list_accounts(self.db()?).await
    }

    async fn clear(&self) -> Result<(), VaultError> {
        queries::accounts::clear_accounts(self.db()?).await
    }
}

#[async_trait]
impl SettingsStore for SqliteStorage {
    async fn load_settings(&self) -> Result<Option<VaultSettings>, VaultError> {
        queries::settings::load_settings(self.db()?).await
    }

    async fn save_settings(&self, settings: &VaultSettings) -> Result<(), VaultError> {
        queries::settings::save_settings(self.db()?, settings).await
    }

    async fn clear_settings(&self) -> Result<(), VaultError> {
        queries::settings::clear_settings(self.db()?).await
    }
}
