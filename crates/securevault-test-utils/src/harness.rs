// SPDX-FileCopyrightText: 2026 SecureVault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness assembling a [`Vault`] over a chosen backend.

use std::sync::Arc;

use secrecy::SecretString;
use securevault_config::model::StorageConfig;
use securevault_core::{StorageAdapter, VaultError};
use securevault_storage::SqliteStorage;
use securevault_vault::{KdfParams, Vault};

use crate::memory::MemoryRepository;

/// Master password used by harnesses built with `with_setup`.
pub const TEST_PASSWORD: &str = "CorrectHorse1!";

/// Storage behind the harness vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Memory,
    /// SQLite file in a temp directory owned by the harness.
    Sqlite,
}

/// Builder for test vaults.
pub struct TestHarnessBuilder {
    backend: Backend,
    setup: bool,
    params: KdfParams,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            backend: Backend::Memory,
            setup: false,
            params: KdfParams::default(),
        }
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Run first-time setup with [`TEST_PASSWORD`], leaving the vault unlocked.
    pub fn with_setup(mut self) -> Self {
        self.setup = true;
        self
    }

    pub fn with_kdf(mut self, params: KdfParams) -> Self {
        self.params = params;
        self
    }

    pub async fn build(self) -> Result<TestHarness, VaultError> {
        let (vault, temp_dir, db_path) = match self.backend {
            Backend::Memory => {
                let repo = Arc::new(MemoryRepository::new());
                (Vault::new(repo.clone(), repo, self.params), None, None)
            }
            Backend::Sqlite => {
                let temp_dir = tempfile::TempDir::new()
                    .map_err(|e| VaultError::Storage { source: e.into() })?;
                let db_path = temp_dir.path().join("test.db").to_string_lossy().into_owned();
                let storage = SqliteStorage::new(StorageConfig {
                    database_path: db_path.clone(),
                    wal_mode: true,
                });
                storage.initialize().await?;
                let storage = Arc::new(storage);
                (
                    Vault::new(storage.clone(), storage, self.params),
                    Some(temp_dir),
                    Some(db_path),
                )
            }
        };

        if self.setup {
            vault.setup(&SecretString::from(TEST_PASSWORD)).await?;
        }

        Ok(TestHarness {
            vault,
            db_path,
            _temp_dir: temp_dir,
        })
    }
}

/// A vault plus whatever keeps its backend alive.
pub struct TestHarness {
    pub vault: Vault,
    db_path: Option<String>,
    _temp_dir: Option<tempfile::TempDir>,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Path of the SQLite file, for the SQLite backend.
    pub fn db_path(&self) -> Option<&str> {
        self.db_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_harness_with_setup_is_unlocked() {
        let harness = TestHarness::builder().with_setup().build().await.unwrap();
        assert!(harness.vault.is_unlocked());
        assert!(harness.vault.exists().await.unwrap());
        assert!(harness.db_path().is_none());
    }

    #[tokio::test]
    async fn sqlite_harness_owns_a_database_file() {
        let harness = TestHarness::builder()
            .with_backend(Backend::Sqlite)
            .build()
            .await
            .unwrap();
        assert!(!harness.vault.is_unlocked());
        let path = harness.db_path().unwrap();
        assert!(std::path::Path::new(path).exists());
    }
}
