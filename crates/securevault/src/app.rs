// SPDX-FileCopyrightText: 2026 SecureVault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Opening the configured vault and unlocking it.

use std::io::{BufRead, IsTerminal};
use std::sync::Arc;

use secrecy::SecretString;
use securevault_config::SecureVaultConfig;
use securevault_core::{StorageAdapter, VaultError};
use securevault_storage::SqliteStorage;
use securevault_vault::{get_master_password, get_master_password_with_confirm, KdfParams, Vault};
use tracing::{debug, info, warn};

/// A vault over the configured SQLite database.
pub struct App {
    pub vault: Vault,
    storage: Arc<SqliteStorage>,
}

impl App {
    /// Open storage and build a locked vault. New vaults use the KDF from
    /// the `[vault]` config section.
    pub async fn open(config: &SecureVaultConfig) -> Result<Self, VaultError> {
        let storage = Arc::new(SqliteStorage::new(config.storage.clone()));
        storage.initialize().await?;
        let params = KdfParams::from_config(&config.vault);
        let vault = Vault::new(storage.clone(), storage.clone(), params);
        debug!(path = %config.storage.database_path, "vault opened");
        Ok(Self { vault, storage })
    }

    /// First-run setup with a confirmed master password.
    pub async fn init(&self) -> Result<(), VaultError> {
        if self.vault.exists().await? {
            return Err(VaultError::AlreadyInitialized);
        }
        let password = get_master_password_with_confirm()?;
        self.vault.setup(&password).await
    }

    /// Prompt for the master password and unlock.
    ///
    /// When the vault already holds credentials one of them is decrypted so a
    /// mistyped password fails here instead of producing unreadable entries.
    pub async fn unlock(&self) -> Result<(), VaultError> {
        if !self.vault.exists().await? {
            return Err(VaultError::Uninitialized);
        }
        let password = get_master_password()?;
        self.vault.unlock(&password).await?;
        if let Err(e) = self.vault.verify_key().await {
            self.vault.lock();
            return Err(e);
        }
        info!("vault unlocked");
        Ok(())
    }

    /// Lock the session and flush storage.
    pub async fn close(self) -> Result<(), VaultError> {
        self.vault.lock();
        if let Err(e) = self.storage.close().await {
            warn!(error = %e, "storage close failed");
            return Err(e);
        }
        Ok(())
    }
}

/// Read a credential value: hidden prompt on a terminal, one line of stdin
/// otherwise.
pub fn read_credential_value() -> Result<SecretString, VaultError> {
    if std::io::stdin().is_terminal() {
        let value = rpassword::prompt_password("Credential value: ")
            .map_err(|e| VaultError::Internal(format!("failed to read value: {e}")))?;
        return Ok(SecretString::from(value));
    }

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| VaultError::Internal(format!("failed to read value: {e}")))?;
    Ok(SecretString::from(line.trim_end_matches(['\r', '\n']).to_string()))
}
