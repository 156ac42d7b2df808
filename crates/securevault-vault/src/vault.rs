// SPDX-FileCopyrightText: 2026 SecureVault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vault lifecycle and account/credential operations.
//!
//! The vault key is derived directly from the master password and the
//! per-vault salt stored in the settings record. There is no wrapped master
//! key and no password verifier: `unlock` always succeeds for a non-empty
//! password, and a wrong password is detected on the first decrypt as
//! [`VaultError::Authentication`].

use std::sync::Arc;

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use securevault_core::{
    Account, Credential, SettingsStore, VaultError, VaultRepository, VaultStats,
};
use tracing::{debug, info};

use crate::accounts::AccountDraft;
use crate::credentials::{self, CredentialDraft};
use crate::kdf::{KdfParams, Salt};
use crate::record;
use crate::session::VaultSession;

/// Shortest accepted master password, in characters.
pub const MIN_MASTER_PASSWORD_LEN: usize = 8;

/// An opened vault: storage handles plus the session key slot.
pub struct Vault {
    accounts: Arc<dyn VaultRepository>,
    settings: Arc<dyn SettingsStore>,
    /// KDF parameters for vaults created by [`Vault::setup`].
    params: KdfParams,
    session: VaultSession,
}

impl std::fmt::Debug for Vault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vault")
            .field("params", &self.params)
            .field("session", &self.session)
            .finish()
    }
}

impl Vault {
    /// Create a locked vault handle over the given stores.
    pub fn new(
        accounts: Arc<dyn VaultRepository>,
        settings: Arc<dyn SettingsStore>,
        params: KdfParams,
    ) -> Self {
        Self {
            accounts,
            settings,
            params,
            session: VaultSession::new(),
        }
    }

    /// The session slot used for all cipher operations.
    pub fn session(&self) -> &VaultSession {
        &self.session
    }

    /// Whether a settings record exists.
    pub async fn exists(&self) -> Result<bool, VaultError> {
        Ok(self.settings.load_settings().await?.is_some())
    }

    /// First-run setup: generate a salt, derive the key, persist settings and
    /// leave the session unlocked.
    pub async fn setup(&self, password: &SecretString) -> Result<(), VaultError> {
        if self.exists().await? {
            return Err(VaultError::AlreadyInitialized);
        }
        if password.expose_secret().chars().count() < MIN_MASTER_PASSWORD_LEN {
            return Err(VaultError::Validation(format!(
                "master password must be at least {MIN_MASTER_PASSWORD_LEN} characters"
            )));
        }
        self.params.validate()?;

        let (key, salt) = crate::kdf::derive_key(password, None, self.params).await?;
        self.settings
            .save_settings(&self.params.to_settings(&salt))
            .await?;
        self.session.install(key);

        info!(kdf = ?self.params.algorithm(), "vault created");
        Ok(())
    }

    /// Re-derive the key from `password` with the stored salt and parameters.
    pub async fn unlock(&self, password: &SecretString) -> Result<(), VaultError> {
        let settings = self
            .settings
            .load_settings()
            .await?
            .ok_or(VaultError::Uninitialized)?;
        let salt = Salt::from_hex(&settings.salt)?;
        let params = KdfParams::from_settings(&settings)?;

        self.session.unlock(password, Some(salt), params).await?;
        debug!("vault unlocked");
        Ok(())
    }

    /// Decrypt one stored credential to confirm the active key belongs to
    /// this vault. Returns `false` when no well-formed credential exists to
    /// check against.
    pub async fn verify_key(&self) -> Result<bool, VaultError> {
        let accounts = self.accounts.list().await?;
        let Some(credential) = accounts
            .iter()
            .flat_map(|a| a.credentials.iter())
            .find(|c| record::validate(&c.encrypted_value).is_ok())
        else {
            return Ok(false);
        };
        credentials::reveal_credential(&self.session, credential).await?;
        Ok(true)
    }

    pub fn lock(&self) {
        if self.session.is_unlocked() {
            info!("vault locked");
        }
        self.session.lock();
    }

    pub fn is_unlocked(&self) -> bool {
        self.session.is_unlocked()
    }

    // --- Accounts ---

    pub async fn create_account(&self, draft: AccountDraft) -> Result<Account, VaultError> {
        let account = draft.into_account()?;
        self.accounts.put(&account.id, &account).await?;
        debug!(account_id = %account.id, "account created");
        Ok(account)
    }

    pub async fn update_account(
        &self,
        id: &str,
        draft: AccountDraft,
    ) -> Result<Account, VaultError> {
        let mut account = self.require_account(id).await?;
        draft.apply_to(&mut account)?;
        self.accounts.put(&account.id, &account).await?;
        Ok(account)
    }

    pub async fn get_account(&self, id: &str) -> Result<Option<Account>, VaultError> {
        self.accounts.get(id).await
    }

    /// All accounts, most recently updated first.
    pub async fn list_accounts(&self) -> Result<Vec<Account>, VaultError> {
        self.accounts.list().await
    }

    pub async fn delete_account(&self, id: &str) -> Result<(), VaultError> {
        self.require_account(id).await?;
        self.accounts.delete(id).await?;
        debug!(account_id = %id, "account deleted");
        Ok(())
    }

    // --- Credentials ---

    /// Encrypt and append a credential to an account.
    pub async fn add_credential(
        &self,
        account_id: &str,
        draft: &CredentialDraft,
    ) -> Result<Account, VaultError> {
        let mut account = self.require_account(account_id).await?;
        let credential =
            checked(credentials::seal_credential(&self.session, draft, None).await?)?;
        debug!(account_id, credential_id = %credential.id, "credential added");
        account.credentials.push(credential);
        self.touch_and_save(account).await
    }

    pub async fn update_credential(
        &self,
        account_id: &str,
        credential_id: &str,
        draft: &CredentialDraft,
    ) -> Result<Account, VaultError> {
        let mut account = self.require_account(account_id).await?;
        let index = credential_index(&account, credential_id)?;
        let updated =
            credentials::seal_credential(&self.session, draft, Some(&account.credentials[index]))
                .await?;
        account.credentials[index] = checked(updated)?;
        self.touch_and_save(account).await
    }

    pub async fn delete_credential(
        &self,
        account_id: &str,
        credential_id: &str,
    ) -> Result<Account, VaultError> {
        let mut account = self.require_account(account_id).await?;
        let index = credential_index(&account, credential_id)?;
        account.credentials.remove(index);
        self.touch_and_save(account).await
    }

    /// Decrypt one credential's value.
    pub async fn reveal_credential(
        &self,
        account_id: &str,
        credential_id: &str,
    ) -> Result<SecretString, VaultError> {
        let account = self.require_account(account_id).await?;
        let credential = account
            .credential(credential_id)
            .ok_or_else(|| VaultError::credential_not_found(credential_id))?;
        credentials::reveal_credential(&self.session, credential).await
    }

    // --- Queries ---

    /// Accounts matching `query`. An empty query matches everything.
    pub async fn search(&self, query: &str) -> Result<Vec<Account>, VaultError> {
        let accounts = self.accounts.list().await?;
        if query.is_empty() {
            return Ok(accounts);
        }
        Ok(accounts
            .into_iter()
            .filter(|a| a.matches_query(query))
            .collect())
    }

    pub async fn accounts_by_bank(&self, bank_name: &str) -> Result<Vec<Account>, VaultError> {
        Ok(self
            .accounts
            .list()
            .await?
            .into_iter()
            .filter(|a| a.bank_name == bank_name)
            .collect())
    }

    pub async fn stats(&self) -> Result<VaultStats, VaultError> {
        Ok(VaultStats::from_accounts(&self.accounts.list().await?))
    }

    /// Delete all accounts and the settings record, and lock.
    pub async fn reset(&self) -> Result<(), VaultError> {
        self.session.lock();
        self.accounts.clear().await?;
        self.settings.clear_settings().await?;
        info!("vault reset: all data cleared");
        Ok(())
    }

    async fn require_account(&self, id: &str) -> Result<Account, VaultError> {
        self.accounts
            .get(id)
            .await?
            .ok_or_else(|| VaultError::account_not_found(id))
    }

    async fn touch_and_save(&self, mut account: Account) -> Result<Account, VaultError> {
        account.updated_at = Utc::now();
        self.accounts.put(&account.id, &account).await?;
        Ok(account)
    }
}

/// Structural check on a freshly sealed credential before it is stored.
fn checked(credential: Credential) -> Result<Credential, VaultError> {
    record::validate(&credential.encrypted_value)?;
    Ok(credential)
}

fn credential_index(account: &Account, credential_id: &str) -> Result<usize, VaultError> {
    account
        .credentials
        .iter()
        .position(|c| c.id == credential_id)
        .ok_or_else(|| VaultError::credential_not_found(credential_id))
}
