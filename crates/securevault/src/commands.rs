// SPDX-FileCopyrightText: 2026 SecureVault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand bodies. Each writes its result to `out`.

use std::io::Write;

use secrecy::ExposeSecret;
use securevault_core::VaultError;
use securevault_vault::{mask_secret, AccountDraft, CredentialDraft, Vault};

use crate::report;

fn io_err(e: std::io::Error) -> VaultError {
    VaultError::Internal(format!("failed to write output: {e}"))
}

fn json_err(e: serde_json::Error) -> VaultError {
    VaultError::Internal(format!("failed to render JSON: {e}"))
}

pub async fn add_account(
    vault: &Vault,
    draft: AccountDraft,
    out: &mut dyn Write,
) -> Result<String, VaultError> {
    let account = vault.create_account(draft).await?;
    writeln!(out, "Added account {} ({})", account.id, account.bank_name).map_err(io_err)?;
    Ok(account.id)
}

pub async fn edit_account(
    vault: &Vault,
    id: &str,
    draft: AccountDraft,
    out: &mut dyn Write,
) -> Result<(), VaultError> {
    let account = vault.update_account(id, draft).await?;
    writeln!(out, "Updated account {}", account.id).map_err(io_err)
}

/// List accounts, optionally only those at `bank`.
pub async fn list_accounts(
    vault: &Vault,
    bank: Option<&str>,
    json: bool,
    out: &mut dyn Write,
    use_color: bool,
) -> Result<(), VaultError> {
    let accounts = match bank {
        Some(bank) => vault.accounts_by_bank(bank).await?,
        None => vault.list_accounts().await?,
    };
    if json {
        let rendered = serde_json::to_string_pretty(&accounts).map_err(json_err)?;
        return writeln!(out, "{rendered}").map_err(io_err);
    }
    report::print_accounts(out, &accounts, use_color).map_err(io_err)
}

pub async fn show_account(
    vault: &Vault,
    id: &str,
    out: &mut dyn Write,
    use_color: bool,
) -> Result<(), VaultError> {
    let account = vault
        .get_account(id)
        .await?
        .ok_or_else(|| VaultError::account_not_found(id))?;
    report::print_account_detail(out, &account, use_color).map_err(io_err)
}

pub async fn remove_account(vault: &Vault, id: &str, out: &mut dyn Write) -> Result<(), VaultError> {
    vault.delete_account(id).await?;
    writeln!(out, "Removed account {id}").map_err(io_err)
}

/// Requires an unlocked vault.
pub async fn add_credential(
    vault: &Vault,
    account_id: &str,
    draft: &CredentialDraft,
    out: &mut dyn Write,
) -> Result<String, VaultError> {
    let account = vault.add_credential(account_id, draft).await?;
    let credential = account
        .credentials
        .last()
        .ok_or_else(|| VaultError::Internal("credential was not stored".to_string()))?;
    writeln!(
        out,
        "Added {} to {} [{}]",
        credential.label, account.bank_name, credential.id
    )
    .map_err(io_err)?;
    Ok(credential.id.clone())
}

/// Requires an unlocked vault.
pub async fn edit_credential(
    vault: &Vault,
    account_id: &str,
    credential_id: &str,
    draft: &CredentialDraft,
    out: &mut dyn Write,
) -> Result<(), VaultError> {
    vault
        .update_credential(account_id, credential_id, draft)
        .await?;
    writeln!(out, "Updated credential {credential_id}").map_err(io_err)
}

/// Print a decrypted credential value, or bullets when `masked`.
pub async fn reveal_credential(
    vault: &Vault,
    account_id: &str,
    credential_id: &str,
    masked: bool,
    out: &mut dyn Write,
) -> Result<(), VaultError> {
    let value = vault.reveal_credential(account_id, credential_id).await?;
    if masked {
        writeln!(out, "{}", mask_secret(&value)).map_err(io_err)
    } else {
        writeln!(out, "{}", value.expose_secret()).map_err(io_err)
    }
}

pub async fn remove_credential(
    vault: &Vault,
    account_id: &str,
    credential_id: &str,
    out: &mut dyn Write,
) -> Result<(), VaultError> {
    vault.delete_credential(account_id, credential_id).await?;
    writeln!(out, "Removed credential {credential_id}").map_err(io_err)
}

pub async fn search(
    vault: &Vault,
    query: &str,
    json: bool,
    out: &mut dyn Write,
    use_color: bool,
) -> Result<(), VaultError> {
    let accounts = vault.search(query).await?;
    if json {
        let rendered = serde_json::to_string_pretty(&accounts).map_err(json_err)?;
        return writeln!(out, "{rendered}").map_err(io_err);
    }
    report::print_accounts(out, &accounts, use_color).map_err(io_err)
}

pub async fn stats(
    vault: &Vault,
    json: bool,
    out: &mut dyn Write,
    use_color: bool,
) -> Result<(), VaultError> {
    let stats = vault.stats().await?;
    if json {
        let rendered = serde_json::to_string_pretty(&stats).map_err(json_err)?;
        return writeln!(out, "{rendered}").map_err(io_err);
    }
    report::print_stats(out, &stats, use_color).map_err(io_err)
}

/// Delete everything. Refuses unless `confirmed`.
pub async fn reset(vault: &Vault, confirmed: bool, out: &mut dyn Write) -> Result<(), VaultError> {
    if !confirmed {
        return Err(VaultError::Validation(
            "reset deletes every account and the master password setup; pass --yes to confirm"
                .to_string(),
        ));
    }
    vault.reset().await?;
    writeln!(out, "Vault reset. Run `securevault init` to start over.").map_err(io_err)
}
