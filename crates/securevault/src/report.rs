// SPDX-FileCopyrightText: 2026 SecureVault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal rendering of accounts, credentials and stats.

use std::io::{self, Write};

use colored::Colorize;
use securevault_core::types::KNOWN_BANKS;
use securevault_core::{Account, CredentialType, VaultStats};
use strum::IntoEnumIterator;

/// Show only the last four characters of an account number.
pub fn mask_account_number(number: &str) -> String {
    let chars: Vec<char> = number.chars().collect();
    if chars.len() <= 4 {
        return number.to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{tail}", "\u{2022}".repeat(4))
}

/// One line per account.
pub fn print_accounts(out: &mut dyn Write, accounts: &[Account], use_color: bool) -> io::Result<()> {
    if accounts.is_empty() {
        return writeln!(out, "  no accounts");
    }
    for account in accounts {
        let bank = if use_color {
            account.bank_name.bold().to_string()
        } else {
            account.bank_name.clone()
        };
        writeln!(
            out,
            "  {bank}  {}  {}  ({}, {} credential{})  [{}]",
            mask_account_number(&account.account_number),
            account.account_holder_name,
            account.account_type,
            account.credentials.len(),
            if account.credentials.len() == 1 { "" } else { "s" },
            account.id,
        )?;
    }
    Ok(())
}

/// Full account view with its credentials. Values stay encrypted.
pub fn print_account_detail(out: &mut dyn Write, account: &Account, use_color: bool) -> io::Result<()> {
    writeln!(out)?;
    if use_color {
        writeln!(out, "  {}", account.bank_name.bold())?;
    } else {
        writeln!(out, "  {}", account.bank_name)?;
    }
    writeln!(out, "  {}", "-".repeat(35))?;
    writeln!(out, "    Id:       {}", account.id)?;
    writeln!(out, "    Number:   {}", account.account_number)?;
    writeln!(out, "    Holder:   {}", account.account_holder_name)?;
    writeln!(out, "    Type:     {}", account.account_type)?;
    writeln!(out, "    Updated:  {}", account.updated_at.format("%Y-%m-%d %H:%M"))?;
    if let Some(notes) = &account.notes {
        writeln!(out, "    Notes:    {notes}")?;
    }
    writeln!(out)?;
    writeln!(out, "    Credentials:")?;
    if account.credentials.is_empty() {
        writeln!(out, "      none")?;
    }
    for credential in &account.credentials {
        writeln!(
            out,
            "      {} ({})  [{}]",
            credential.label, credential.credential_type, credential.id
        )?;
        if let Some(notes) = &credential.notes {
            writeln!(out, "        notes: {notes}")?;
        }
    }
    Ok(())
}

pub fn print_stats(out: &mut dyn Write, stats: &VaultStats, use_color: bool) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "  securevault stats")?;
    writeln!(out, "  {}", "-".repeat(35))?;
    let totals = format!(
        "{} accounts, {} credentials",
        stats.total_accounts, stats.total_credentials
    );
    if use_color {
        writeln!(out, "    {}", totals.green())?;
    } else {
        writeln!(out, "    {totals}")?;
    }

    if !stats.bank_distribution.is_empty() {
        writeln!(out)?;
        writeln!(out, "    By bank:")?;
        for (bank, count) in &stats.bank_distribution {
            writeln!(out, "      {bank:<32} {count}")?;
        }
    }
    if !stats.credential_type_distribution.is_empty() {
        writeln!(out)?;
        writeln!(out, "    By credential type:")?;
        for (kind, count) in &stats.credential_type_distribution {
            writeln!(out, "      {:<32} {count}", kind.default_label())?;
        }
    }
    Ok(())
}

/// Known banks and credential types, for filling in `account add` and
/// `credential add`.
pub fn print_catalog(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Banks:")?;
    for bank in KNOWN_BANKS {
        writeln!(out, "  {bank}")?;
    }
    writeln!(out)?;
    writeln!(out, "Credential types:")?;
    for kind in CredentialType::iter() {
        writeln!(out, "  {:<22} {}", kind.to_string(), kind.description())?;
    }
    Ok(())
}
