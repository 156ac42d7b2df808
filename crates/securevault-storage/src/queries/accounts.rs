// SPDX-FileCopyrightText: 2026 SecureVault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Account document CRUD.
//!
//! Each account is one JSON document in `accounts.data`. `bank_name` and
//! `updated_at` are copied into their own columns for ordering and filtering.

use rusqlite::params;
use securevault_core::{Account, VaultError};

use super::json_err;
use crate::database::{map_tr_err, Database};

/// Insert or replace the account stored under `key`.
pub async fn put_account(db: &Database, key: &str, account: &Account) -> Result<(), VaultError> {
    let data = serde_json::to_string(account).map_err(json_err)?;
    let key = key.to_string();
    let bank_name = account.bank_name.clone();
    let updated_at = account.updated_at.timestamp_micros();

    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO accounts (id, bank_name, data, updated_at) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(id) DO UPDATE SET
                     bank_name = excluded.bank_name,
                     data = excluded.data,
                     updated_at = excluded.updated_at",
                params![key, bank_name, data, updated_at],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Fetch the account stored under `key`.
pub async fn get_account(db: &Database, key: &str) -> Result<Option<Account>, VaultError> {
    let key = key.to_string();
    let data = db
        .connection()
        .call(move |conn| -> Result<Option<String>, rusqlite::Error> {
            let result = conn.query_row(
                "SELECT data FROM accounts WHERE id = ?1",
                params![key],
                |row| row.get(0),
            );
            match result {
                Ok(data) => Ok(Some(data)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)?;

    data.map(|d| serde_json::from_str(&d).map_err(json_err))
        .transpose()
}

/// Delete the account stored under `key`. Missing keys are ignored.
pub async fn delete_account(db: &Database, key: &str) -> Result<(), VaultError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute("DELETE FROM accounts WHERE id = ?1", params![key])?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// All accounts, most recently updated first.
pub async fn list_accounts(db: &Database) -> Result<Vec<Account>, VaultError> {
    let rows = db
        .connection()
        .call(|conn| -> Result<Vec<String>, rusqlite::Error> {
            let mut stmt =
                conn.prepare("SELECT data FROM accounts ORDER BY updated_at DESC, id ASC")?;
            let rows = stmt.query_map([], |row| row.get(0))?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)?;

    rows.iter()
        .map(|d| serde_json::from_str(d).map_err(json_err))
        .collect()
}

/// Delete every account.
pub async fn clear_accounts(db: &Database) -> Result<(), VaultError> {
    db.connection()
        .call(|conn| -> Result<(), rusqlite::Error> {
            conn.execute("DELETE FROM accounts", [])?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}
