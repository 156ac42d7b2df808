// SPDX-FileCopyrightText: 2026 SecureVault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The single vault settings record.

use rusqlite::params;
use securevault_core::{VaultError, VaultSettings};

use super::json_err;
use crate::database::{map_tr_err, Database};

const SETTINGS_KEY: &str = "settings";

pub async fn load_settings(db: &Database) -> Result<Option<VaultSettings>, VaultError> {
    let value = db
        .connection()
        .call(|conn| -> Result<Option<String>, rusqlite::Error> {
            let result = conn.query_row(
                "SELECT value FROM vault_settings WHERE key = ?1",
                params![SETTINGS_KEY],
                |row| row.get(0),
            );
            match result {
                Ok(value) => Ok(Some(value)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)?;

    value
        .map(|v| serde_json::from_str(&v).map_err(json_err))
        .transpose()
}

pub async fn save_settings(db: &Database, settings: &VaultSettings) -> Result<(), VaultError> {
    let value = serde_json::to_string(settings).map_err(json_err)?;
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT OR REPLACE INTO vault_settings (key, value) VALUES (?1, ?2)",
                params![SETTINGS_KEY, value],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

pub async fn clear_settings(db: &Database) -> Result<(), VaultError> {
    db.connection()
        .call(|conn| -> Result<(), rusqlite::Error> {
            conn.execute("DELETE FROM vault_settings", [])?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}
