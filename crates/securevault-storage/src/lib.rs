// SPDX-FileCopyrightText: 2026 SecureVault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for SecureVault.
//!
//! Accounts are stored as JSON documents keyed by id, with credential values
//! already encrypted by the vault layer. The settings record (salt and KDF
//! parameters) lives in its own single-row table. Schema changes are applied
//! by embedded refinery migrations on open.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteStorage;
pub use database::Database;
