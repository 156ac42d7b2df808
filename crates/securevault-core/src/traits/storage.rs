// SPDX-FileCopyrightText: 2026 SecureVault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter lifecycle trait for persistence backends (SQLite, etc.).

use async_trait::async_trait;

use crate::error::VaultError;

/// Lifecycle of a storage backend.
///
/// Backends that need to open connections or run migrations do so in
/// [`initialize`](StorageAdapter::initialize); repositories must not be used
/// before it returns.
#[async_trait]
pub trait StorageAdapter: Send + Sync + 'static {
    /// Human-readable backend name, used in logs.
    fn name(&self) -> &str;

    /// Initializes the storage backend (migrations, connection, etc.).
    async fn initialize(&self) -> Result<(), VaultError>;

    /// Closes the storage backend, flushing pending writes.
    async fn close(&self) -> Result<(), VaultError>;
}
