// SPDX-FileCopyrightText: 2026 SecureVault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence boundary traits.
//!
//! The vault core treats durable storage as an opaque key-value map. Every
//! trait uses `#[async_trait]` so implementations can sit behind
//! `Arc<dyn ...>`.

pub mod repository;
pub mod storage;

pub use repository::{SettingsStore, VaultRepository};
pub use storage::StorageAdapter;
