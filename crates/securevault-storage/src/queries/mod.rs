// SPDX-FileCopyrightText: 2026 SecureVault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules for the stored entities.

pub mod accounts;
pub mod settings;

use securevault_core::VaultError;

pub(crate) fn json_err(e: serde_json::Error) -> VaultError {
    VaultError::Storage {
        source: Box::new(e),
    }
}
