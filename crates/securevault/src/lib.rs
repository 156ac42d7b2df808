// SPDX-FileCopyrightText: 2026 SecureVault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command implementations for the `securevault` binary.
//!
//! Every command takes an opened [`Vault`](securevault_vault::Vault) and an
//! output sink, so the same code paths run from the CLI and from tests.

pub mod app;
pub mod commands;
pub mod report;
