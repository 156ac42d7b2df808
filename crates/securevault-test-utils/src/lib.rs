// SPDX-FileCopyrightText: 2026 SecureVault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for SecureVault integration tests.
//!
//! - [`MemoryRepository`]: in-memory account and settings store
//! - [`TestHarness`]: a ready-to-use [`Vault`](securevault_vault::Vault)
//!   over either backend

pub mod harness;
pub mod memory;

pub use harness::{Backend, TestHarness, TestHarnessBuilder, TEST_PASSWORD};
pub use memory::MemoryRepository;
