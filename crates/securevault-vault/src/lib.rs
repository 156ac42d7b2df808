// SPDX-FileCopyrightText: 2026 SecureVault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client-side encryption for SecureVault.
//!
//! A master password is stretched with PBKDF2-HMAC-SHA256 (or Argon2id) into
//! a 256-bit key held by a [`VaultSession`]. Each credential value is sealed
//! independently with AES-256-GCM under a fresh random nonce. Only ciphertext
//! reaches storage; the key itself is never persisted.

pub mod accounts;
pub mod credentials;
pub mod crypto;
pub mod kdf;
pub mod prompt;
pub mod record;
pub mod session;
pub mod vault;

pub use accounts::AccountDraft;
pub use credentials::{mask_secret, CredentialDraft};
pub use crypto::MasterKey;
pub use kdf::{KdfParams, Salt};
pub use prompt::{get_master_password, get_master_password_with_confirm};
pub use session::VaultSession;
pub use vault::Vault;
