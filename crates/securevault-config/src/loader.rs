// SPDX-FileCopyrightText: 2026 SecureVault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./securevault.toml` > `~/.config/securevault/securevault.toml`
//! > `/etc/securevault/securevault.toml` with environment variable overrides via the
//! `SECUREVAULT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::SecureVaultConfig;

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "securevault.toml";

/// System-wide config file.
pub const SYSTEM_CONFIG_FILE: &str = "/etc/securevault/securevault.toml";

/// Env vars that share the prefix but are not config keys.
const NON_CONFIG_ENV_KEYS: &[&str] = &["master_password"];

/// Per-user config file under the XDG config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("securevault").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/securevault/securevault.toml` (system-wide)
/// 3. `~/.config/securevault/securevault.toml` (user XDG config)
/// 4. `./securevault.toml` (local directory)
/// 5. `SECUREVAULT_*` environment variables
pub fn load_config() -> Result<SecureVaultConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<SecureVaultConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SecureVaultConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SecureVaultConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SecureVaultConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(SecureVaultConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_FILE))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Environment provider with explicit section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `SECUREVAULT_STORAGE_DATABASE_PATH` must map to
/// `storage.database_path`, not `storage.database.path`.
fn env_provider() -> Env {
    Env::prefixed("SECUREVAULT_")
        .ignore(NON_CONFIG_ENV_KEYS)
        .map(|key| {
            let mapped = key
                .as_str()
                .replacen("log_", "log.", 1)
                .replacen("storage_", "storage.", 1)
                .replacen("vault_", "vault.", 1);
            mapped.into()
        })
}
