// SPDX-FileCopyrightText: 2026 SecureVault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Master password acquisition via TTY prompt or environment variable.

use secrecy::SecretString;
use securevault_core::VaultError;
use zeroize::Zeroizing;

/// Environment variable checked before prompting.
pub const MASTER_PASSWORD_ENV_VAR: &str = "SECUREVAULT_MASTER_PASSWORD";

fn from_env() -> Option<SecretString> {
    std::env::var(MASTER_PASSWORD_ENV_VAR)
        .ok()
        .filter(|v| !v.is_empty())
        .map(SecretString::from)
}

/// Typed input is held in a buffer that is zeroed on drop.
fn read_hidden(prompt: &str) -> Result<Zeroizing<String>, VaultError> {
    eprint!("{prompt}");
    rpassword::read_password()
        .map(Zeroizing::new)
        .map_err(|e| VaultError::Internal(format!("failed to read password: {e}")))
}

fn no_source() -> VaultError {
    VaultError::Validation(format!(
        "no master password provided; set {MASTER_PASSWORD_ENV_VAR} or run interactively"
    ))
}

/// Master password from `SECUREVAULT_MASTER_PASSWORD`, else an interactive prompt.
pub fn get_master_password() -> Result<SecretString, VaultError> {
    if let Some(password) = from_env() {
        return Ok(password);
    }

    if std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        let password = read_hidden("Master password: ")?;
        if password.is_empty() {
            return Err(VaultError::Validation("empty password not allowed".to_string()));
        }
        return Ok(SecretString::from(password.as_str()));
    }

    Err(no_source())
}

/// Like [`get_master_password`] but asks twice on a terminal. Used at setup.
pub fn get_master_password_with_confirm() -> Result<SecretString, VaultError> {
    if let Some(password) = from_env() {
        return Ok(password);
    }

    if std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        let first = read_hidden("New master password: ")?;
        let second = read_hidden("Confirm master password: ")?;
        if *first != *second {
            return Err(VaultError::Validation("passwords do not match".to_string()));
        }
        if first.is_empty() {
            return Err(VaultError::Validation("empty password not allowed".to_string()));
        }
        return Ok(SecretString::from(first.as_str()));
    }

    Err(no_source())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use serial_test::serial;

    #[test]
    #[serial]
    fn password_from_env_var() {
        // SAFETY: env mutation is confined to #[serial] tests.
        unsafe { std::env::set_var(MASTER_PASSWORD_ENV_VAR, "CorrectHorse1!") };
        let result = get_master_password();
        unsafe { std::env::remove_var(MASTER_PASSWORD_ENV_VAR) };

        assert_eq!(result.unwrap().expose_secret(), "CorrectHorse1!");
    }

    #[test]
    #[serial]
    fn confirm_variant_accepts_env_var_without_prompting() {
        unsafe { std::env::set_var(MASTER_PASSWORD_ENV_VAR, "CorrectHorse1!") };
        let result = get_master_password_with_confirm();
        unsafe { std::env::remove_var(MASTER_PASSWORD_ENV_VAR) };

        assert!(result.is_ok());
    }

    #[test]
    fn hidden_input_is_read_into_a_zeroizing_buffer() {
        // Fails to compile if the prompt ever hands back a plain String.
        let reader: fn(&str) -> Result<Zeroizing<String>, VaultError> = read_hidden;
        let _ = reader;
    }

    #[test]
    #[serial]
    fn empty_env_var_without_terminal_is_rejected() {
        unsafe { std::env::set_var(MASTER_PASSWORD_ENV_VAR, "") };
        // Test runners do not attach a terminal to stdin.
        let result = get_master_password();
        unsafe { std::env::remove_var(MASTER_PASSWORD_ENV_VAR) };

        assert!(matches!(result, Err(VaultError::Validation(_))));
    }
}
