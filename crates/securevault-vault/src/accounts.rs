// SPDX-FileCopyrightText: 2026 SecureVault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Account input validation.

use chrono::Utc;
use securevault_core::{Account, AccountType, VaultError};

/// User input for a new or edited account.
#[derive(Debug, Clone)]
pub struct AccountDraft {
    pub bank_name: String,
    pub account_number: String,
    pub account_type: AccountType,
    pub account_holder_name: String,
    pub notes: Option<String>,
}

impl AccountDraft {
    pub fn new(
        bank_name: impl Into<String>,
        account_number: impl Into<String>,
        account_holder_name: impl Into<String>,
    ) -> Self {
        Self {
            bank_name: bank_name.into(),
            account_number: account_number.into(),
            account_type: AccountType::Savings,
            account_holder_name: account_holder_name.into(),
            notes: None,
        }
    }

    pub fn with_type(mut self, account_type: AccountType) -> Self {
        self.account_type = account_type;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Trim every field and check the required ones.
    pub fn validate(&self) -> Result<Self, VaultError> {
        let required = |name: &str, value: &str| -> Result<String, VaultError> {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Err(VaultError::Validation(format!("{name} is required")))
            } else {
                Ok(trimmed.to_string())
            }
        };

        Ok(Self {
            bank_name: required("bank name", &self.bank_name)?,
            account_number: required("account number", &self.account_number)?,
            account_type: self.account_type,
            account_holder_name: required("account holder name", &self.account_holder_name)?,
            notes: self
                .notes
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
        })
    }

    /// Validate and build a fresh account with no credentials.
    pub fn into_account(self) -> Result<Account, VaultError> {
        let draft = self.validate()?;
        let now = Utc::now();
        Ok(Account {
            id: uuid::Uuid::new_v4().to_string(),
            bank_name: draft.bank_name,
            account_number: draft.account_number,
            account_type: draft.account_type,
            account_holder_name: draft.account_holder_name,
            credentials: Vec::new(),
            created_at: now,
            updated_at: now,
            is_active: true,
            notes: draft.notes,
        })
    }

    /// Validate and overwrite the editable fields of `account`.
    pub fn apply_to(self, account: &mut Account) -> Result<(), VaultError> {
        let draft = self.validate()?;
        account.bank_name = draft.bank_name;
        account.account_number = draft.account_number;
        account.account_type = draft.account_type;
        account.account_holder_name = draft.account_holder_name;
        account.notes = draft.notes;
        account.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_draft_builds_active_account() {
        let account = AccountDraft::new(" HDFC Bank ", "50100012341234", "A. Kumar")
            .with_type(AccountType::Salary)
            .into_account()
            .unwrap();
        assert_eq!(account.bank_name, "HDFC Bank");
        assert_eq!(account.account_type, AccountType::Salary);
        assert!(account.is_active);
        assert!(account.credentials.is_empty());
        assert_eq!(account.created_at, account.updated_at);
    }

    #[test]
    fn missing_required_fields_are_rejected() {
        for draft in [
            AccountDraft::new("", "1", "x"),
            AccountDraft::new("SBI", "  ", "x"),
            AccountDraft::new("SBI", "1", ""),
        ] {
            assert!(matches!(
                draft.into_account(),
                Err(VaultError::Validation(_))
            ));
        }
    }

    #[test]
    fn blank_notes_become_none() {
        let account = AccountDraft::new("SBI", "1", "x")
            .with_notes("  ")
            .into_account()
            .unwrap();
        assert_eq!(account.notes, None);
    }

    #[test]
    fn apply_keeps_identity_and_credentials() {
        let mut account = AccountDraft::new("SBI", "1", "x").into_account().unwrap();
        let id = account.id.clone();
        let created = account.created_at;

        AccountDraft::new("Axis Bank", "2", "y")
            .apply_to(&mut account)
            .unwrap();
        assert_eq!(account.id, id);
        assert_eq!(account.created_at, created);
        assert_eq!(account.bank_name, "Axis Bank");
    }
}
