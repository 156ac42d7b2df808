// SPDX-FileCopyrightText: 2026 SecureVault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SecureVault - a local encrypted vault for banking PINs and passwords.
//!
//! This is the binary entry point.

use std::io::{IsTerminal, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use securevault::app::{self, App};
use securevault::commands;
use securevault::report;
use securevault_config::SecureVaultConfig;
use securevault_core::{AccountType, CredentialType, VaultError};
use securevault_vault::{AccountDraft, CredentialDraft};

/// SecureVault - a local encrypted vault for banking PINs and passwords.
#[derive(Parser, Debug)]
#[command(name = "securevault", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new vault protected by a master password.
    Init,
    /// Manage bank accounts.
    Account {
        #[command(subcommand)]
        command: AccountCommand,
    },
    /// Manage encrypted credentials within an account.
    Credential {
        #[command(subcommand)]
        command: CredentialCommand,
    },
    /// Find accounts by bank, holder, account number or credential label.
    Search {
        query: String,
        #[arg(long)]
        json: bool,
    },
    /// Account and credential counts.
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// List known banks and credential types.
    Catalog,
    /// Delete all accounts and the vault setup.
    Reset {
        /// Confirm deletion.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
struct AccountFields {
    #[arg(long)]
    bank: String,
    #[arg(long)]
    number: String,
    #[arg(long)]
    holder: String,
    #[arg(long = "type", default_value = "savings")]
    account_type: AccountType,
    #[arg(long)]
    notes: Option<String>,
}

impl AccountFields {
    fn into_draft(self) -> AccountDraft {
        let draft = AccountDraft::new(self.bank, self.number, self.holder).with_type(self.account_type);
        match self.notes {
            Some(notes) => draft.with_notes(notes),
            None => draft,
        }
    }
}

#[derive(Subcommand, Debug)]
enum AccountCommand {
    /// Add an account.
    Add(AccountFields),
    /// Replace an account's details. Credentials are kept.
    Edit {
        id: String,
        #[command(flatten)]
        fields: AccountFields,
    },
    /// List accounts, most recently updated first.
    List {
        /// Only accounts at this bank.
        #[arg(long)]
        bank: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Show one account and its credential labels.
    Show { id: String },
    /// Delete an account and all its credentials.
    Remove { id: String },
}

#[derive(Args, Debug)]
struct CredentialFields {
    #[arg(long = "type")]
    credential_type: CredentialType,
    /// Defaults to the credential type's name.
    #[arg(long)]
    label: Option<String>,
    /// Stored unencrypted.
    #[arg(long)]
    notes: Option<String>,
}

impl CredentialFields {
    /// The value itself is read from the terminal, never from arguments.
    fn into_draft(self) -> Result<CredentialDraft, VaultError> {
        let value = app::read_credential_value()?;
        Ok(CredentialDraft {
            credential_type: self.credential_type,
            label: self.label,
            value,
            notes: self.notes,
        })
    }
}

#[derive(Subcommand, Debug)]
enum CredentialCommand {
    /// Encrypt and store a new credential.
    Add {
        account_id: String,
        #[command(flatten)]
        fields: CredentialFields,
    },
    /// Replace a credential's value and details.
    Edit {
        account_id: String,
        credential_id: String,
        #[command(flatten)]
        fields: CredentialFields,
    },
    /// Decrypt and print a credential.
    Reveal {
        account_id: String,
        credential_id: String,
        /// Print bullets instead of the value.
        #[arg(long)]
        masked: bool,
    },
    /// Delete a credential.
    Remove {
        account_id: String,
        credential_id: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => securevault_config::load_and_validate_path(path),
        None => securevault_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            securevault_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log.level);

    let use_color = !cli.plain && std::io::stdout().is_terminal();
    if let Err(e) = run(cli.command, &config, use_color).await {
        print_error(&e, use_color);
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: &SecureVaultConfig, use_color: bool) -> Result<(), VaultError> {
    let mut stdout = std::io::stdout();
    let out: &mut dyn Write = &mut stdout;

    if let Commands::Catalog = command {
        return report::print_catalog(out)
            .map_err(|e| VaultError::Internal(format!("failed to write output: {e}")));
    }

    let app = App::open(config).await?;
    let vault = &app.vault;

    let result = match command {
        Commands::Init => app.init().await.and_then(|()| {
            writeln!(out, "Vault created and unlocked.")
                .map_err(|e| VaultError::Internal(format!("failed to write output: {e}")))
        }),
        Commands::Account { command } => match command {
            AccountCommand::Add(fields) => {
                commands::add_account(vault, fields.into_draft(), out).await.map(drop)
            }
            AccountCommand::Edit { id, fields } => {
                commands::edit_account(vault, &id, fields.into_draft(), out).await
            }
            AccountCommand::List { bank, json } => {
                commands::list_accounts(vault, bank.as_deref(), json, out, use_color).await
            }
            AccountCommand::Show { id } => commands::show_account(vault, &id, out, use_color).await,
            AccountCommand::Remove { id } => commands::remove_account(vault, &id, out).await,
        },
        Commands::Credential { command } => run_credential(&app, command, out).await,
        Commands::Search { query, json } => {
            commands::search(vault, &query, json, out, use_color).await
        }
        Commands::Stats { json } => commands::stats(vault, json, out, use_color).await,
        Commands::Reset { yes } => commands::reset(vault, yes, out).await,
        Commands::Catalog => Ok(()),
    };

    let closed = app.close().await;
    result.and(closed)
}

async fn run_credential(
    app: &App,
    command: CredentialCommand,
    out: &mut dyn Write,
) -> Result<(), VaultError> {
    // Removing a credential needs no key.
    if !matches!(command, CredentialCommand::Remove { .. }) {
        app.unlock().await?;
    }
    let vault = &app.vault;
    match command {
        CredentialCommand::Add { account_id, fields } => {
            let draft = fields.into_draft()?;
            commands::add_credential(vault, &account_id, &draft, out)
                .await
                .map(drop)
        }
        CredentialCommand::Edit {
            account_id,
            credential_id,
            fields,
        } => {
            let draft = fields.into_draft()?;
            commands::edit_credential(vault, &account_id, &credential_id, &draft, out).await
        }
        CredentialCommand::Reveal {
            account_id,
            credential_id,
            masked,
        } => commands::reveal_credential(vault, &account_id, &credential_id, masked, out).await,
        CredentialCommand::Remove {
            account_id,
            credential_id,
        } => commands::remove_credential(vault, &account_id, &credential_id, out).await,
    }
}

fn print_error(e: &VaultError, use_color: bool) {
    if use_color {
        use colored::Colorize;
        eprintln!("{} {e}", "error:".red().bold());
    } else {
        eprintln!("error: {e}");
    }
}

/// Initialize the tracing subscriber with an env filter.
///
/// `RUST_LOG` takes precedence; otherwise the workspace crates log at
/// `log_level` and everything else at `warn`.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "securevault={log_level},securevault_vault={log_level},\
             securevault_storage={log_level},securevault_config={log_level},warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}
