// SPDX-FileCopyrightText: 2026 SecureVault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns Figment failures into miette reports.
//!
//! A typo such as `kdff = "argon2id"` under `[vault]` is reported with a
//! pointer into the TOML file and the closest valid key name.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use figment::error::Kind;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Jaro-Winkler score a candidate must beat to be offered as a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("unknown key `{key}` in {section}")]
    #[diagnostic(
        code(securevault::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        /// `[vault]`, `[storage]`, or `top level`.
        section: String,
        suggestion: Option<String>,
        valid_keys: String,
        #[label("not a securevault setting")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("`{key}` has the wrong type: found {found}")]
    #[diagnostic(code(securevault::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        found: String,
        expected: String,
    },

    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(securevault::config::missing_key),
        help("add `{key} = <value>` to securevault.toml")
    )]
    MissingKey { key: String },

    /// A value parsed but is out of range or otherwise unusable.
    #[error("{message}")]
    #[diagnostic(code(securevault::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(securevault::config::other))]
    Other(String),
}

impl From<ConfigError> for securevault_core::VaultError {
    fn from(err: ConfigError) -> Self {
        securevault_core::VaultError::Config(err.to_string())
    }
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? valid keys are: {valid_keys}"),
        None => format!("valid keys are: {valid_keys}"),
    }
}

/// Convert every error carried by `err` into a [`ConfigError`].
///
/// `toml_sources` holds `(path, content)` pairs for the files that were
/// merged; unknown keys found in one of them get a source span.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    err.into_iter()
        .map(|error| convert(&error, toml_sources))
        .collect()
}

fn convert(error: &figment::Error, toml_sources: &[(String, String)]) -> ConfigError {
    match &error.kind {
        Kind::UnknownField(field, expected) => {
            let section = match error.path.first() {
                Some(name) => format!("[{name}]"),
                None => "top level".to_string(),
            };
            let (span, src) = match source_for(error, toml_sources) {
                Some((path, content)) => {
                    match find_key_offset(content, &error.path, field) {
                        Some(offset) => (
                            Some(SourceSpan::new(offset.into(), field.len())),
                            Some(NamedSource::new(path, content.to_string())),
                        ),
                        None => (None, None),
                    }
                }
                None => (None, None),
            };
            ConfigError::UnknownKey {
                key: field.clone(),
                section,
                suggestion: suggest_key(field, expected),
                valid_keys: expected.join(", "),
                span,
                src,
            }
        }
        Kind::MissingField(field) => ConfigError::MissingKey {
            key: dotted(&error.path, field),
        },
        Kind::InvalidType(found, expected) => ConfigError::InvalidType {
            key: error.path.join("."),
            found: found.to_string(),
            expected: expected.clone(),
        },
        _ => ConfigError::Other(error.to_string()),
    }
}

fn dotted(path: &[String], field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{}.{field}", path.join("."))
    }
}

/// The `(path, content)` pair the error's metadata points at, if it was a file.
fn source_for<'a>(
    error: &figment::Error,
    toml_sources: &'a [(String, String)],
) -> Option<(&'a str, &'a str)> {
    let figment::Source::File(file) = error.metadata.as_ref()?.source.as_ref()? else {
        return None;
    };
    let file = file.display().to_string();
    toml_sources
        .iter()
        .find(|(path, _)| *path == file)
        .map(|(path, content)| (path.as_str(), content.as_str()))
}

/// Byte offset of `field` as a key inside the table named by `path[0]`.
///
/// An empty `path` means the top-level table: only lines before the first
/// `[header]` are searched. Otherwise the search starts after the matching
/// header and stops at the next one.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let wanted = path.first().map(String::as_str);
    let mut in_table = wanted.is_none();
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        let start = offset;
        offset += line.len();

        let trimmed = line.trim_start();
        if let Some(header) = trimmed.strip_prefix('[') {
            let name = header.split(']').next().unwrap_or_default().trim();
            in_table = Some(name) == wanted;
            continue;
        }
        if !in_table {
            continue;
        }
        let Some(rest) = trimmed.strip_prefix(field) else {
            continue;
        };
        if rest.trim_start().starts_with('=') {
            return Some(start + (line.len() - trimmed.len()));
        }
    }

    None
}

/// Closest entry of `valid_keys` to `unknown`, if any scores above the threshold.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Print each error to stderr with miette's graphical renderer.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = miette::GraphicalReportHandler::new();
    for error in errors {
        let mut rendered = String::new();
        match handler.render_report(&mut rendered, error as &dyn Diagnostic) {
            Ok(()) => eprint!("{rendered}"),
            Err(_) => eprintln!("error: {error}"),
        }
    }
}
