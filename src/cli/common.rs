//! Shared CLI plumbing: error type, exit codes, and helpers.

use std::fmt;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::constants::CART_FILE_NAME;
use crate::store::{CartStore, FileBackend};

/// Result type for CLI command execution.
pub type CliResult<T> = Result<T, CliError>;

/// Classified CLI error, mapped to a process exit code in `main`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    kind: CliErrorKind,
    message: String,
}

/// Error classification for exit-code mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorKind {
    /// Invalid input or failed precondition (exit code 1)
    Validation,
    /// Underlying I/O or serialization failure (exit code 2)
    Io,
}

impl CliError {
    /// Creates a validation error (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Validation,
            message: message.into(),
        }
    }

    /// Creates an I/O error (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Io,
            message: message.into(),
        }
    }

    /// The process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self.kind {
            CliErrorKind::Validation => 1,
            CliErrorKind::Io => 2,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Loads the configuration, falling back to defaults when no file exists.
pub fn load_config() -> Config {
    Config::load().unwrap_or_default()
}

/// Builds the file-backed cart store from the active configuration.
pub fn open_store(config: &Config) -> CliResult<CartStore<FileBackend>> {
    let data_dir = config
        .data_dir()
        .map_err(|e| CliError::io(format!("Failed to resolve data directory: {e}")))?;

    let catalog = Catalog::load()
        .map_err(|e| CliError::io(format!("Failed to load catalog database: {e}")))?;

    Ok(CartStore::new(
        FileBackend::new(data_dir.join(CART_FILE_NAME)),
        catalog,
    ))
}

/// Formats an amount for display, e.g. `$12.34`.
pub fn format_currency(value: f64, symbol: &str) -> String {
    format!("{symbol}{value:.2}")
}

/// Serializes a value as pretty JSON for `--json` output.
pub fn to_json_pretty<T: serde::Serialize>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))
}
