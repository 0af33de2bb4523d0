//! plasmaledger Settings
//!
//! Configuration for plasmaledger tools.
//!
//! ## Features
//!
//! - Genesis member snapshot (address, name, starting earnings, active flag)
//! - Logging filter
//! - JSON serialization, every section optional
//!
//! ## Usage
//!
//! ```no_run
//! use plasmaledger_settings::{default_settings_path, Settings};
//!
//! let settings = Settings::load_from(&default_settings_path())?;
//! let genesis = settings.ledger.genesis_records()?;
//! # Ok::<(), plasmaledger_settings::SettingsError>(())
//! ```

mod config;

pub use config::{GenesisMember, LedgerSettings, LoggingSettings, Settings};

use std::path::PathBuf;

use plasmaledger_core::LedgerError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings: {0}")]
    ReadError(std::io::Error),

    #[error("Failed to write settings: {0}")]
    WriteError(std::io::Error),

    #[error("Failed to parse settings: {0}")]
    ParseError(serde_json::Error),

    #[error("Failed to create config directory: {0}")]
    CreateDirError(std::io::Error),

    #[error("Invalid genesis member #{index}: {source}")]
    InvalidMember { index: usize, source: LedgerError },
}

pub type Result<T> = std::result::Result<T, SettingsError>;

/// Default settings file: `plasmaledger.json` in the working directory
pub fn default_settings_path() -> PathBuf {
    PathBuf::from("plasmaledger.json")
}
