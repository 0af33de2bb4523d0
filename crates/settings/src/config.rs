//! Configuration types

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use plasmaledger_core::{parse_amount, MemberRecord};

use crate::{Result, SettingsError};

/// Main settings structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Ledger settings
    #[serde(default)]
    pub ledger: LedgerSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Settings {
    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No settings at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(SettingsError::ReadError)?;
        let settings: Settings = serde_json::from_str(&content).map_err(SettingsError::ParseError)?;
        info!(
            "Loaded settings from {:?}: {} genesis members",
            path,
            settings.ledger.members.len()
        );
        Ok(settings)
    }

    /// Write settings as pretty JSON, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(SettingsError::CreateDirError)?;
            }
        }

        let content = serde_json::to_string_pretty(self).map_err(SettingsError::ParseError)?;
        std::fs::write(path, content).map_err(SettingsError::WriteError)?;
        info!("Wrote settings to {:?}", path);
        Ok(())
    }
}

/// Ledger settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerSettings {
    /// Members the ledger starts with
    #[serde(default)]
    pub members: Vec<GenesisMember>,
}

impl LedgerSettings {
    /// Validate the genesis snapshot into member records.
    ///
    /// Duplicate addresses are left for `Ledger::with_members` to reject.
    pub fn genesis_records(&self) -> Result<Vec<MemberRecord>> {
        self.members
            .iter()
            .enumerate()
            .map(|(index, member)| {
                member
                    .to_record()
                    .map_err(|source| SettingsError::InvalidMember { index, source })
            })
            .collect()
    }
}

/// One member of the genesis snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisMember {
    pub address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Decimal string, so balances beyond 2^53 survive JSON
    #[serde(default = "default_earnings")]
    pub earnings: String,

    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_earnings() -> String {
    "0".to_string()
}

fn default_active() -> bool {
    true
}

impl GenesisMember {
    fn to_record(&self) -> plasmaledger_core::Result<MemberRecord> {
        let earnings = parse_amount(&self.earnings)?;
        let mut record = MemberRecord::with_earnings(&self.address, self.name.as_deref(), earnings)?;
        record.set_active(self.active);
        Ok(record)
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `tracing` filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "warn,plasmaledger=info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}
