//! # Station Configuration
//!
//! ## Load Order (later overrides earlier)
//! 1. Defaults (this file)
//! 2. Config file (`stockscan.toml` in the platform config dir, or `--config`)
//! 3. Environment variables (`STOCKSCAN_*`)
//! 4. CLI flags (applied by the caller)
//!
//! ## Example Config File
//! ```toml
//! [ledger]
//! path = "inventory_dataset.csv"
//!
//! [scan]
//! cancel_key = "q"
//! sound_enabled = true
//! snapshot_dir = "."
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Configuration load failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Ledger file settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSettings {
    /// CSV file holding the inventory.
    #[serde(default = "default_ledger_path")]
    pub path: PathBuf,
}

fn default_ledger_path() -> PathBuf {
    PathBuf::from("inventory_dataset.csv")
}

impl Default for LedgerSettings {
    fn default() -> Self {
        LedgerSettings {
            path: default_ledger_path(),
        }
    }
}

/// Scan session settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSettings {
    /// Line typed to cancel a running scan.
    #[serde(default = "default_cancel_key")]
    pub cancel_key: String,

    /// Ring the terminal bell on detection.
    #[serde(default = "default_sound_enabled")]
    pub sound_enabled: bool,

    /// Directory for the single-slot detection snapshot.
    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: PathBuf,
}

fn default_cancel_key() -> String {
    "q".to_string()
}
fn default_sound_enabled() -> bool {
    true
}
fn default_snapshot_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ScanSettings {
    fn default() -> Self {
        ScanSettings {
            cancel_key: default_cancel_key(),
            sound_enabled: default_sound_enabled(),
            snapshot_dir: default_snapshot_dir(),
        }
    }
}

/// Complete station configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ledger: LedgerSettings,

    #[serde(default)]
    pub scan: ScanSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// An explicit `config_path` that does not exist is an error; a missing
    /// default config file is not.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let explicit = config_path.is_some();
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() || explicit => {
                info!(?path, "Loading config from file");
                Self::from_file(&path)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parses a config file without applying overrides.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ledger.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("ledger.path must not be empty".into()));
        }
        if self.scan.cancel_key.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "scan.cancel_key must not be blank".into(),
            ));
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `STOCKSCAN_*` overrides from `lookup`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("STOCKSCAN_LEDGER_PATH") {
            debug!(%path, "Overriding ledger path from environment");
            self.ledger.path = PathBuf::from(path);
        }

        if let Some(dir) = lookup("STOCKSCAN_SNAPSHOT_DIR") {
            self.scan.snapshot_dir = PathBuf::from(dir);
        }

        if let Some(sound) = lookup("STOCKSCAN_SOUND") {
            match sound.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "on" | "yes" => self.scan.sound_enabled = true,
                "0" | "false" | "off" | "no" => self.scan.sound_enabled = false,
                other => debug!(value = %other, "Ignoring unrecognised STOCKSCAN_SOUND"),
            }
        }
    }

    /// `stockscan.toml` in the platform config directory.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "stockscan", "stockscan")
            .map(|dirs| dirs.config_dir().join("stockscan.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.ledger.path, PathBuf::from("inventory_dataset.csv"));
        assert_eq!(config.scan.cancel_key, "q");
        assert!(config.scan.sound_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: AppConfig = toml::from_str("[scan]\nsound_enabled = false\n").unwrap();
        assert!(!config.scan.sound_enabled);
        assert_eq!(config.scan.cancel_key, "q");
        assert_eq!(config.ledger, LedgerSettings::default());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stockscan.toml");
        std::fs::write(&path, "[ledger]\npath = \"/data/stock.csv\"\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.ledger.path, PathBuf::from("/data/stock.csv"));
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(Some(dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();
        config.scan.cancel_key = "  ".to_string();
        assert!(config.validate().is_err());

        config.scan.cancel_key = "x".to_string();
        config.ledger.path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = AppConfig::default();
        config.apply_overrides(|key| match key {
            "STOCKSCAN_LEDGER_PATH" => Some("/tmp/ledger.csv".to_string()),
            "STOCKSCAN_SOUND" => Some("off".to_string()),
            _ => None,
        });

        assert_eq!(config.ledger.path, PathBuf::from("/tmp/ledger.csv"));
        assert!(!config.scan.sound_enabled);
        assert_eq!(config.scan.snapshot_dir, PathBuf::from("."));
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&AppConfig::default()).unwrap();
        assert!(toml_str.contains("[ledger]"));
        assert!(toml_str.contains("[scan]"));
    }
}
