//! Server configuration — parsed from TOML file + environment variable overrides.
//!
//! Priority: environment variables > config file > defaults.

use anyhow::{Context, Result};
use heirloom_custody::{Address, HeartbeatConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// General server settings
    #[serde(default)]
    pub server: ServerSection,

    /// The vault to instantiate and monitor
    pub vault: VaultSection,

    /// Heartbeat thresholds
    #[serde(default)]
    pub heartbeat: HeartbeatConfig,
}

/// General server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    /// Data directory (vault state, event journal)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Check interval in seconds (default: 1 hour)
    #[serde(default = "default_check_interval")]
    pub check_interval_secs: u64,

    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            check_interval_secs: default_check_interval(),
            log_level: default_log_level(),
        }
    }
}

/// Vault instantiation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultSection {
    /// Owner identity (0x-prefixed hex)
    pub owner: String,

    /// Initial heir identity (0x-prefixed hex)
    pub heir: String,

    /// Initial deposit, in the smallest value unit
    #[serde(default)]
    pub initial_deposit: u64,
}

// ============================================================================
// Default value functions
// ============================================================================

fn default_data_dir() -> PathBuf {
    PathBuf::from("/data")
}

fn default_check_interval() -> u64 {
    3600 // 1 hour
}

fn default_log_level() -> String {
    "info".to_string()
}

// ============================================================================
// Loading & environment override
// ============================================================================

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: ServerConfig =
            toml::from_str(&contents).with_context(|| "Failed to parse TOML config")?;
        Ok(config)
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `HEIRLOOM_DATA_DIR`
    /// - `HEIRLOOM_CHECK_INTERVAL`
    /// - `HEIRLOOM_LOG_LEVEL`
    /// - `HEIRLOOM_OWNER`
    /// - `HEIRLOOM_INITIAL_HEIR`
    /// - `HEIRLOOM_INITIAL_DEPOSIT`
    pub fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("HEIRLOOM_DATA_DIR") {
            self.server.data_dir = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("HEIRLOOM_CHECK_INTERVAL") {
            if let Ok(secs) = v.parse::<u64>() {
                self.server.check_interval_secs = secs;
            }
        }
        if let Ok(v) = std::env::var("HEIRLOOM_LOG_LEVEL") {
            self.server.log_level = v;
        }
        if let Ok(v) = std::env::var("HEIRLOOM_OWNER") {
            self.vault.owner = v;
        }
        if let Ok(v) = std::env::var("HEIRLOOM_INITIAL_HEIR") {
            self.vault.heir = v;
        }
        if let Ok(v) = std::env::var("HEIRLOOM_INITIAL_DEPOSIT") {
            if let Ok(amount) = v.parse::<u64>() {
                self.vault.initial_deposit = amount;
            }
        }
    }

    /// Parse the owner identity.
    pub fn owner(&self) -> Result<Address> {
        self.vault
            .owner
            .parse()
            .with_context(|| format!("vault.owner is not a valid address: {}", self.vault.owner))
    }

    /// Parse the initial heir identity.
    pub fn heir(&self) -> Result<Address> {
        self.vault
            .heir
            .parse()
            .with_context(|| format!("vault.heir is not a valid address: {}", self.vault.heir))
    }

    /// Validate that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        let owner = self.owner()?;
        let heir = self.heir()?;

        anyhow::ensure!(!owner.is_zero(), "vault.owner must not be the zero address");
        anyhow::ensure!(!heir.is_zero(), "vault.heir must not be the zero address");

        // Check interval must be at least 60 seconds
        anyhow::ensure!(
            self.server.check_interval_secs >= 60,
            "server.check_interval_secs must be >= 60"
        );

        self.heartbeat
            .validate()
            .context("heartbeat thresholds are invalid")?;

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
