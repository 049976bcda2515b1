//! Configuration loading and management
//!
//! Handles parsing of `.td.toml` configuration files in the data directory.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::lock::DEFAULT_LOCK_TIMEOUT_MS;

/// Config file name inside the data directory
pub const CONFIG_FILE: &str = ".td.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Optional feature toggles
    #[serde(default)]
    pub features: FeaturesConfig,

    /// Store behavior
    #[serde(default)]
    pub store: StoreConfig,

    /// Authentication policy
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Workflow capabilities that vary between deployments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturesConfig {
    /// Allow admins to unlock a closed task back to pending
    #[serde(default = "default_true")]
    pub admin_unlock: bool,

    /// Allow deleting tasks from the closed state
    #[serde(default)]
    pub closed_delete: bool,

    /// Offer the catch-all "Others" category
    #[serde(default = "default_true")]
    pub others_category: bool,
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            admin_unlock: default_true(),
            closed_delete: false,
            others_category: default_true(),
        }
    }
}

/// Store-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Bound on waiting for a collection lock, in milliseconds
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            lock_timeout_ms: default_lock_timeout_ms(),
        }
    }
}

/// Authentication policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Minimum password length for new accounts
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            min_password_len: default_min_password_len(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_lock_timeout_ms() -> u64 {
    DEFAULT_LOCK_TIMEOUT_MS
}

fn default_min_password_len() -> usize {
    8
}

impl Config {
    /// Load configuration from a specific file path
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a data directory, falling back to defaults
    /// when the file is missing or unreadable.
    pub fn load_from_dir(data_dir: &Path) -> Self {
        let config_path = data_dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path).unwrap_or_default()
        } else {
            Self::default()
        }
    }
}
