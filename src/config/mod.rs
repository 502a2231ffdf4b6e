//! Configuration for the account panel
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/account-panel/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod account;
mod loyalty;
mod observability;
mod serialization;

#[cfg(test)]
mod tests;

pub use account::{AccountConfig, FileAccount};
pub use loyalty::{FileLoyalty, LoyaltyConfig};
pub use observability::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_TOAST_MS: u64 = 3000;

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Config {
    /// Whether to run the TUI (false = scripted headless session)
    pub enable_tui: bool,

    /// How long notifications stay on screen
    pub toast_duration: Duration,

    /// Signed-in user and account service behaviour
    pub account: AccountConfig,

    /// Balance, tier table and ledger source
    pub loyalty: LoyaltyConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enable_tui: true,
            toast_duration: Duration::from_millis(DEFAULT_TOAST_MS),
            account: AccountConfig::default(),
            loyalty: LoyaltyConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub toast_duration_ms: Option<u64>,

    /// Optional [account] section
    pub account: Option<FileAccount>,

    /// Optional [loyalty] section
    pub loyalty: Option<FileLoyalty>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

fn env_flag(value: Option<String>) -> Option<bool> {
    value.map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

impl Config {
    /// Get the config file path: ~/.config/account-panel/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("account-panel").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        // Ignore errors - config is optional
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists
    ///
    /// A config file that exists but fails to parse is an error: silently
    /// falling back to defaults would hide the typo.
    fn load_file_config() -> anyhow::Result<FileConfig> {
        let Some(path) = Self::config_path() else {
            return Ok(FileConfig::default());
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse_file_config(&contents)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(anyhow::anyhow!("Cannot read {}: {}", path.display(), e)),
        }
    }

    pub(crate) fn parse_file_config(contents: &str) -> Result<FileConfig, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Load configuration: env vars > file > defaults
    pub fn from_env() -> anyhow::Result<Self> {
        let file = Self::load_file_config()?;
        Ok(Self::from_sources(file, |key| std::env::var(key).ok()))
    }

    /// Merge a parsed file with an environment lookup
    pub(crate) fn from_sources(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        // TUI toggle: env only (runtime flag)
        let enable_tui = !env_flag(env("ACCOUNT_PANEL_NO_TUI")).unwrap_or(false);

        // Toast duration: env > file > default
        let toast_ms = env("ACCOUNT_PANEL_TOAST_MS")
            .and_then(|v| v.parse().ok())
            .or(file.toast_duration_ms)
            .unwrap_or(DEFAULT_TOAST_MS);

        let mut account = AccountConfig::from_file(file.account);
        if let Some(fail) = env_flag(env("ACCOUNT_PANEL_FAIL_UPDATES")) {
            account.fail_updates = fail;
        }

        Self {
            enable_tui,
            toast_duration: Duration::from_millis(toast_ms),
            account,
            loyalty: LoyaltyConfig::from_file(file.loyalty),
            logging: LoggingConfig::from_file(file.logging),
        }
    }
}
