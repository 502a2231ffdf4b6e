//! Account configuration
//!
//! Seeds the signed-in identity and controls how the simulated account
//! service answers requests.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountConfig {
    /// Username of the signed-in user at startup
    pub username: String,

    /// Email of the signed-in user at startup
    pub email: String,

    /// Simulated round-trip time for every request
    pub latency_ms: u64,

    /// Reject every profile update with "Update failed"
    pub fail_updates: bool,

    /// Usernames that are already taken
    pub reserved_usernames: Vec<String>,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            username: "shopper".to_string(),
            email: "shopper@example.com".to_string(),
            latency_ms: 600,
            fail_updates: false,
            reserved_usernames: vec!["admin".to_string()],
        }
    }
}

/// Account settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileAccount {
    pub username: Option<String>,
    pub email: Option<String>,
    pub latency_ms: Option<u64>,
    pub fail_updates: Option<bool>,
    pub reserved_usernames: Option<Vec<String>>,
}

impl AccountConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileAccount>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            username: file.username.unwrap_or(defaults.username),
            email: file.email.unwrap_or(defaults.email),
            latency_ms: file.latency_ms.unwrap_or(defaults.latency_ms),
            fail_updates: file.fail_updates.unwrap_or(defaults.fail_updates),
            reserved_usernames: file
                .reserved_usernames
                .unwrap_or(defaults.reserved_usernames),
        }
    }
}
