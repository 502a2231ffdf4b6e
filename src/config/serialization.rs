//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Serialize tier rules as [[loyalty.tiers]] entries
    fn tiers_to_toml(&self) -> String {
        let mut output = String::new();
        for rule in &self.loyalty.tiers {
            output.push_str("\n[[loyalty.tiers]]\n");
            output.push_str(&format!("name = {:?}\n", rule.name));
            output.push_str(&format!("threshold = {}\n", rule.threshold));
            match rule.window {
                Some(window) => output.push_str(&format!("window = {}\n", window)),
                None => output.push_str("# window = gap to the next tier\n"),
            }
        }
        output
    }

    /// Serialize config to TOML string
    pub fn to_toml(&self) -> String {
        let ledger = match &self.loyalty.ledger {
            Some(path) => format!("ledger = {:?}", path.display().to_string()),
            None => "# ledger = \"./ledger.json\"  # JSON array of transactions".to_string(),
        };

        format!(
            r#"# account-panel configuration

# How long notifications stay on screen (milliseconds)
toast_duration_ms = {toast_ms}

# Signed-in user and simulated account service
[account]
username = {username:?}
email = {email:?}
latency_ms = {latency}
fail_updates = {fail}             # Reject every profile update
reserved_usernames = {reserved:?}  # Updates to these names fail as taken

# Loyalty program
[loyalty]
current_points = {current}
total_earned = {earned}
{ledger}
{tiers}
# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
file_enabled = {file_enabled}
file_dir = {file_dir:?}
file_rotation = "{rotation}"
file_prefix = {prefix:?}
"#,
            toast_ms = self.toast_duration.as_millis(),
            username = self.account.username,
            email = self.account.email,
            latency = self.account.latency_ms,
            fail = self.account.fail_updates,
            reserved = self.account.reserved_usernames,
            current = self.loyalty.current_points,
            earned = self.loyalty.total_earned,
            ledger = ledger,
            tiers = self.tiers_to_toml(),
            log_level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            file_dir = self.logging.file_dir.display().to_string(),
            rotation = self.logging.file_rotation.as_str(),
            prefix = self.logging.file_prefix,
        )
    }
}
