//! Configuration tests
//!
//! The serialized template must parse back through the file layer, and the
//! env > file > defaults precedence must hold for every merged field.

use super::*;
use crate::loyalty::TierRule;
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed = Config::parse_file_config(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    let merged = Config::from_sources(parsed.unwrap(), no_env);
    assert_eq!(merged.account, config.account);
    assert_eq!(merged.loyalty, config.loyalty);
    assert_eq!(merged.logging, config.logging);
    assert_eq!(merged.toast_duration, config.toast_duration);
}

#[test]
fn test_config_roundtrip_custom_tiers_and_ledger() {
    let mut config = Config::default();
    config.loyalty.tiers = vec![
        TierRule::new("Bronze", 0, None),
        TierRule::new("Gold", 1000, Some(1500)),
    ];
    config.loyalty.ledger = Some(PathBuf::from("/tmp/ledger.json"));
    config.logging.file_rotation = LogRotation::Hourly;

    let parsed = Config::parse_file_config(&config.to_toml()).unwrap();
    let merged = Config::from_sources(parsed, no_env);

    assert_eq!(merged.loyalty.tiers, config.loyalty.tiers);
    assert_eq!(merged.loyalty.ledger, config.loyalty.ledger);
    assert_eq!(merged.logging.file_rotation, LogRotation::Hourly);
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_file_uses_defaults() {
    let config = Config::from_sources(FileConfig::default(), no_env);
    assert!(config.enable_tui);
    assert_eq!(config.toast_duration, Duration::from_millis(3000));
    assert_eq!(config.account, AccountConfig::default());
    assert_eq!(config.loyalty.current_points, 2450);
    assert!(config.loyalty.tier_table().is_ok());
}

#[test]
fn test_partial_file_overrides_only_given_keys() {
    let file = Config::parse_file_config(
        r#"
        toast_duration_ms = 1500

        [account]
        username = "alice"
        fail_updates = true

        [loyalty]
        current_points = 9000
        "#,
    )
    .unwrap();
    let config = Config::from_sources(file, no_env);

    assert_eq!(config.toast_duration, Duration::from_millis(1500));
    assert_eq!(config.account.username, "alice");
    assert_eq!(config.account.email, AccountConfig::default().email);
    assert!(config.account.fail_updates);
    assert_eq!(config.loyalty.current_points, 9000);
    assert_eq!(config.loyalty.total_earned, 5680);
}

#[test]
fn test_env_beats_file() {
    let file = Config::parse_file_config(
        r#"
        toast_duration_ms = 1500
        [account]
        fail_updates = true
        "#,
    )
    .unwrap();
    let env = env_from(&[
        ("ACCOUNT_PANEL_TOAST_MS", "250"),
        ("ACCOUNT_PANEL_FAIL_UPDATES", "false"),
        ("ACCOUNT_PANEL_NO_TUI", "1"),
    ]);
    let config = Config::from_sources(file, env);

    assert_eq!(config.toast_duration, Duration::from_millis(250));
    assert!(!config.account.fail_updates);
    assert!(!config.enable_tui);
}

#[test]
fn test_unparseable_env_falls_through() {
    let env = env_from(&[("ACCOUNT_PANEL_TOAST_MS", "soon")]);
    let config = Config::from_sources(FileConfig::default(), env);
    assert_eq!(config.toast_duration, Duration::from_millis(3000));
}

#[test]
fn test_tier_table_from_file() {
    let file = Config::parse_file_config(
        r#"
        [[loyalty.tiers]]
        name = "Silver"
        threshold = 500

        [[loyalty.tiers]]
        name = "Basic"
        threshold = 0
        window = 500
        "#,
    )
    .unwrap();
    let config = Config::from_sources(file, no_env);
    let table = config.loyalty.tier_table().unwrap();

    assert_eq!(table.rules()[0].name, "Basic");
    assert_eq!(table.standing(250).progress_label(), "50% complete");
}

#[test]
fn test_log_rotation_parse() {
    assert_eq!(LogRotation::parse("HOURLY"), LogRotation::Hourly);
    assert_eq!(LogRotation::parse("never"), LogRotation::Never);
    assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
}

#[test]
fn test_invalid_toml_is_an_error() {
    assert!(Config::parse_file_config("toast_duration_ms = \"fast\"").is_err());
}
