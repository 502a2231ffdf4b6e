//! Loyalty configuration: balance, tier table, ledger source

use crate::loyalty::{default_tiers, LedgerError, TierRule, TierTable};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoyaltyConfig {
    pub current_points: u64,
    pub total_earned: u64,

    /// Tier rules in any order; sorted when the table is built
    pub tiers: Vec<TierRule>,

    /// JSON ledger file; the built-in sample is used when unset
    pub ledger: Option<PathBuf>,
}

impl Default for LoyaltyConfig {
    fn default() -> Self {
        Self {
            current_points: 2450,
            total_earned: 5680,
            tiers: default_tiers(),
            ledger: None,
        }
    }
}

/// Loyalty settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileLoyalty {
    pub current_points: Option<u64>,
    pub total_earned: Option<u64>,
    pub tiers: Option<Vec<TierRule>>,
    pub ledger: Option<String>,
}

impl LoyaltyConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileLoyalty>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            current_points: file.current_points.unwrap_or(defaults.current_points),
            total_earned: file.total_earned.unwrap_or(defaults.total_earned),
            tiers: file.tiers.unwrap_or(defaults.tiers),
            ledger: file.ledger.map(PathBuf::from),
        }
    }

    pub fn tier_table(&self) -> Result<TierTable, LedgerError> {
        TierTable::new(self.tiers.clone())
    }
}
