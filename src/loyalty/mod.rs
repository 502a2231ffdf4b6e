//! Loyalty tier calculator
//!
//! Pure functions over a points balance and a tier table. Nothing here holds
//! state; the renderer calls into it on every frame.
//!
//! Each tier carries its own progress window. When a tier does not set one,
//! the window is the gap between its threshold and the next tier's threshold.

pub mod ledger;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

pub use ledger::{LedgerError, LoyaltyAccount, TransactionKind};

/// Label used in place of a progress percentage at the top tier
pub const MAX_TIER_LABEL: &str = "Max tier reached";

/// One row of the tier table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierRule {
    pub name: String,
    /// Minimum balance that unlocks this tier
    pub threshold: u64,
    /// Size of the progress band towards the next tier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<u64>,
}

impl TierRule {
    pub fn new(name: impl Into<String>, threshold: u64, window: Option<u64>) -> Self {
        Self {
            name: name.into(),
            threshold,
            window,
        }
    }
}

/// Tier table ordered ascending by threshold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierTable {
    rules: Vec<TierRule>,
}

impl TierTable {
    /// Build a table from unordered rules.
    ///
    /// Rules are sorted stably, so equal thresholds keep their input order
    /// and the later rule counts as the higher tier. The lowest threshold
    /// must be 0 so that every balance has a tier.
    pub fn new(mut rules: Vec<TierRule>) -> Result<Self, LedgerError> {
        rules.sort_by_key(|r| r.threshold);
        let Some(first) = rules.first() else {
            return Err(LedgerError::EmptyTierTable);
        };
        if first.threshold != 0 {
            return Err(LedgerError::TierTableFloor {
                name: first.name.clone(),
                threshold: first.threshold,
            });
        }
        Ok(Self { rules })
    }

    #[cfg(test)]
    pub fn rules(&self) -> &[TierRule] {
        &self.rules
    }

    /// Index of the highest tier whose threshold is <= points
    pub fn tier_index(&self, points: u64) -> usize {
        self.rules
            .iter()
            .rposition(|r| r.threshold <= points)
            .unwrap_or(0)
    }

    /// Tier reached by crossing the next threshold above `index`.
    ///
    /// With tied thresholds this is the last rule of the tied group, the
    /// same tier `tier_index` resolves once the balance gets there.
    fn next_rule(&self, index: usize) -> Option<&TierRule> {
        let threshold = self.rules.get(index + 1)?.threshold;
        self.rules
            .iter()
            .rposition(|r| r.threshold == threshold)
            .map(|i| &self.rules[i])
    }

    /// Derive tier, next tier and progress for a balance
    pub fn standing(&self, points: u64) -> TierStanding {
        let index = self.tier_index(points);
        let current = &self.rules[index];

        let Some(next) = self.next_rule(index) else {
            return TierStanding {
                tier: current.name.clone(),
                next_tier: None,
                points_to_next_tier: 0,
                window: current.window.unwrap_or(0),
                progress: 1.0,
            };
        };

        let points_to_next_tier = next.threshold.saturating_sub(points);
        let window = current
            .window
            .unwrap_or(next.threshold - current.threshold);

        TierStanding {
            tier: current.name.clone(),
            next_tier: Some(next.name.clone()),
            points_to_next_tier,
            window,
            progress: progress_fraction(window, points_to_next_tier),
        }
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            rules: default_tiers(),
        }
    }
}

/// Gold -> Platinum keeps the 3000-point band the storefront has always shown
pub fn default_tiers() -> Vec<TierRule> {
    vec![
        TierRule::new("Gold", 0, Some(3000)),
        TierRule::new("Platinum", 3000, Some(5000)),
        TierRule::new("Diamond", 8000, None),
    ]
}

/// `(window - remaining) / window` clamped to [0, 1]; an empty window is complete
pub fn progress_fraction(window: u64, points_to_next_tier: u64) -> f64 {
    if window == 0 {
        return 1.0;
    }
    let covered = window.saturating_sub(points_to_next_tier);
    (covered as f64 / window as f64).clamp(0.0, 1.0)
}

/// Where a balance sits in the tier table
#[derive(Debug, Clone, PartialEq)]
pub struct TierStanding {
    pub tier: String,
    /// None at the top tier
    pub next_tier: Option<String>,
    pub points_to_next_tier: u64,
    pub window: u64,
    /// Always within [0, 1]
    pub progress: f64,
}

impl TierStanding {
    pub fn is_max_tier(&self) -> bool {
        self.next_tier.is_none()
    }

    /// Whole percent, rounded half away from zero
    pub fn percent_complete(&self) -> u8 {
        (self.progress * 100.0).round() as u8
    }

    /// "82% complete", or the max-tier label
    pub fn progress_label(&self) -> String {
        if self.is_max_tier() {
            MAX_TIER_LABEL.to_string()
        } else {
            format!("{}% complete", self.percent_complete())
        }
    }

    /// "Progress to Platinum"
    pub fn heading(&self) -> String {
        match &self.next_tier {
            Some(next) => format!("Progress to {}", next),
            None => format!("{} (top tier)", self.tier),
        }
    }

    /// "550 points needed"
    pub fn points_needed_label(&self) -> String {
        if self.is_max_tier() {
            MAX_TIER_LABEL.to_string()
        } else {
            format!("{} points needed", format_points(self.points_to_next_tier))
        }
    }
}

/// Format a balance with thousands separators: 5680 -> "5,680"
pub fn format_points(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);

    for (count, ch) in s.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, ch);
    }

    result
}

/// Signed ledger amount: "+150", "-100", "+0"
pub fn format_signed_points(points: i64) -> String {
    let sign = if points < 0 { '-' } else { '+' };
    format!("{}{}", sign, format_points(points.unsigned_abs()))
}

/// Text and background colour for a tier name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierPalette {
    pub fg: Color,
    pub bg: Color,
}

/// Palette lookup. Unknown tiers get the neutral palette.
pub fn tier_palette(tier: &str) -> TierPalette {
    match tier {
        "Gold" => TierPalette {
            fg: Color::Rgb(202, 138, 4),
            bg: Color::Rgb(254, 249, 195),
        },
        "Platinum" => TierPalette {
            fg: Color::Rgb(75, 85, 99),
            bg: Color::Rgb(243, 244, 246),
        },
        "Diamond" => TierPalette {
            fg: Color::Rgb(37, 99, 235),
            bg: Color::Rgb(219, 234, 254),
        },
        _ => TierPalette {
            fg: Color::Rgb(75, 85, 99),
            bg: Color::Rgb(243, 244, 246),
        },
    }
}

/// A perk in the "How to Use Your Points" guide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reward {
    pub points: u64,
    pub perk: &'static str,
}

pub const REDEMPTION_GUIDE: [Reward; 6] = [
    Reward {
        points: 100,
        perk: "$1 discount",
    },
    Reward {
        points: 500,
        perk: "Free shipping",
    },
    Reward {
        points: 1000,
        perk: "10% off next purchase",
    },
    Reward {
        points: 2000,
        perk: "Exclusive product access",
    },
    Reward {
        points: 3000,
        perk: "Tier upgrade",
    },
    Reward {
        points: 5000,
        perk: "VIP customer support",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> Vec<TierTable> {
        vec![
            TierTable::default(),
            TierTable::new(vec![
                TierRule::new("Diamond", 5000, None),
                TierRule::new("Bronze", 0, None),
                TierRule::new("Silver", 1000, Some(250)),
            ])
            .unwrap(),
            // Tied thresholds
            TierTable::new(vec![
                TierRule::new("Base", 0, None),
                TierRule::new("Gold", 2000, None),
                TierRule::new("Platinum", 2000, None),
                TierRule::new("Diamond", 9000, Some(0)),
            ])
            .unwrap(),
            TierTable::new(vec![TierRule::new("Only", 0, None)]).unwrap(),
        ]
    }

    #[test]
    fn test_sample_balance_shows_82_percent() {
        let standing = TierTable::default().standing(2450);
        assert_eq!(standing.tier, "Gold");
        assert_eq!(standing.next_tier.as_deref(), Some("Platinum"));
        assert_eq!(standing.points_to_next_tier, 550);
        assert_eq!(standing.window, 3000);
        assert!((standing.progress - 2450.0 / 3000.0).abs() < 1e-9);
        assert_eq!(standing.progress_label(), "82% complete");
        assert_eq!(standing.points_needed_label(), "550 points needed");
        assert_eq!(standing.heading(), "Progress to Platinum");
    }

    #[test]
    fn test_tier_is_monotonic_in_points() {
        for table in tables() {
            let mut last = 0;
            for points in (0..=12_000).step_by(7) {
                let index = table.tier_index(points);
                assert!(index >= last, "tier went down at {} points", points);
                last = index;
            }
        }
    }

    #[test]
    fn test_progress_stays_in_unit_interval() {
        for table in tables() {
            for points in (0..=12_000).step_by(13).chain([u64::MAX]) {
                let progress = table.standing(points).progress;
                assert!((0.0..=1.0).contains(&progress), "{} at {}", progress, points);
            }
        }
    }

    #[test]
    fn test_top_tier_reports_max() {
        let standing = TierTable::default().standing(10_000);
        assert_eq!(standing.tier, "Diamond");
        assert!(standing.is_max_tier());
        assert_eq!(standing.points_to_next_tier, 0);
        assert_eq!(standing.progress, 1.0);
        assert_eq!(standing.progress_label(), MAX_TIER_LABEL);
    }

    #[test]
    fn test_tied_thresholds_prefer_later_tier() {
        let table = &tables()[2];
        assert_eq!(table.standing(2000).tier, "Platinum");
        assert_eq!(table.standing(1999).tier, "Base");
        // Base has no window of its own: the gap to Platinum (2000) is used
        let standing = table.standing(1500);
        assert_eq!(standing.next_tier.as_deref(), Some("Platinum"));
        assert_eq!(standing.window, 2000);
        assert_eq!(standing.percent_complete(), 75);
    }

    #[test]
    fn test_next_tier_matches_tier_reached_at_threshold() {
        let table = &tables()[2];
        let below = table.standing(1500);
        let at = table.standing(2000);
        assert_eq!(below.next_tier.as_deref(), Some(at.tier.as_str()));
        assert_eq!(below.heading(), "Progress to Platinum");
        assert_eq!(below.points_to_next_tier, 500);
    }

    #[test]
    fn test_window_defaults_to_gap() {
        let table = &tables()[1];
        let standing = table.standing(500);
        assert_eq!(standing.tier, "Bronze");
        assert_eq!(standing.window, 1000);
        assert_eq!(standing.progress_label(), "50% complete");

        // Explicit window smaller than the gap clamps at zero
        let standing = table.standing(1000);
        assert_eq!(standing.points_to_next_tier, 4000);
        assert_eq!(standing.progress, 0.0);
    }

    #[test]
    fn test_zero_window_is_complete() {
        assert_eq!(progress_fraction(0, 0), 1.0);
        assert_eq!(progress_fraction(0, 500), 1.0);
        assert_eq!(progress_fraction(3000, 9000), 0.0);
    }

    #[test]
    fn test_table_validation() {
        assert_eq!(TierTable::new(vec![]), Err(LedgerError::EmptyTierTable));
        assert_eq!(
            TierTable::new(vec![TierRule::new("Gold", 100, None)]),
            Err(LedgerError::TierTableFloor {
                name: "Gold".to_string(),
                threshold: 100
            })
        );
    }

    #[test]
    fn test_format_points_groups_thousands() {
        assert_eq!(format_points(0), "0");
        assert_eq!(format_points(999), "999");
        assert_eq!(format_points(2450), "2,450");
        assert_eq!(format_points(1_234_567), "1,234,567");
        assert_eq!(format_signed_points(150), "+150");
        assert_eq!(format_signed_points(-1500), "-1,500");
    }

    #[test]
    fn test_tier_palette_falls_back() {
        assert_ne!(tier_palette("Gold"), tier_palette("Diamond"));
        assert_eq!(tier_palette("Bronze"), tier_palette("Platinum"));
        assert_eq!(tier_palette(""), tier_palette("Platinum"));
    }
}
