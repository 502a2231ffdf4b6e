// Loyalty ledger - transactions and the account summary
//
// Ledgers come from the built-in sample or from a JSON file of
// transaction records. Records are checked once at load time.

use super::{TierStanding, TierTable};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Ledger and tier table errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("transaction {id}: {kind:?} entry has points {points}")]
    KindMismatch {
        id: u32,
        kind: TransactionKind,
        points: i64,
    },

    #[error("transaction id {0} appears more than once")]
    DuplicateId(u32),

    #[error("current points ({current}) exceed total earned ({total})")]
    BalanceExceedsEarned { current: u64, total: u64 },

    #[error("tier table is empty")]
    EmptyTierTable,

    #[error("lowest tier {name} starts at {threshold}; it must start at 0")]
    TierTableFloor { name: String, threshold: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Earned,
    Redeemed,
}

impl TransactionKind {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Earned => "Earned",
            TransactionKind::Redeemed => "Redeemed",
        }
    }
}

/// One point-affecting ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u32,
    pub description: String,
    pub points: i64,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

impl Transaction {
    pub fn new(
        id: u32,
        description: impl Into<String>,
        points: i64,
        date: NaiveDate,
        kind: TransactionKind,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            points,
            date,
            kind,
        }
    }

    /// Earned entries are >= 0, redeemed entries are < 0
    pub fn validate(&self) -> Result<(), LedgerError> {
        let consistent = match self.kind {
            TransactionKind::Earned => self.points >= 0,
            TransactionKind::Redeemed => self.points < 0,
        };
        if consistent {
            Ok(())
        } else {
            Err(LedgerError::KindMismatch {
                id: self.id,
                kind: self.kind,
                points: self.points,
            })
        }
    }

    pub fn points_label(&self) -> String {
        super::format_signed_points(self.points)
    }

    /// US locale short date: 1/15/2024
    pub fn date_label(&self) -> String {
        self.date.format("%-m/%-d/%Y").to_string()
    }
}

/// Check every record and id uniqueness; order is preserved
pub fn validate_ledger(transactions: &[Transaction]) -> Result<(), LedgerError> {
    let mut seen = HashSet::with_capacity(transactions.len());
    for tx in transactions {
        tx.validate()?;
        if !seen.insert(tx.id) {
            return Err(LedgerError::DuplicateId(tx.id));
        }
    }
    Ok(())
}

/// Balance, tier standing and history shown on the panel
#[derive(Debug, Clone, PartialEq)]
pub struct LoyaltyAccount {
    pub current_points: u64,
    pub total_earned: u64,
    pub standing: TierStanding,
    pub transactions: Vec<Transaction>,
}

impl LoyaltyAccount {
    pub fn new(
        current_points: u64,
        total_earned: u64,
        transactions: Vec<Transaction>,
        tiers: &TierTable,
    ) -> Result<Self, LedgerError> {
        if current_points > total_earned {
            return Err(LedgerError::BalanceExceedsEarned {
                current: current_points,
                total: total_earned,
            });
        }
        validate_ledger(&transactions)?;

        Ok(Self {
            current_points,
            total_earned,
            standing: tiers.standing(current_points),
            transactions,
        })
    }
}

fn sample_date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap_or_default()
}

/// Recent activity shown until a live ledger is wired in
pub fn sample_transactions() -> Vec<Transaction> {
    use TransactionKind::{Earned, Redeemed};
    vec![
        Transaction::new(1, "Purchase Reward", 150, sample_date(15), Earned),
        Transaction::new(2, "Birthday Bonus", 200, sample_date(10), Earned),
        Transaction::new(3, "Redeemed Discount", -100, sample_date(8), Redeemed),
        Transaction::new(4, "Review Bonus", 50, sample_date(5), Earned),
        Transaction::new(5, "Referral Bonus", 300, sample_date(2), Earned),
    ]
}

/// Parse a JSON array of transaction records
pub fn parse_transactions(json: &str) -> Result<Vec<Transaction>> {
    let transactions: Vec<Transaction> =
        serde_json::from_str(json).context("Ledger is not a JSON array of transactions")?;
    validate_ledger(&transactions)?;
    Ok(transactions)
}

/// Load a ledger file
pub fn load_transactions(path: &Path) -> Result<Vec<Transaction>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read ledger {}", path.display()))?;
    parse_transactions(&contents).with_context(|| format!("Invalid ledger {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_ledger_is_consistent() {
        let txs = sample_transactions();
        assert_eq!(txs.len(), 5);
        assert!(validate_ledger(&txs).is_ok());
        assert_eq!(txs[0].points_label(), "+150");
        assert_eq!(txs[2].points_label(), "-100");
        assert_eq!(txs[0].date_label(), "1/15/2024");
        assert_eq!(txs[2].kind.label(), "Redeemed");
    }

    #[test]
    fn test_kind_must_match_sign() {
        let tx = Transaction::new(9, "Bad", -5, sample_date(1), TransactionKind::Earned);
        assert!(matches!(
            tx.validate(),
            Err(LedgerError::KindMismatch { id: 9, .. })
        ));

        let tx = Transaction::new(9, "Bad", 0, sample_date(1), TransactionKind::Redeemed);
        assert!(tx.validate().is_err());

        let tx = Transaction::new(9, "Zero", 0, sample_date(1), TransactionKind::Earned);
        assert!(tx.validate().is_ok());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut txs = sample_transactions();
        txs.push(txs[0].clone());
        assert_eq!(validate_ledger(&txs), Err(LedgerError::DuplicateId(1)));
    }

    #[test]
    fn test_account_rejects_balance_above_earned() {
        let err = LoyaltyAccount::new(10, 5, vec![], &TierTable::default()).unwrap_err();
        assert_eq!(
            err,
            LedgerError::BalanceExceedsEarned {
                current: 10,
                total: 5
            }
        );
    }

    #[test]
    fn test_account_derives_standing() {
        let account =
            LoyaltyAccount::new(2450, 5680, sample_transactions(), &TierTable::default()).unwrap();
        assert_eq!(account.standing.tier, "Gold");
        assert_eq!(account.standing.points_to_next_tier, 550);
        assert_eq!(account.transactions.len(), 5);
    }

    #[test]
    fn test_parse_ledger_json_keeps_order() {
        let json = r#"[
            {"id": 7, "description": "Welcome", "points": 500, "date": "2024-03-01", "type": "earned"},
            {"id": 3, "description": "Coupon", "points": -200, "date": "2024-02-01", "type": "redeemed"}
        ]"#;
        let txs = parse_transactions(json).unwrap();
        assert_eq!(txs[0].id, 7);
        assert_eq!(txs[1].kind, TransactionKind::Redeemed);
        assert_eq!(txs[1].date_label(), "2/1/2024");
    }

    #[test]
    fn test_parse_ledger_rejects_sign_mismatch() {
        let json = r#"[{"id": 1, "description": "x", "points": -1, "date": "2024-03-01", "type": "earned"}]"#;
        assert!(parse_transactions(json).is_err());
    }
}
