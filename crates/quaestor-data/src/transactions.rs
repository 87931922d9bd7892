use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::EntityRef;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    #[default]
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdrawal => "withdrawal",
        }
    }

    pub fn from_str(kind: &str) -> Option<Self> {
        match kind {
            "deposit" => Some(TransactionKind::Deposit),
            "withdrawal" => Some(TransactionKind::Withdrawal),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TransactionFilter {
    pub id: Option<u32>,
    pub kind: Option<TransactionKind>,
    pub created_by: Option<u32>,
    pub date_after: Option<NaiveDate>,
    pub date_before: Option<NaiveDate>,
    pub related_to: Option<EntityRef>,
}

/// A ledger entry. The amount is always non-negative, the kind
/// decides whether it adds to or subtracts from the balance.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u32,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub description: String,
    pub created_by: u32,
    pub related_to: Option<EntityRef>,
}

impl Transaction {
    /// Signed amount: deposits count positive, withdrawals negative.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Deposit => self.amount,
            TransactionKind::Withdrawal => -self.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_amount() {
        let tx = Transaction {
            amount: Decimal::new(2342, 2),
            kind: TransactionKind::Withdrawal,
            ..Default::default()
        };
        assert_eq!(tx.signed_amount(), Decimal::new(-2342, 2));
        assert_eq!(tx.signed_amount().abs(), tx.amount);
    }

    #[test]
    fn test_kind_roundtrip() {
        assert_eq!(
            TransactionKind::from_str("withdrawal"),
            Some(TransactionKind::Withdrawal)
        );
        assert_eq!(TransactionKind::from_str("transfer"), None);
        assert_eq!(TransactionKind::Deposit.as_str(), "deposit");
    }
}
