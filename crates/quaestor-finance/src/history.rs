use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use quaestor_data::Transaction;

use crate::balance::validate_transactions;
use crate::Result;

/// One point of the running balance curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancePoint {
    pub date: NaiveDate,
    pub balance: Decimal,
}

/// Running balance per transaction, sorted ascending by date. The
/// sort is stable: same-day transactions keep their original
/// relative order.
pub fn transaction_history(transactions: &[Transaction]) -> Result<Vec<BalancePoint>> {
    validate_transactions(transactions)?;

    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by_key(|tx| tx.date);

    let mut balance = Decimal::ZERO;
    let history = sorted
        .into_iter()
        .map(|tx| {
            balance += tx.signed_amount();
            BalancePoint {
                date: tx.date,
                balance,
            }
        })
        .collect();
    Ok(history)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rust_decimal_macros::dec;

    use quaestor_data::TransactionKind;

    use crate::current_balance;

    fn tx(id: u32, day: u32, amount: Decimal, kind: TransactionKind) -> Transaction {
        Transaction {
            id,
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            amount,
            kind,
            ..Default::default()
        }
    }

    #[test]
    fn test_history_sorts_by_date() {
        let transactions = vec![
            tx(1, 20, dec!(40), TransactionKind::Withdrawal),
            tx(2, 10, dec!(100), TransactionKind::Deposit),
        ];

        let history = transaction_history(&transactions).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].date, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        assert_eq!(history[0].balance, dec!(100));
        assert_eq!(history[1].balance, dec!(60));
    }

    #[test]
    fn test_history_ends_at_current_balance() {
        let transactions = vec![
            tx(1, 5, dec!(12.34), TransactionKind::Deposit),
            tx(2, 2, dec!(3.21), TransactionKind::Deposit),
            tx(3, 9, dec!(7.55), TransactionKind::Withdrawal),
        ];
        let history = transaction_history(&transactions).unwrap();
        assert_eq!(
            history.last().unwrap().balance,
            current_balance(&transactions).unwrap()
        );
    }

    #[test]
    fn test_history_stable_on_same_day() {
        // Two entries on the same day keep their input order.
        let transactions = vec![
            tx(1, 15, dec!(10), TransactionKind::Withdrawal),
            tx(2, 15, dec!(50), TransactionKind::Deposit),
        ];
        let history = transaction_history(&transactions).unwrap();
        assert_eq!(history[0].balance, dec!(-10));
        assert_eq!(history[1].balance, dec!(40));
    }

    #[test]
    fn test_history_empty() {
        assert!(transaction_history(&[]).unwrap().is_empty());
    }
}
