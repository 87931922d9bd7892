use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use quaestor_data::{Transaction, TransactionKind};

use crate::balance::validate_transactions;
use crate::{Error, Result};

/// Deposits, withdrawals and balances over a date window. Computed
/// on demand, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub initial_balance: Decimal,
    pub final_balance: Decimal,
    pub deposits: Vec<Transaction>,
    pub withdrawals: Vec<Transaction>,
    pub total_deposits: Decimal,
    pub total_withdrawals: Decimal,
}

/// Report over the window [start_date, end_date], both inclusive.
///
/// Transactions dated before the window only feed the initial
/// balance; transactions after it are excluded entirely. A window
/// with start_date > end_date is rejected.
pub fn generate_report(
    transactions: &[Transaction],
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<FinancialReport> {
    if start_date > end_date {
        return Err(Error::InvalidWindow(start_date, end_date));
    }
    validate_transactions(transactions)?;

    let initial_balance = transactions
        .iter()
        .filter(|tx| tx.date < start_date)
        .map(Transaction::signed_amount)
        .sum::<Decimal>();

    let period: Vec<&Transaction> = transactions
        .iter()
        .filter(|tx| tx.date >= start_date && tx.date <= end_date)
        .collect();

    let deposits: Vec<Transaction> = period
        .iter()
        .filter(|tx| tx.kind == TransactionKind::Deposit)
        .map(|tx| (*tx).clone())
        .collect();
    let withdrawals: Vec<Transaction> = period
        .iter()
        .filter(|tx| tx.kind == TransactionKind::Withdrawal)
        .map(|tx| (*tx).clone())
        .collect();

    let total_deposits = deposits.iter().map(|tx| tx.amount).sum::<Decimal>();
    let total_withdrawals = withdrawals.iter().map(|tx| tx.amount).sum::<Decimal>();
    let final_balance = initial_balance + total_deposits - total_withdrawals;

    Ok(FinancialReport {
        start_date,
        end_date,
        initial_balance,
        final_balance,
        deposits,
        withdrawals,
        total_deposits,
        total_withdrawals,
    })
}
