use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use quaestor_data::{Contribution, ContributionTarget, Transaction, TransactionKind};

use crate::balance::{
    contributions_by_target,
    transactions_by_related_entity,
    validate_contributions,
    validate_transactions,
};
use crate::Result;

/// Income, expenses and balance scoped to one target.
///
/// Income counts contributions only. Deposit-kind transactions
/// related to the target stay visible in the transaction list but
/// never enter the income total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityFinancialSummary {
    pub target: ContributionTarget,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    pub transactions: Vec<Transaction>,
    pub contributions: Vec<Contribution>,
}

pub fn entity_financial_summary(
    transactions: &[Transaction],
    contributions: &[Contribution],
    target: ContributionTarget,
) -> Result<EntityFinancialSummary> {
    validate_transactions(transactions)?;
    validate_contributions(contributions)?;

    // Transactions never target the organization itself, so the
    // catch-all summary carries an empty transaction list.
    let transactions = match target.as_entity_ref() {
        Some(entity) => transactions_by_related_entity(transactions, entity),
        None => vec![],
    };
    let contributions = contributions_by_target(contributions, target);

    let total_expenses = transactions
        .iter()
        .filter(|tx| tx.kind == TransactionKind::Withdrawal)
        .map(|tx| tx.amount)
        .sum::<Decimal>();
    let total_income = contributions
        .iter()
        .map(|contribution| contribution.amount)
        .sum::<Decimal>();

    Ok(EntityFinancialSummary {
        target,
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
        transactions,
        contributions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use rust_decimal_macros::dec;

    use quaestor_data::EntityRef;

    #[test]
    fn test_entity_summary() {
        let contributions = vec![Contribution {
            id: 1,
            contributor_id: 5,
            amount: dec!(50),
            target: ContributionTarget::Project(2),
            ..Default::default()
        }];
        let transactions = vec![Transaction {
            id: 1,
            amount: dec!(20),
            kind: TransactionKind::Withdrawal,
            related_to: Some(EntityRef::Project(2)),
            ..Default::default()
        }];

        let summary = entity_financial_summary(
            &transactions,
            &contributions,
            ContributionTarget::Project(2),
        )
        .unwrap();

        assert_eq!(summary.total_income, dec!(50));
        assert_eq!(summary.total_expenses, dec!(20));
        assert_eq!(summary.balance, dec!(30));
        assert_eq!(summary.transactions.len(), 1);
        assert_eq!(summary.contributions.len(), 1);
    }

    #[test]
    fn test_deposits_are_not_income() {
        let transactions = vec![
            Transaction {
                id: 1,
                amount: dec!(100),
                kind: TransactionKind::Deposit,
                related_to: Some(EntityRef::Event(3)),
                ..Default::default()
            },
            Transaction {
                id: 2,
                amount: dec!(30),
                kind: TransactionKind::Withdrawal,
                related_to: Some(EntityRef::Event(3)),
                ..Default::default()
            },
        ];

        let summary = entity_financial_summary(
            &transactions,
            &[],
            ContributionTarget::Event(3),
        )
        .unwrap();

        // The deposit shows up in the listing but not in income.
        assert_eq!(summary.transactions.len(), 2);
        assert_eq!(summary.total_income, Decimal::ZERO);
        assert_eq!(summary.total_expenses, dec!(30));
        assert_eq!(summary.balance, dec!(-30));
    }

    #[test]
    fn test_unrelated_records_yield_zero_balance() {
        let contributions = vec![Contribution {
            id: 1,
            amount: dec!(50),
            target: ContributionTarget::Organization,
            ..Default::default()
        }];
        let transactions = vec![Transaction {
            id: 1,
            amount: dec!(20),
            kind: TransactionKind::Withdrawal,
            related_to: Some(EntityRef::Project(7)),
            ..Default::default()
        }];

        let summary = entity_financial_summary(
            &transactions,
            &contributions,
            ContributionTarget::Event(1),
        )
        .unwrap();
        assert_eq!(summary.balance, Decimal::ZERO);
        assert!(summary.transactions.is_empty());
        assert!(summary.contributions.is_empty());
    }

    #[test]
    fn test_organization_summary_has_no_transactions() {
        let contributions = vec![
            Contribution {
                id: 1,
                amount: dec!(15),
                target: ContributionTarget::Organization,
                ..Default::default()
            },
            Contribution {
                id: 2,
                amount: dec!(5),
                target: ContributionTarget::Project(1),
                ..Default::default()
            },
        ];
        let transactions = vec![Transaction {
            id: 1,
            amount: dec!(100),
            kind: TransactionKind::Withdrawal,
            related_to: Some(EntityRef::Project(1)),
            ..Default::default()
        }];

        let summary = entity_financial_summary(
            &transactions,
            &contributions,
            ContributionTarget::Organization,
        )
        .unwrap();
        assert!(summary.transactions.is_empty());
        assert_eq!(summary.total_income, dec!(15));
        assert_eq!(summary.balance, dec!(15));
    }
}
