use rust_decimal::Decimal;

use quaestor_data::{
    Contribution,
    ContributionTarget,
    EntityRef,
    Transaction,
    TransactionKind,
};

use crate::{Error, Result};

/// Reject transactions with a negative amount. Negative values must
/// never be coerced into the fold: a withdrawal already carries its
/// sign through its kind.
pub fn validate_transactions(transactions: &[Transaction]) -> Result<()> {
    for tx in transactions {
        if tx.amount < Decimal::ZERO {
            return Err(Error::NegativeTransactionAmount(tx.id));
        }
    }
    Ok(())
}

/// Reject contributions with a negative amount.
pub fn validate_contributions(contributions: &[Contribution]) -> Result<()> {
    for contribution in contributions {
        if contribution.amount < Decimal::ZERO {
            return Err(Error::NegativeContributionAmount(contribution.id));
        }
    }
    Ok(())
}

/// Balance over the full transaction set: deposits add, withdrawals
/// subtract. An empty set has balance zero.
pub fn current_balance(transactions: &[Transaction]) -> Result<Decimal> {
    validate_transactions(transactions)?;
    Ok(transactions.iter().map(Transaction::signed_amount).sum())
}

/// Sum of amounts over all transactions of one kind.
pub fn total_by_kind(
    transactions: &[Transaction],
    kind: TransactionKind,
) -> Result<Decimal> {
    validate_transactions(transactions)?;
    let total = transactions
        .iter()
        .filter(|tx| tx.kind == kind)
        .map(|tx| tx.amount)
        .sum();
    Ok(total)
}

/// Transactions related to an event or project, in their original
/// relative order.
pub fn transactions_by_related_entity(
    transactions: &[Transaction],
    entity: EntityRef,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|tx| tx.related_to == Some(entity))
        .cloned()
        .collect()
}

/// Contributions towards a target, in their original relative order.
pub fn contributions_by_target(
    contributions: &[Contribution],
    target: ContributionTarget,
) -> Vec<Contribution> {
    contributions
        .iter()
        .filter(|contribution| contribution.target == target)
        .cloned()
        .collect()
}

/// Contributions paid by a single member.
pub fn contributions_by_contributor(
    contributions: &[Contribution],
    contributor_id: u32,
) -> Vec<Contribution> {
    contributions
        .iter()
        .filter(|contribution| contribution.contributor_id == contributor_id)
        .cloned()
        .collect()
}

/// Total contributed towards a target.
pub fn total_contributions_for_target(
    contributions: &[Contribution],
    target: ContributionTarget,
) -> Result<Decimal> {
    validate_contributions(contributions)?;
    let total = contributions
        .iter()
        .filter(|contribution| contribution.target == target)
        .map(|contribution| contribution.amount)
        .sum();
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn tx(id: u32, day: u32, amount: Decimal, kind: TransactionKind) -> Transaction {
        Transaction {
            id,
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            amount,
            kind,
            ..Default::default()
        }
    }

    #[test]
    fn test_current_balance() {
        let transactions = vec![
            tx(1, 10, dec!(100), TransactionKind::Deposit),
            tx(2, 20, dec!(40), TransactionKind::Withdrawal),
        ];
        assert_eq!(current_balance(&transactions).unwrap(), dec!(60));
    }

    #[test]
    fn test_current_balance_empty() {
        assert_eq!(current_balance(&[]).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_balance_matches_kind_totals() {
        let transactions = vec![
            tx(1, 3, dec!(120.50), TransactionKind::Deposit),
            tx(2, 5, dec!(30.25), TransactionKind::Withdrawal),
            tx(3, 9, dec!(19.75), TransactionKind::Deposit),
            tx(4, 12, dec!(0.10), TransactionKind::Withdrawal),
        ];
        let deposits = total_by_kind(&transactions, TransactionKind::Deposit).unwrap();
        let withdrawals =
            total_by_kind(&transactions, TransactionKind::Withdrawal).unwrap();
        assert_eq!(deposits, dec!(140.25));
        assert_eq!(withdrawals, dec!(30.35));
        assert_eq!(
            current_balance(&transactions).unwrap(),
            deposits - withdrawals
        );
    }

    #[test]
    fn test_negative_amount_rejected() {
        let transactions = vec![tx(7, 10, dec!(-1), TransactionKind::Deposit)];
        assert_eq!(
            current_balance(&transactions),
            Err(Error::NegativeTransactionAmount(7))
        );
        assert_eq!(
            total_by_kind(&transactions, TransactionKind::Withdrawal),
            Err(Error::NegativeTransactionAmount(7))
        );
    }

    #[test]
    fn test_filter_by_related_entity() {
        let transactions = vec![
            Transaction {
                id: 1,
                related_to: Some(EntityRef::Project(2)),
                ..Default::default()
            },
            Transaction {
                id: 2,
                related_to: None,
                ..Default::default()
            },
            Transaction {
                id: 3,
                related_to: Some(EntityRef::Event(2)),
                ..Default::default()
            },
            Transaction {
                id: 4,
                related_to: Some(EntityRef::Project(2)),
                ..Default::default()
            },
        ];

        let related =
            transactions_by_related_entity(&transactions, EntityRef::Project(2));
        let ids: Vec<u32> = related.iter().map(|tx| tx.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_contribution_filters_and_totals() {
        let contributions = vec![
            Contribution {
                id: 1,
                amount: dec!(50),
                contributor_id: 5,
                target: ContributionTarget::Project(2),
                ..Default::default()
            },
            Contribution {
                id: 2,
                amount: dec!(20),
                contributor_id: 5,
                target: ContributionTarget::Organization,
                ..Default::default()
            },
            Contribution {
                id: 3,
                amount: dec!(10),
                contributor_id: 6,
                target: ContributionTarget::Project(2),
                ..Default::default()
            },
        ];

        let by_target =
            contributions_by_target(&contributions, ContributionTarget::Project(2));
        assert_eq!(by_target.len(), 2);

        let by_contributor = contributions_by_contributor(&contributions, 5);
        let ids: Vec<u32> = by_contributor.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2]);

        assert_eq!(
            total_contributions_for_target(
                &contributions,
                ContributionTarget::Project(2)
            )
            .unwrap(),
            dec!(60)
        );
        assert_eq!(
            total_contributions_for_target(
                &contributions,
                ContributionTarget::Event(99)
            )
            .unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_idempotence() {
        let transactions = vec![
            tx(1, 10, dec!(100), TransactionKind::Deposit),
            tx(2, 20, dec!(40), TransactionKind::Withdrawal),
        ];
        assert_eq!(
            current_balance(&transactions).unwrap(),
            current_balance(&transactions).unwrap()
        );
    }
}
