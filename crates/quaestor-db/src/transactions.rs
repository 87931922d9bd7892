use std::str::FromStr;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, QueryBuilder, Sqlite};

use quaestor_data::{
    Delete,
    EntityRef,
    Insert,
    Query,
    Retrieve,
    Transaction,
    TransactionFilter,
    TransactionKind,
    Update,
};

use crate::{
    results::{Id, QueryError},
    Connection,
};

/// Raw transaction row. Amounts are stored as text to keep them
/// exact; the related entity is a nullable column pair.
#[derive(Debug, Clone, FromRow)]
struct TransactionRow {
    id: u32,
    date: NaiveDate,
    amount: String,
    kind: String,
    description: String,
    created_by: u32,
    related_kind: Option<String>,
    related_id: Option<u32>,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = QueryError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        let amount = Decimal::from_str(&row.amount)
            .map_err(|err| QueryError::Malformed(format!("amount: {}", err)))?;
        let kind = TransactionKind::from_str(&row.kind)
            .ok_or_else(|| QueryError::Malformed(format!("kind: {}", row.kind)))?;
        let related_to = match (row.related_kind, row.related_id) {
            (Some(kind), Some(id)) => {
                Some(EntityRef::from_parts(&kind, id).ok_or_else(|| {
                    QueryError::Malformed(format!("related kind: {}", kind))
                })?)
            }
            _ => None,
        };
        Ok(Transaction {
            id: row.id,
            date: row.date,
            amount,
            kind,
            description: row.description,
            created_by: row.created_by,
            related_to,
        })
    }
}

#[async_trait]
impl Query<Transaction> for Connection {
    type Filter = TransactionFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Transaction>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::new(
            r#"
            SELECT
                id,
                date,
                amount,
                kind,
                description,
                created_by,
                related_kind,
                related_id
            FROM transactions
            WHERE 1
            "#,
        );

        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(kind) = filter.kind {
            qry.push(" AND kind = ").push_bind(kind.as_str());
        }
        if let Some(created_by) = filter.created_by {
            qry.push(" AND created_by = ").push_bind(created_by);
        }
        if let Some(date_after) = filter.date_after {
            qry.push(" AND date >= ").push_bind(date_after);
        }
        if let Some(date_before) = filter.date_before {
            qry.push(" AND date <= ").push_bind(date_before);
        }
        if let Some(related_to) = filter.related_to {
            qry.push(" AND related_kind = ").push_bind(related_to.kind());
            qry.push(" AND related_id = ").push_bind(related_to.id());
        }

        let rows: Vec<TransactionRow> =
            qry.build_query_as().fetch_all(&mut *conn).await?;
        let transactions = rows
            .into_iter()
            .map(Transaction::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(transactions)
    }
}

#[async_trait]
impl Retrieve<Transaction> for Connection {
    type Key = u32;
    async fn retrieve(&self, transaction_id: Self::Key) -> Result<Transaction> {
        let filter = TransactionFilter {
            id: Some(transaction_id),
            ..Default::default()
        };
        let transaction = self
            .query(&filter)
            .await?
            .pop()
            .ok_or(QueryError::NotFound)?;
        Ok(transaction)
    }
}

#[async_trait]
impl Insert<Transaction> for Connection {
    async fn insert(&self, transaction: Transaction) -> Result<Transaction> {
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO transactions (
                    date,
                    amount,
                    kind,
                    description,
                    created_by,
                    related_kind,
                    related_id
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(transaction.date)
                .push_bind(transaction.amount.to_string())
                .push_bind(transaction.kind.as_str())
                .push_bind(&transaction.description)
                .push_bind(transaction.created_by)
                .push_bind(transaction.related_to.map(|entity| entity.kind()))
                .push_bind(transaction.related_to.map(|entity| entity.id()));

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        self.retrieve(insert.id).await
    }
}

#[async_trait]
impl Update<Transaction> for Connection {
    async fn update(&self, transaction: Transaction) -> Result<Transaction> {
        {
            let mut conn = self.lock().await;
            QueryBuilder::<Sqlite>::new("UPDATE transactions SET")
                .push(" date = ")
                .push_bind(transaction.date)
                .push(", amount = ")
                .push_bind(transaction.amount.to_string())
                .push(", kind = ")
                .push_bind(transaction.kind.as_str())
                .push(", description = ")
                .push_bind(&transaction.description)
                .push(", created_by = ")
                .push_bind(transaction.created_by)
                .push(", related_kind = ")
                .push_bind(transaction.related_to.map(|entity| entity.kind()))
                .push(", related_id = ")
                .push_bind(transaction.related_to.map(|entity| entity.id()))
                .push(" WHERE id = ")
                .push_bind(transaction.id)
                .build()
                .execute(&mut *conn)
                .await?;
        }
        self.retrieve(transaction.id).await
    }
}

#[async_trait]
impl Delete<Transaction> for Connection {
    async fn delete(&self, transaction: Transaction) -> Result<()> {
        let mut conn = self.lock().await;
        QueryBuilder::<Sqlite>::new("DELETE FROM transactions WHERE id = ")
            .push_bind(transaction.id)
            .build()
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rust_decimal_macros::dec;

    use quaestor_data::Member;

    use crate::connection;

    #[tokio::test]
    async fn test_transaction_insert() {
        let (_handle, conn) = connection::open_test().await;

        let member = conn
            .insert(Member {
                name: "Ada".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let tx = conn
            .insert(Transaction {
                date,
                amount: dec!(100.50),
                kind: TransactionKind::Deposit,
                description: "sponsoring".to_string(),
                created_by: member.id,
                related_to: Some(EntityRef::Event(3)),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(tx.id > 0);
        assert_eq!(tx.date, date);
        assert_eq!(tx.amount, dec!(100.50));
        assert_eq!(tx.kind, TransactionKind::Deposit);
        assert_eq!(tx.related_to, Some(EntityRef::Event(3)));
    }

    #[tokio::test]
    async fn test_transaction_amount_exact() {
        // 0.1 + 0.2 style amounts survive the text column untouched.
        let (_handle, conn) = connection::open_test().await;

        let member = conn
            .insert(Member::default())
            .await
            .unwrap();

        for amount in [dec!(0.10), dec!(0.20)] {
            conn.insert(Transaction {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                amount,
                kind: TransactionKind::Deposit,
                created_by: member.id,
                ..Default::default()
            })
            .await
            .unwrap();
        }

        let transactions: Vec<Transaction> = conn
            .query(&TransactionFilter::default())
            .await
            .unwrap();
        let total: Decimal = transactions.iter().map(|tx| tx.amount).sum();
        assert_eq!(total, dec!(0.30));
    }

    #[tokio::test]
    async fn test_transaction_query_filters() {
        let (_handle, conn) = connection::open_test().await;

        let member = conn
            .insert(Member::default())
            .await
            .unwrap();

        let dates = [
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        ];
        for (i, date) in dates.iter().enumerate() {
            let kind = if i % 2 == 0 {
                TransactionKind::Deposit
            } else {
                TransactionKind::Withdrawal
            };
            conn.insert(Transaction {
                date: *date,
                amount: dec!(10),
                kind,
                created_by: member.id,
                related_to: Some(EntityRef::Project(1)),
                ..Default::default()
            })
            .await
            .unwrap();
        }

        let deposits: Vec<Transaction> = conn
            .query(&TransactionFilter {
                kind: Some(TransactionKind::Deposit),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(deposits.len(), 2);

        let in_window: Vec<Transaction> = conn
            .query(&TransactionFilter {
                date_after: Some(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()),
                date_before: Some(NaiveDate::from_ymd_opt(2024, 2, 28).unwrap()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(in_window.len(), 1);

        let related: Vec<Transaction> = conn
            .query(&TransactionFilter {
                related_to: Some(EntityRef::Project(1)),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(related.len(), 3);
    }
}
