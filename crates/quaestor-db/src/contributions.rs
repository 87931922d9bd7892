use std::str::FromStr;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, QueryBuilder, Sqlite};

use quaestor_data::{
    Contribution,
    ContributionFilter,
    ContributionTarget,
    Delete,
    Insert,
    Query,
    Retrieve,
    Update,
};

use crate::{
    results::{Id, QueryError},
    Connection,
};

/// Raw contribution row. The target kind is always set; the id
/// column is NULL for the organization catch-all.
#[derive(Debug, Clone, FromRow)]
struct ContributionRow {
    id: u32,
    date: NaiveDate,
    amount: String,
    contributor_id: u32,
    target_kind: String,
    target_id: Option<u32>,
    description: String,
}

impl TryFrom<ContributionRow> for Contribution {
    type Error = QueryError;

    fn try_from(row: ContributionRow) -> Result<Self, Self::Error> {
        let amount = Decimal::from_str(&row.amount)
            .map_err(|err| QueryError::Malformed(format!("amount: {}", err)))?;
        let target = ContributionTarget::from_parts(&row.target_kind, row.target_id)
            .ok_or_else(|| {
                QueryError::Malformed(format!("target kind: {}", row.target_kind))
            })?;
        Ok(Contribution {
            id: row.id,
            date: row.date,
            amount,
            contributor_id: row.contributor_id,
            target,
            description: row.description,
        })
    }
}

#[async_trait]
impl Query<Contribution> for Connection {
    type Filter = ContributionFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Contribution>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::new(
            r#"
            SELECT
                id,
                date,
                amount,
                contributor_id,
                target_kind,
                target_id,
                description
            FROM contributions
            WHERE 1
            "#,
        );

        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(contributor_id) = filter.contributor_id {
            qry.push(" AND contributor_id = ").push_bind(contributor_id);
        }
        if let Some(target) = filter.target {
            qry.push(" AND target_kind = ").push_bind(target.kind());
            match target.id() {
                Some(id) => {
                    qry.push(" AND target_id = ").push_bind(id);
                }
                None => {
                    qry.push(" AND target_id IS NULL ");
                }
            }
        }
        if let Some(date_after) = filter.date_after {
            qry.push(" AND date >= ").push_bind(date_after);
        }
        if let Some(date_before) = filter.date_before {
            qry.push(" AND date <= ").push_bind(date_before);
        }

        let rows: Vec<ContributionRow> =
            qry.build_query_as().fetch_all(&mut *conn).await?;
        let contributions = rows
            .into_iter()
            .map(Contribution::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(contributions)
    }
}

#[async_trait]
impl Retrieve<Contribution> for Connection {
    type Key = u32;
    async fn retrieve(&self, contribution_id: Self::Key) -> Result<Contribution> {
        let filter = ContributionFilter {
            id: Some(contribution_id),
            ..Default::default()
        };
        let contribution = self
            .query(&filter)
            .await?
            .pop()
            .ok_or(QueryError::NotFound)?;
        Ok(contribution)
    }
}

#[async_trait]
impl Insert<Contribution> for Connection {
    async fn insert(&self, contribution: Contribution) -> Result<Contribution> {
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO contributions (
                    date,
                    amount,
                    contributor_id,
                    target_kind,
                    target_id,
                    description
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(contribution.date)
                .push_bind(contribution.amount.to_string())
                .push_bind(contribution.contributor_id)
                .push_bind(contribution.target.kind())
                .push_bind(contribution.target.id())
                .push_bind(&contribution.description);

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        self.retrieve(insert.id).await
    }
}

#[async_trait]
impl Update<Contribution> for Connection {
    async fn update(&self, contribution: Contribution) -> Result<Contribution> {
        {
            let mut conn = self.lock().await;
            QueryBuilder::<Sqlite>::new("UPDATE contributions SET")
                .push(" date = ")
                .push_bind(contribution.date)
                .push(", amount = ")
                .push_bind(contribution.amount.to_string())
                .push(", contributor_id = ")
                .push_bind(contribution.contributor_id)
                .push(", target_kind = ")
                .push_bind(contribution.target.kind())
                .push(", target_id = ")
                .push_bind(contribution.target.id())
                .push(", description = ")
                .push_bind(&contribution.description)
                .push(" WHERE id = ")
                .push_bind(contribution.id)
                .build()
                .execute(&mut *conn)
                .await?;
        }
        self.retrieve(contribution.id).await
    }
}

#[async_trait]
impl Delete<Contribution> for Connection {
    async fn delete(&self, contribution: Contribution) -> Result<()> {
        let mut conn = self.lock().await;
        QueryBuilder::<Sqlite>::new("DELETE FROM contributions WHERE id = ")
            .push_bind(contribution.id)
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
    async fn test_contribution_roundtrip() {
        let (_handle, conn) = connection::open_test().await;

        let member = conn
            .insert(Member {
                name: "Ada".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let contribution = conn
            .insert(Contribution {
                date: NaiveDate::from_ymd_opt(2024, 2, 2).unwrap(),
                amount: dec!(25),
                contributor_id: member.id,
                target: ContributionTarget::Project(2),
                description: "travel fund".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(contribution.id > 0);
        assert_eq!(contribution.target, ContributionTarget::Project(2));
        assert_eq!(contribution.amount, dec!(25));
    }

    #[tokio::test]
    async fn test_contribution_organization_target() {
        let (_handle, conn) = connection::open_test().await;

        let member = conn
            .insert(Member::default())
            .await
            .unwrap();

        conn.insert(Contribution {
            date: NaiveDate::from_ymd_opt(2024, 2, 2).unwrap(),
            amount: dec!(10),
            contributor_id: member.id,
            target: ContributionTarget::Organization,
            ..Default::default()
        })
        .await
        .unwrap();
        conn.insert(Contribution {
            date: NaiveDate::from_ymd_opt(2024, 2, 3).unwrap(),
            amount: dec!(20),
            contributor_id: member.id,
            target: ContributionTarget::Event(1),
            ..Default::default()
        })
        .await
        .unwrap();

        let contributions: Vec<Contribution> = conn
            .query(&ContributionFilter {
                target: Some(ContributionTarget::Organization),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(contributions.len(), 1);
        assert_eq!(contributions[0].target, ContributionTarget::Organization);
    }

    #[tokio::test]
    async fn test_contribution_query_by_contributor() {
        let (_handle, conn) = connection::open_test().await;

        let ada = conn.insert(Member::default()).await.unwrap();
        let grace = conn.insert(Member::default()).await.unwrap();

        for (contributor_id, amount) in [(ada.id, dec!(5)), (grace.id, dec!(7))] {
            conn.insert(Contribution {
                date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                amount,
                contributor_id,
                target: ContributionTarget::Organization,
                ..Default::default()
            })
            .await
            .unwrap();
        }

        let contributions: Vec<Contribution> = conn
            .query(&ContributionFilter {
                contributor_id: Some(grace.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(contributions.len(), 1);
        assert_eq!(contributions[0].amount, dec!(7));
    }
}
