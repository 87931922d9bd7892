use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{
    Contribution,
    ContributionFilter,
    Query,
    Transaction,
    TransactionFilter,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Member => "member",
        }
    }

    pub fn from_str(role: &str) -> Option<Self> {
        match role {
            "admin" => Some(Role::Admin),
            "member" => Some(Role::Member),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MemberFilter {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct Member {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub joined_at: NaiveDate,
    pub notes: String,
}

impl Member {
    /// Get the transactions this member created.
    pub async fn get_transactions<DB>(&self, db: &DB) -> Result<Vec<Transaction>>
    where
        DB: Query<Transaction, Filter = TransactionFilter>,
    {
        let transactions = db
            .query(&TransactionFilter {
                created_by: Some(self.id),
                ..Default::default()
            })
            .await?;
        Ok(transactions)
    }

    /// Get the contributions this member paid.
    pub async fn get_contributions<DB>(&self, db: &DB) -> Result<Vec<Contribution>>
    where
        DB: Query<Contribution, Filter = ContributionFilter>,
    {
        let contributions = db
            .query(&ContributionFilter {
                contributor_id: Some(self.id),
                ..Default::default()
            })
            .await?;
        Ok(contributions)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
