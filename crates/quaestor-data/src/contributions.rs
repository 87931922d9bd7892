use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ContributionTarget;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ContributionFilter {
    pub id: Option<u32>,
    pub contributor_id: Option<u32>,
    pub target: Option<ContributionTarget>,
    pub date_after: Option<NaiveDate>,
    pub date_before: Option<NaiveDate>,
}

/// A member payment towards an event, a project or the
/// organization at large.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub id: u32,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub contributor_id: u32,
    pub target: ContributionTarget,
    pub description: String,
}
