use chrono::NaiveDate;
use thiserror::Error as ThisError;

/// Aggregation errors. Records violating the amount invariant are
/// rejected up front instead of folding into wrong totals.
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("transaction {0} has a negative amount")]
    NegativeTransactionAmount(u32),

    #[error("contribution {0} has a negative amount")]
    NegativeContributionAmount(u32),

    #[error("report window starts {0} after it ends {1}")]
    InvalidWindow(NaiveDate, NaiveDate),
}

pub type Result<T> = std::result::Result<T, Error>;
