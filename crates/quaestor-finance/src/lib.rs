//! Financial aggregation over transaction and contribution records.
//!
//! Every function in this crate is a pure transform over the record
//! snapshots it is given: no store access, no shared state. Callers
//! fetch the records, the functions fold them into balances, reports
//! and summaries.

mod error;
pub use error::{Error, Result};

mod balance;
pub use balance::*;

mod report;
pub use report::*;

mod summary;
pub use summary::*;

mod history;
pub use history::*;
