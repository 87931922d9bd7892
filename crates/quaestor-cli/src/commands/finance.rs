use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};

use quaestor_data::{
    Contribution,
    ContributionFilter,
    Query,
    Transaction,
    TransactionFilter,
};
use quaestor_db::Connection;
use quaestor_finance::{
    current_balance,
    entity_financial_summary,
    generate_report,
    transaction_history,
};

use crate::commands::parse_target;
use crate::formatting::PrintFormatted;

#[derive(Subcommand, Debug)]
pub enum Finance {
    /// Current balance over all transactions
    #[clap(name = "balance")]
    Balance(ShowBalance),
    /// Financial report over a date window
    #[clap(name = "report")]
    Report(ShowReport),
    /// Income and expenses for an event, project or the organization
    #[clap(name = "summary")]
    Summary(ShowSummary),
    /// Running balance history
    #[clap(name = "history")]
    History(ShowHistory),
}

impl Finance {
    pub async fn run(self, db: &Connection) -> Result<()> {
        match self {
            Finance::Balance(cmd) => cmd.run(db).await,
            Finance::Report(cmd) => cmd.run(db).await,
            Finance::Summary(cmd) => cmd.run(db).await,
            Finance::History(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct ShowBalance {}

impl ShowBalance {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let transactions: Vec<Transaction> =
            db.query(&TransactionFilter::default()).await?;
        let balance = current_balance(&transactions)?;
        println!("Current balance: {}", balance);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ShowReport {
    #[clap(short, long)]
    pub start: NaiveDate,
    #[clap(short, long)]
    pub end: NaiveDate,
}

impl ShowReport {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let transactions: Vec<Transaction> =
            db.query(&TransactionFilter::default()).await?;
        let report = generate_report(&transactions, self.start, self.end)?;
        println!();
        report.print_formatted();
        println!();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ShowSummary {
    #[clap(long, conflicts_with_all = ["project", "org"])]
    pub event: Option<u32>,
    #[clap(long, conflicts_with = "org")]
    pub project: Option<u32>,
    #[clap(long)]
    pub org: bool,
}

impl ShowSummary {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let target = parse_target(self.event, self.project, self.org)?;

        let transactions: Vec<Transaction> =
            db.query(&TransactionFilter::default()).await?;
        let contributions: Vec<Contribution> =
            db.query(&ContributionFilter::default()).await?;

        let summary =
            entity_financial_summary(&transactions, &contributions, target)?;
        println!();
        summary.print_formatted();
        println!();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ShowHistory {}

impl ShowHistory {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let transactions: Vec<Transaction> =
            db.query(&TransactionFilter::default()).await?;
        let history = transaction_history(&transactions)?;
        history.print_formatted();
        Ok(())
    }
}
