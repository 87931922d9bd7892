use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use inquire::Confirm;
use rust_decimal::Decimal;

use quaestor_data::{
    Contribution,
    ContributionFilter,
    Delete,
    Insert,
    Member,
    Query,
    Retrieve,
};
use quaestor_db::Connection;

use crate::commands::parse_target;
use crate::formatting::PrintFormatted;

#[derive(Subcommand, Debug)]
pub enum Contributions {
    /// List contributions
    #[clap(name = "list")]
    List(ListContributions),
    /// Add a contribution
    #[clap(name = "add")]
    Add(AddContribution),
    /// Delete a contribution
    #[clap(name = "delete")]
    Delete(DeleteContribution),
}

impl Contributions {
    pub async fn run(self, db: &Connection) -> Result<()> {
        match self {
            Contributions::List(cmd) => cmd.run(db).await,
            Contributions::Add(cmd) => cmd.run(db).await,
            Contributions::Delete(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct ListContributions {
    #[clap(short, long)]
    pub contributor: Option<u32>,
    #[clap(short, long)]
    pub after_date: Option<NaiveDate>,
    #[clap(short, long)]
    pub before_date: Option<NaiveDate>,
    #[clap(long, conflicts_with_all = ["project", "org"])]
    pub event: Option<u32>,
    #[clap(long, conflicts_with = "org")]
    pub project: Option<u32>,
    #[clap(long)]
    pub org: bool,
}

impl ListContributions {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let target = if self.event.is_some() || self.project.is_some() || self.org {
            Some(parse_target(self.event, self.project, self.org)?)
        } else {
            None
        };
        let filter = ContributionFilter {
            contributor_id: self.contributor,
            target,
            date_after: self.after_date,
            date_before: self.before_date,
            ..Default::default()
        };

        let contributions: Vec<Contribution> = db.query(&filter).await?;
        println!("{} contributions.", contributions.len());
        contributions.print_formatted();

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddContribution {
    #[clap(long)]
    pub date: Option<NaiveDate>,
    #[clap(short, long)]
    pub amount: Decimal,
    #[clap(short, long)]
    pub contributor: u32,
    #[clap(short, long)]
    pub description: Option<String>,
    #[clap(long, conflicts_with_all = ["project", "org"])]
    pub event: Option<u32>,
    #[clap(long, conflicts_with = "org")]
    pub project: Option<u32>,
    #[clap(long)]
    pub org: bool,
}

impl AddContribution {
    pub async fn run(self, db: &Connection) -> Result<()> {
        if self.amount < Decimal::ZERO {
            return Err(anyhow!("amount must not be negative"));
        }
        let target = parse_target(self.event, self.project, self.org)?;
        let date = self
            .date
            .unwrap_or_else(|| chrono::Local::now().date_naive());

        // The contributor has to exist
        let contributor: Member = db.retrieve(self.contributor).await?;

        let contribution = Contribution {
            date,
            amount: self.amount,
            contributor_id: contributor.id,
            target,
            description: self.description.unwrap_or_default(),
            ..Default::default()
        };

        let contribution = db.insert(contribution).await?;
        println!("Contribution added with id {}.", contribution.id);

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct DeleteContribution {
    #[clap(short, long)]
    pub id: u32,
}

impl DeleteContribution {
    pub async fn run(&self, db: &Connection) -> Result<()> {
        let contribution: Contribution = db.retrieve(self.id).await?;
        println!();
        vec![contribution.clone()].print_formatted();
        println!();
        let confirm =
            Confirm::new("Delete contribution from database?").with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }
        db.delete(contribution).await?;
        Ok(())
    }
}
