use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use inquire::Confirm;
use rust_decimal::Decimal;

use quaestor_data::{
    Delete,
    EntityRef,
    Insert,
    Member,
    Query,
    Retrieve,
    Transaction,
    TransactionFilter,
    TransactionKind,
    Update,
};
use quaestor_db::Connection;

use crate::formatting::PrintFormatted;

#[derive(Subcommand, Debug)]
pub enum Transactions {
    /// Show a transaction
    #[clap(name = "show")]
    Show(ShowTransaction),
    /// List transactions
    #[clap(name = "list")]
    List(ListTransactions),
    /// Add a transaction
    #[clap(name = "add")]
    Add(AddTransaction),
    /// Update a transaction
    #[clap(name = "set")]
    Update(UpdateTransaction),
    /// Delete a transaction
    #[clap(name = "delete")]
    Delete(DeleteTransaction),
}

impl Transactions {
    pub async fn run(self, db: &Connection) -> Result<()> {
        match self {
            Transactions::Show(cmd) => cmd.run(db).await,
            Transactions::List(cmd) => cmd.run(db).await,
            Transactions::Add(cmd) => cmd.run(db).await,
            Transactions::Update(cmd) => cmd.run(db).await,
            Transactions::Delete(cmd) => cmd.run(db).await,
        }
    }
}

fn parse_related(event: Option<u32>, project: Option<u32>) -> Result<Option<EntityRef>> {
    match (event, project) {
        (None, None) => Ok(None),
        (Some(id), None) => Ok(Some(EntityRef::Event(id))),
        (None, Some(id)) => Ok(Some(EntityRef::Project(id))),
        _ => Err(anyhow!("pass at most one of --event or --project")),
    }
}

#[derive(Args, Debug)]
pub struct ShowTransaction {
    #[clap(short, long)]
    pub id: u32,
}

impl ShowTransaction {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let tx: Transaction = db.retrieve(self.id).await?;
        let member: Member = db.retrieve(tx.created_by).await?;

        println!();
        println!("Date:\t\t{}", tx.date);
        println!("Kind:\t\t{}", tx.kind.as_str());
        println!("Amount:\t\t{}", tx.amount);
        println!("Created by:\t{}", member.name);
        println!("Description:\t{}", tx.description);
        println!();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ListTransactions {
    #[clap(short, long)]
    pub kind: Option<String>,
    #[clap(long)]
    pub created_by: Option<u32>,
    #[clap(short, long)]
    pub after_date: Option<NaiveDate>,
    #[clap(short, long)]
    pub before_date: Option<NaiveDate>,
    #[clap(long, conflicts_with = "project")]
    pub event: Option<u32>,
    #[clap(long)]
    pub project: Option<u32>,
}

impl ListTransactions {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let kind = match self.kind {
            Some(kind) => Some(
                TransactionKind::from_str(&kind)
                    .ok_or_else(|| anyhow!("unknown kind: {}", kind))?,
            ),
            None => None,
        };
        let filter = TransactionFilter {
            kind,
            created_by: self.created_by,
            date_after: self.after_date,
            date_before: self.before_date,
            related_to: parse_related(self.event, self.project)?,
            ..Default::default()
        };

        let transactions: Vec<Transaction> = db.query(&filter).await?;
        println!("{} transactions.", transactions.len());
        transactions.print_formatted();

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddTransaction {
    #[clap(long)]
    pub date: Option<NaiveDate>,
    #[clap(short, long)]
    pub amount: Decimal,
    #[clap(short, long)]
    pub kind: String,
    #[clap(short, long)]
    pub description: Option<String>,
    #[clap(long)]
    pub created_by: u32,
    #[clap(long, conflicts_with = "project")]
    pub event: Option<u32>,
    #[clap(long)]
    pub project: Option<u32>,
}

impl AddTransaction {
    pub async fn run(self, db: &Connection) -> Result<()> {
        if self.amount < Decimal::ZERO {
            return Err(anyhow!("amount must not be negative"));
        }
        let kind = TransactionKind::from_str(&self.kind)
            .ok_or_else(|| anyhow!("unknown kind: {}", self.kind))?;
        let date = self
            .date
            .unwrap_or_else(|| chrono::Local::now().date_naive());

        // The creating member has to exist
        let member: Member = db.retrieve(self.created_by).await?;

        let tx = Transaction {
            date,
            amount: self.amount,
            kind,
            description: self.description.unwrap_or_default(),
            created_by: member.id,
            related_to: parse_related(self.event, self.project)?,
            ..Default::default()
        };

        let tx = db.insert(tx).await?;
        println!("Transaction added with id {}.", tx.id);

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct UpdateTransaction {
    #[clap(short, long)]
    pub id: u32,
    #[clap(long)]
    pub date: Option<NaiveDate>,
    #[clap(short, long)]
    pub amount: Option<Decimal>,
    #[clap(short, long)]
    pub kind: Option<String>,
    #[clap(short, long)]
    pub description: Option<String>,
}

impl UpdateTransaction {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let tx: Transaction = db.retrieve(self.id).await?;
        let mut update = tx;

        if let Some(date) = self.date {
            update.date = date;
        }
        if let Some(amount) = self.amount {
            if amount < Decimal::ZERO {
                return Err(anyhow!("amount must not be negative"));
            }
            update.amount = amount;
        }
        if let Some(kind) = self.kind {
            update.kind = TransactionKind::from_str(&kind)
                .ok_or_else(|| anyhow!("unknown kind: {}", kind))?;
        }
        if let Some(description) = self.description {
            update.description = description;
        }

        db.update(update).await?;

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct DeleteTransaction {
    #[clap(short, long)]
    pub id: u32,
}

impl DeleteTransaction {
    pub async fn run(&self, db: &Connection) -> Result<()> {
        let tx: Transaction = db.retrieve(self.id).await?;
        println!();
        vec![tx.clone()].print_formatted();
        println!();
        let confirm =
            Confirm::new("Delete transaction from database?").with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }
        db.delete(tx).await?;
        Ok(())
    }
}
