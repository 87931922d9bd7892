use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Args;
use serde::Deserialize;

use quaestor_data::{
    Contribution,
    ContributionFilter,
    Event,
    Insert,
    Member,
    MemberFilter,
    Project,
    Query,
    Task,
    Transaction,
    TransactionFilter,
};
use quaestor_db::Connection;
use quaestor_finance::{validate_contributions, validate_transactions};

/// A fixture bundle as exported by the old front-end: one JSON
/// document with an array per record type.
#[derive(Debug, Default, Deserialize)]
struct Fixtures {
    #[serde(default)]
    members: Vec<Member>,
    #[serde(default)]
    events: Vec<Event>,
    #[serde(default)]
    projects: Vec<Project>,
    #[serde(default)]
    tasks: Vec<Task>,
    #[serde(default)]
    transactions: Vec<Transaction>,
    #[serde(default)]
    contributions: Vec<Contribution>,
}

#[derive(Args, Debug)]
pub struct Import {
    /// Path to the fixture bundle
    #[clap(short, long)]
    pub file: PathBuf,
}

impl Import {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let data = fs::read_to_string(&self.file)?;
        let fixtures: Fixtures = serde_json::from_str(&data)?;

        // Records reference each other by fixture id, so the store
        // has to hand out the same ids. That only works on an empty
        // database with ids counting up from 1.
        let members: Vec<Member> = db.query(&MemberFilter::default()).await?;
        if !members.is_empty() {
            return Err(anyhow!("import requires an empty database"));
        }

        validate_transactions(&fixtures.transactions)?;
        validate_contributions(&fixtures.contributions)?;

        for member in fixtures.members {
            let expected = member.id;
            let member = db.insert(member).await?;
            check_id("member", expected, member.id)?;
        }
        for event in fixtures.events {
            let expected = event.id;
            let event = db.insert(event).await?;
            check_id("event", expected, event.id)?;
        }
        for project in fixtures.projects {
            let expected = project.id;
            let project = db.insert(project).await?;
            check_id("project", expected, project.id)?;
        }
        for task in fixtures.tasks {
            let expected = task.id;
            let task = db.insert(task).await?;
            check_id("task", expected, task.id)?;
        }
        for tx in fixtures.transactions {
            let expected = tx.id;
            let tx = db.insert(tx).await?;
            check_id("transaction", expected, tx.id)?;
        }
        for contribution in fixtures.contributions {
            let expected = contribution.id;
            let contribution = db.insert(contribution).await?;
            check_id("contribution", expected, contribution.id)?;
        }

        let transactions: Vec<Transaction> =
            db.query(&TransactionFilter::default()).await?;
        let contributions: Vec<Contribution> =
            db.query(&ContributionFilter::default()).await?;
        println!(
            "Imported {} transactions and {} contributions.",
            transactions.len(),
            contributions.len()
        );

        Ok(())
    }
}

fn check_id(what: &str, expected: u32, got: u32) -> Result<()> {
    if expected != got {
        return Err(anyhow!(
            "{} id {} was stored as {}; fixture ids have to count up from 1",
            what,
            expected,
            got
        ));
    }
    Ok(())
}
