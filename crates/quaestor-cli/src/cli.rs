use clap::{Parser, Subcommand};

use crate::commands::{
    Contributions,
    Events,
    Finance,
    Import,
    Members,
    Projects,
    Tasks,
    Transactions,
};

#[derive(Parser, Debug)]
#[clap(name = "quaestor", version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[clap(long, default_value = "quaestor.sqlite3")]
    pub db: String,

    #[clap(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn init() -> Self {
        Self::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage members
    #[clap(subcommand)]
    Members(Members),
    /// Manage events
    #[clap(subcommand)]
    Events(Events),
    /// Manage projects
    #[clap(subcommand)]
    Projects(Projects),
    /// Manage tasks
    #[clap(subcommand)]
    Tasks(Tasks),
    /// Manage transactions
    #[clap(subcommand)]
    Transactions(Transactions),
    /// Manage contributions
    #[clap(subcommand)]
    Contributions(Contributions),
    /// Balances, reports and summaries
    #[clap(subcommand)]
    Finance(Finance),
    /// Import a JSON fixture bundle
    Import(Import),
}
