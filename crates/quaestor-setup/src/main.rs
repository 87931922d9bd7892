use anyhow::Result;

use clap::{Parser, Subcommand};

use quaestor_db::{connection, schema};

#[derive(Parser, Debug)]
#[clap(name = "quaestor-setup")]
struct Cli {
    #[clap(default_value = "quaestor.sqlite3")]
    pub db: String,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Init,
}

/// Initialize the database
async fn db_init(filename: &str) -> Result<()> {
    let conn = connection::open(filename).await?;
    schema::install(&conn).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Init => db_init(&cli.db).await?,
    }
    Ok(())
}
