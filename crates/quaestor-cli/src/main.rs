use anyhow::Result;

use quaestor_cli::cli::{Cli, Command};
use quaestor_db::connection;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::init();

    let conn = connection::open(&cli.db).await?;
    match cli.command {
        Command::Members(cmd) => cmd.run(&conn).await,
        Command::Events(cmd) => cmd.run(&conn).await,
        Command::Projects(cmd) => cmd.run(&conn).await,
        Command::Tasks(cmd) => cmd.run(&conn).await,
        Command::Transactions(cmd) => cmd.run(&conn).await,
        Command::Contributions(cmd) => cmd.run(&conn).await,
        Command::Finance(cmd) => cmd.run(&conn).await,
        Command::Import(cmd) => cmd.run(&conn).await,
    }?;

    Ok(())
}
