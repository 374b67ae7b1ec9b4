use anyhow::Result;

use tiller_cli::cli::{Cli, Command};
use tiller_db::Connection;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::init();

    let conn = Connection::open(&cli.members_db).await?;
    match cli.command {
        Command::Members(cmd) => cmd.run(&conn).await,
        Command::Lessons(cmd) => cmd.run(&conn).await,
        Command::Quarter(cmd) => cmd.run(&conn).await,
        Command::Login(cmd) => cmd.run(&conn).await,
    }?;

    Ok(())
}
