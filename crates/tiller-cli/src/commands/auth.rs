use anyhow::Result;
use clap::Args;
use inquire::Password;

use tiller_auth::{self as auth, MemorySession};
use tiller_db::Connection;

#[derive(Args, Debug)]
pub struct Login {
    #[clap(short, long)]
    pub wyc_number: u32,
}

impl Login {
    /// Run the command and check credentials against the roster. The
    /// outcome message never tells an unknown number apart from a
    /// wrong password.
    pub async fn run(self, db: &Connection) -> Result<()> {
        let password = Password::new("Password:")
            .without_confirmation()
            .prompt()?;

        let session = MemorySession::new();
        let login = auth::login(db, &session, self.wyc_number, &password).await?;
        println!("{}", login.message);

        Ok(())
    }
}
