use clap::{Parser, Subcommand};

use crate::commands::{Lessons, Login, Members, Quarter};

#[derive(Parser, Debug)]
#[clap(name = "tiller", version=env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[clap(long, default_value = "members.sqlite3")]
    pub members_db: String,

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
    /// Manage the member roster
    #[clap(subcommand, name = "members")]
    Members(Members),
    /// Manage lessons
    #[clap(subcommand, name = "lessons")]
    Lessons(Lessons),
    /// Show or move the schedule's quarter pointer
    #[clap(subcommand, name = "quarter")]
    Quarter(Quarter),
    /// Check member credentials
    #[clap(name = "login")]
    Login(Login),
}
