use anyhow::Result;
use clap::{Args, Subcommand};

use tiller_data::{CurrentQuarter, Query, Retrieve, Update};
use tiller_db::Connection;

#[derive(Subcommand, Debug)]
pub enum Quarter {
    /// Show the current quarter pointer
    #[clap(name = "show")]
    Show(ShowQuarter),
    /// Set the current quarter pointer
    #[clap(name = "set")]
    Set(SetQuarter),
    /// List known quarters, most recent first
    #[clap(name = "list")]
    List(ListQuarters),
}

impl Quarter {
    pub async fn run(self, db: &Connection) -> Result<()> {
        match self {
            Quarter::Show(cmd) => cmd.run(db).await,
            Quarter::Set(cmd) => cmd.run(db).await,
            Quarter::List(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct ListQuarters {}

impl ListQuarters {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let quarters: Vec<tiller_data::Quarter> = db.query(&()).await?;
        for quarter in quarters {
            let end_date = quarter
                .end_date
                .map(|date| date.to_string())
                .unwrap_or_default();
            println!(
                "{:>4}\t{:<20}\t{}",
                quarter.id,
                quarter.school.unwrap_or_default(),
                end_date
            );
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ShowQuarter {}

impl ShowQuarter {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let current: CurrentQuarter = db.retrieve(()).await?;
        println!("Current quarter: {}", current.quarter);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct SetQuarter {
    pub quarter: u32,
}

impl SetQuarter {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let current = db
            .update(CurrentQuarter {
                quarter: self.quarter,
            })
            .await?;
        println!("Current quarter set to {}.", current.quarter);
        Ok(())
    }
}
