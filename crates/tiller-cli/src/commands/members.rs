use anyhow::Result;
use clap::{Args, Subcommand};
use inquire::Confirm;

use tiller_data::{
    list, password, Category, Insert, Member, MemberFilter, MemberOrder, Page, QtrMode, Query,
    Retrieve, SortSpec,
};
use tiller_db::Connection;

use crate::formatting::PrintFormatted;

#[derive(Subcommand, Debug)]
pub enum Members {
    /// Show a member
    #[clap(name = "show")]
    Show(ShowMember),
    /// List members
    #[clap(name = "list")]
    List(ListMembers),
    /// Add a member
    #[clap(name = "add")]
    Add(AddMember),
}

impl Members {
    pub async fn run(self, db: &Connection) -> Result<()> {
        match self {
            Members::Show(cmd) => cmd.run(db).await,
            Members::List(cmd) => cmd.run(db).await,
            Members::Add(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct ShowMember {
    #[clap(short, long)]
    pub wyc_number: u32,
}

impl ShowMember {
    /// Run the command and show a member
    pub async fn run(self, db: &Connection) -> Result<()> {
        let member: Member = db.retrieve(self.wyc_number).await?;
        println!();
        member.print_formatted();
        println!();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ListMembers {
    /// Exact WYC number
    #[clap(short, long)]
    pub id: Option<String>,
    /// Name search, e.g. "John Mc"
    #[clap(short, long)]
    pub name: Option<String>,
    #[clap(short, long)]
    pub category: Option<u32>,
    #[clap(short, long)]
    pub expire_qtr: Option<u32>,
    /// Match expiration quarters at or above the given one
    #[clap(long)]
    pub at_least: bool,
    /// Sort field: expireQtr or joinDate
    #[clap(short, long)]
    pub sort: Option<String>,
    #[clap(short, long)]
    pub descending: bool,
    #[clap(long, default_value_t = 0)]
    pub page: u32,
    #[clap(long, default_value_t = 50)]
    pub page_size: u32,
}

impl ListMembers {
    /// Run the command and list members
    pub async fn run(self, db: &Connection) -> Result<()> {
        let sort = self.sort.map(|field| SortSpec {
            field,
            descending: self.descending,
        });
        let filter = MemberFilter {
            wyc_id: self.id,
            name: self.name,
            category: self.category,
            expire_qtr: self.expire_qtr,
            expire_qtr_mode: if self.at_least {
                QtrMode::AtLeast
            } else {
                QtrMode::Exactly
            },
            order: MemberOrder::resolve(sort.as_ref()),
            page: Some(Page::new(self.page, self.page_size)),
        };

        let listing = list::<Member, _, _>(db, &filter).await?;
        let categories: Vec<Category> = db.query(&()).await?;

        println!(
            "Page {} of {} ({} members).",
            self.page + 1,
            listing.page_count(self.page_size),
            listing.total_count
        );
        (listing.rows, categories).print_formatted();

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddMember {
    /// WYC number; defaults to the most recent one plus one
    #[clap(short, long)]
    pub wyc_number: Option<u32>,
    #[clap(short, long)]
    pub first: String,
    #[clap(short, long)]
    pub last: String,
    #[clap(long)]
    pub street_address: Option<String>,
    #[clap(long)]
    pub city: Option<String>,
    #[clap(long)]
    pub state: Option<String>,
    #[clap(long)]
    pub zip_code: Option<String>,
    #[clap(long)]
    pub phone1: Option<String>,
    #[clap(long)]
    pub phone2: Option<String>,
    #[clap(short, long)]
    pub email: Option<String>,
    #[clap(short, long)]
    pub category: Option<u32>,
    #[clap(long, default_value_t = 0)]
    pub expire_qtr: u32,
    #[clap(long)]
    pub student_id: Option<u32>,
    /// Initial password; stored in the legacy hash format
    #[clap(short, long)]
    pub password: Option<String>,
}

impl AddMember {
    /// Run the command and add a member to the roster
    pub async fn run(self, db: &Connection) -> Result<()> {
        let wyc_number = match self.wyc_number {
            Some(wyc_number) => wyc_number,
            None => db.most_recent_wyc_number().await? + 1,
        };

        let member = Member {
            wyc_number,
            first: Some(self.first),
            last: Some(self.last),
            street_address: self.street_address,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
            phone1: self.phone1,
            phone2: self.phone2,
            email: self.email,
            category: self.category,
            expire_qtr: self.expire_qtr,
            student_id: self.student_id,
            password: self.password.as_deref().map(password::hash_password),
            out_to_sea: false,
            join_date: chrono::Local::now().naive_local(),
        };

        println!();
        member.print_formatted();
        println!();

        // Confirm adding member
        let confirm = Confirm::new("Add member?").with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }

        let member = db.insert(member).await?;
        println!("Member added with WYC number {}.", member.wyc_number);

        Ok(())
    }
}
