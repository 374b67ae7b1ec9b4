use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use inquire::Confirm;

use tiller_data::{
    list, ClassType, CurrentQuarter, Insert, Lesson, LessonFilter, LessonForm, LessonOrder, Page,
    Query, Retrieve, SortSpec, Update,
};
use tiller_db::Connection;

use crate::formatting::PrintFormatted;

#[derive(Subcommand, Debug)]
pub enum Lessons {
    /// List all lessons
    #[clap(name = "list")]
    List(ListLessons),
    /// Show the schedule for the current quarter
    #[clap(name = "schedule")]
    Schedule(ShowSchedule),
    /// Add a lesson
    #[clap(name = "add")]
    Add(AddLesson),
    /// Update a lesson
    #[clap(name = "set")]
    Update(UpdateLesson),
    /// List the available class types
    #[clap(name = "types")]
    Types(ListClassTypes),
}

impl Lessons {
    pub async fn run(self, db: &Connection) -> Result<()> {
        match self {
            Lessons::List(cmd) => cmd.run(db).await,
            Lessons::Schedule(cmd) => cmd.run(db).await,
            Lessons::Add(cmd) => cmd.run(db).await,
            Lessons::Update(cmd) => cmd.run(db).await,
            Lessons::Types(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct ListClassTypes {}

impl ListClassTypes {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let types: Vec<ClassType> = db.query(&()).await?;
        for class_type in types {
            println!(
                "{:>4}\t{}",
                class_type.id,
                class_type.text.unwrap_or_default()
            );
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ListLessons {
    /// Sort field: calendarDate
    #[clap(short, long)]
    pub sort: Option<String>,
    #[clap(short, long)]
    pub descending: bool,
    #[clap(long, default_value_t = 0)]
    pub page: u32,
    #[clap(long, default_value_t = 50)]
    pub page_size: u32,
}

impl ListLessons {
    /// Run the command and list lessons
    pub async fn run(self, db: &Connection) -> Result<()> {
        let sort = self.sort.map(|field| SortSpec {
            field,
            descending: self.descending,
        });
        let filter = LessonFilter {
            expire_at_least: None,
            order: LessonOrder::resolve(sort.as_ref()),
            page: Some(Page::new(self.page, self.page_size)),
        };

        let listing = list::<Lesson, _, _>(db, &filter).await?;
        println!(
            "Page {} of {} ({} lessons).",
            self.page + 1,
            listing.page_count(self.page_size),
            listing.total_count
        );
        listing.rows.print_formatted();

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ShowSchedule {}

impl ShowSchedule {
    /// Run the command and show the current quarter's schedule
    pub async fn run(self, db: &Connection) -> Result<()> {
        let current: CurrentQuarter = db.retrieve(()).await?;
        let lessons = Lesson::schedule(db).await?;

        println!("Schedule for quarter {}:", current.quarter);
        lessons.print_formatted();

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddLesson {
    #[clap(short = 't', long)]
    pub class_type: Option<u32>,
    /// Lesson title
    #[clap(long)]
    pub title: Option<String>,
    #[clap(long)]
    pub day: Option<String>,
    #[clap(long)]
    pub time: Option<String>,
    /// Display text for the session dates
    #[clap(long)]
    pub dates: Option<String>,
    #[clap(long)]
    pub calendar_date: Option<NaiveDate>,
    #[clap(long)]
    pub instructor1: Option<u32>,
    #[clap(long)]
    pub instructor2: Option<u32>,
    #[clap(long)]
    pub description: Option<String>,
    #[clap(short, long)]
    pub size: Option<u32>,
    /// Quarter marker after which the lesson leaves the schedule
    #[clap(short, long)]
    pub expire: Option<u32>,
    #[clap(long)]
    pub display: bool,
}

impl AddLesson {
    /// Run the command and add a lesson
    pub async fn run(self, db: &Connection) -> Result<()> {
        let form = LessonForm {
            id: None,
            class_type: self.class_type,
            subtype: self.title,
            day: self.day,
            time: self.time,
            dates: self.dates,
            calendar_date: self.calendar_date,
            instructor1: self.instructor1,
            instructor2: self.instructor2,
            description: self.description,
            size: self.size,
            expire: self.expire,
            display: self.display,
        };
        // Validation happens before anything touches the database
        let lesson = form.validate()?;

        println!();
        lesson.print_formatted();
        println!();

        let confirm = Confirm::new("Add lesson?").with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }

        let lesson = db.insert(lesson).await?;
        println!("Lesson added with id {}.", lesson.id);

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct UpdateLesson {
    #[clap(short, long)]
    pub id: u32,
    #[clap(short = 't', long)]
    pub class_type: Option<u32>,
    #[clap(long)]
    pub title: Option<String>,
    #[clap(long)]
    pub day: Option<String>,
    #[clap(long)]
    pub time: Option<String>,
    #[clap(long)]
    pub dates: Option<String>,
    #[clap(long)]
    pub calendar_date: Option<NaiveDate>,
    #[clap(long)]
    pub instructor1: Option<u32>,
    #[clap(long)]
    pub instructor2: Option<u32>,
    #[clap(long)]
    pub description: Option<String>,
    #[clap(short, long)]
    pub size: Option<u32>,
    #[clap(short, long)]
    pub expire: Option<u32>,
}

impl UpdateLesson {
    /// Run command and update a lesson
    pub async fn run(self, db: &Connection) -> Result<()> {
        let lesson: Lesson = db.retrieve(self.id).await?;
        let form = LessonForm {
            id: Some(lesson.id),
            class_type: self.class_type.or(lesson.class_type),
            subtype: self.title.or(lesson.subtype),
            day: self.day.or(lesson.day),
            time: self.time.or(lesson.time),
            dates: self.dates.or(lesson.dates),
            calendar_date: self.calendar_date.or(Some(lesson.calendar_date)),
            instructor1: self.instructor1.or(lesson.instructor1),
            instructor2: self.instructor2.or(lesson.instructor2),
            description: self.description.or(Some(lesson.description)),
            size: self.size.or(lesson.size),
            expire: self.expire.or(lesson.expire),
            display: lesson.display,
        };
        let update = form.validate()?;

        println!();
        update.print_formatted();
        println!();

        let confirm = Confirm::new("Update lesson?").with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }

        db.update(update).await?;
        Ok(())
    }
}
