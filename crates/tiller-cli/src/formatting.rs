use tiller_data::{Category, Lesson, Member, UNKNOWN_CATEGORY};

pub trait PrintFormatted {
    fn print_formatted(&self);
}

fn category_text(categories: &[Category], category: Option<u32>) -> String {
    category
        .and_then(|id| categories.iter().find(|c| c.id == id))
        .and_then(|c| c.text.clone())
        .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string())
}

impl PrintFormatted for Member {
    fn print_formatted(&self) {
        let category = match self.category {
            Some(id) => id.to_string(),
            None => UNKNOWN_CATEGORY.to_string(),
        };

        println!("WYC Number:\t\t{}", self.wyc_number);
        println!("Name:\t\t\t{}", self.display_name());
        println!("Email:\t\t\t{}", self.email.clone().unwrap_or_default());
        println!("Phone:\t\t\t{}", self.phone1.clone().unwrap_or_default());
        println!("Category:\t\t{}", category);
        println!("Expire Quarter:\t\t{}", self.expire_qtr);
        println!("Join Date:\t\t{}", self.join_date);
    }
}

impl PrintFormatted for (Vec<Member>, Vec<Category>) {
    fn print_formatted(&self) {
        let (members, categories) = self;
        println!(
            "{:>6}\t{:<30}\t{:<30}\t{:<16}\t{:>10}\t{}",
            "WYC", "Name", "Email", "Category", "Expire Qtr", "Join Date"
        );
        println!("{:-<120}", "-");

        for member in members {
            println!(
                "{:>6}\t{:<30}\t{:<30}\t{:<16}\t{:>10}\t{}",
                member.wyc_number,
                member.display_name(),
                member.email.clone().unwrap_or_default(),
                category_text(categories, member.category),
                member.expire_qtr,
                member.join_date,
            );
        }
    }
}

impl PrintFormatted for Lesson {
    fn print_formatted(&self) {
        println!("ID:\t\t\t{}", self.id);
        println!("Title:\t\t\t{}", self.subtype.clone().unwrap_or_default());
        println!("Day:\t\t\t{}", self.day.clone().unwrap_or_default());
        println!("Time:\t\t\t{}", self.time.clone().unwrap_or_default());
        println!("Dates:\t\t\t{}", self.dates.clone().unwrap_or_default());
        println!("Calendar Date:\t\t{}", self.calendar_date);
        println!(
            "Size:\t\t\t{}",
            self.size.map(|s| s.to_string()).unwrap_or_default()
        );
        println!(
            "Expires after:\t\t{}",
            self.expire.map(|e| e.to_string()).unwrap_or_default()
        );
        println!("Description:\t\t{}", self.description);
    }
}

impl PrintFormatted for Vec<Lesson> {
    fn print_formatted(&self) {
        println!(
            "{:>4}\t{:<12}\t{:<10}\t{:<8}\t{:<30}\t{:>4}\t{:>6}",
            "ID", "Date", "Day", "Time", "Title", "Size", "Expire"
        );
        println!("{:-<100}", "-");

        for lesson in self {
            println!(
                "{:>4}\t{:<12}\t{:<10}\t{:<8}\t{:<30}\t{:>4}\t{:>6}",
                lesson.id,
                lesson.calendar_date,
                lesson.day.clone().unwrap_or_default(),
                lesson.time.clone().unwrap_or_default(),
                lesson.subtype.clone().unwrap_or_default(),
                lesson.size.map(|s| s.to_string()).unwrap_or_default(),
                lesson.expire.map(|e| e.to_string()).unwrap_or_default(),
            );
        }
    }
}
