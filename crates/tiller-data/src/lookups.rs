use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Membership category lookup row. A member without a category is
/// rendered as "Unknown".
#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub text: Option<String>,
}

/// Class type lookup row for lessons.
#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct ClassType {
    pub id: u32,
    pub text: Option<String>,
}

/// Academic quarter lookup row. The index is the ordinal the member
/// expiration marker compares against; `school` is the display label.
#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct Quarter {
    pub id: u32,
    pub text: Option<String>,
    pub school: Option<String>,
    pub end_date: Option<NaiveDate>,
}

/// The single-row pointer to the quarter the schedule currently shows.
#[derive(Debug, Clone, Copy, Default, FromRow, Serialize, Deserialize)]
pub struct CurrentQuarter {
    pub quarter: u32,
}

pub const UNKNOWN_CATEGORY: &str = "Unknown";
