use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error as ThisError;

use crate::{Page, Query, Retrieve, SortSpec};

#[derive(Debug, Clone, ThisError, PartialEq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Lesson {
    pub id: u32,
    pub class_type: Option<u32>,
    /// Lesson title, e.g. "Beginning Sailing II".
    pub subtype: Option<String>,
    pub day: Option<String>,
    pub time: Option<String>,
    /// Display text for the session dates.
    pub dates: Option<String>,
    pub calendar_date: NaiveDate,
    pub instructor1: Option<u32>,
    pub instructor2: Option<u32>,
    pub description: String,
    pub size: Option<u32>,
    /// Quarter marker after which the lesson drops off the schedule.
    pub expire: Option<u32>,
    pub display: bool,
}

/// Form input for creating or editing a lesson. All fields arrive
/// optional; `validate` checks the required set before anything is
/// written to the database.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LessonForm {
    pub id: Option<u32>,
    pub class_type: Option<u32>,
    pub subtype: Option<String>,
    pub day: Option<String>,
    pub time: Option<String>,
    pub dates: Option<String>,
    pub calendar_date: Option<NaiveDate>,
    pub instructor1: Option<u32>,
    pub instructor2: Option<u32>,
    pub description: Option<String>,
    pub size: Option<u32>,
    pub expire: Option<u32>,
    pub display: bool,
}

impl LessonForm {
    /// Validate the form and build a lesson from it.
    pub fn validate(self) -> Result<Lesson, ValidationError> {
        let class_type = self
            .class_type
            .ok_or(ValidationError::MissingField("type"))?;
        let calendar_date = self
            .calendar_date
            .ok_or(ValidationError::MissingField("calendar date"))?;
        let subtype = non_blank(self.subtype).ok_or(ValidationError::MissingField("title"))?;
        let day = non_blank(self.day).ok_or(ValidationError::MissingField("day of week"))?;
        let time = non_blank(self.time).ok_or(ValidationError::MissingField("time"))?;
        let dates = non_blank(self.dates).ok_or(ValidationError::MissingField("dates"))?;
        let size = self.size.ok_or(ValidationError::MissingField("size"))?;
        let expire = self.expire.ok_or(ValidationError::MissingField("expire"))?;

        Ok(Lesson {
            id: self.id.unwrap_or(0),
            class_type: Some(class_type),
            subtype: Some(subtype),
            day: Some(day),
            time: Some(time),
            dates: Some(dates),
            calendar_date,
            instructor1: self.instructor1,
            instructor2: self.instructor2,
            description: self.description.unwrap_or_default(),
            size: Some(size),
            expire: Some(expire),
            display: self.display,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Lesson listing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum LessonOrder {
    /// Insertion order, newest first. The default for the paged listing.
    #[default]
    Newest,
    CalendarDate {
        descending: bool,
    },
    /// Calendar date then time of day, ascending. Used by the quarter
    /// schedule view.
    Schedule,
}

impl LessonOrder {
    /// Map a caller-supplied sort spec onto the allow-list, falling
    /// back to insertion order for unsupported fields.
    pub fn resolve(sort: Option<&SortSpec>) -> Self {
        match sort {
            Some(sort) if sort.field == "calendarDate" => LessonOrder::CalendarDate {
                descending: sort.descending,
            },
            _ => LessonOrder::Newest,
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonFilter {
    /// Keep only lessons that have not expired before this quarter.
    pub expire_at_least: Option<u32>,
    #[serde(default)]
    pub order: LessonOrder,
    pub page: Option<Page>,
}

impl Lesson {
    /// Lessons still current for the active quarter, in schedule order.
    pub async fn schedule<DB>(db: &DB) -> Result<Vec<Lesson>>
    where
        DB: Query<Lesson, Filter = LessonFilter>
            + Retrieve<crate::CurrentQuarter, Key = ()>,
    {
        let current: crate::CurrentQuarter = db.retrieve(()).await?;
        db.query(&LessonFilter {
            expire_at_least: Some(current.quarter),
            order: LessonOrder::Schedule,
            page: None,
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> LessonForm {
        LessonForm {
            class_type: Some(1),
            subtype: Some("Beginning Sailing".to_string()),
            day: Some("Tuesday".to_string()),
            time: Some("18:00".to_string()),
            dates: Some("Apr 1 - May 6".to_string()),
            calendar_date: NaiveDate::from_ymd_opt(2024, 4, 1),
            size: Some(12),
            expire: Some(5),
            ..Default::default()
        }
    }

    #[test]
    fn test_form_validates() {
        let lesson = complete_form().validate().unwrap();
        assert_eq!(lesson.class_type, Some(1));
        assert_eq!(lesson.subtype.as_deref(), Some("Beginning Sailing"));
        assert_eq!(
            lesson.calendar_date,
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
        );
        assert_eq!(lesson.description, "");
    }

    #[test]
    fn test_form_missing_type() {
        let form = LessonForm {
            class_type: None,
            ..complete_form()
        };
        assert_eq!(
            form.validate(),
            Err(ValidationError::MissingField("type"))
        );
    }

    #[test]
    fn test_form_missing_calendar_date() {
        let form = LessonForm {
            calendar_date: None,
            ..complete_form()
        };
        assert_eq!(
            form.validate(),
            Err(ValidationError::MissingField("calendar date"))
        );
    }

    #[test]
    fn test_form_blank_title() {
        let form = LessonForm {
            subtype: Some("   ".to_string()),
            ..complete_form()
        };
        assert_eq!(
            form.validate(),
            Err(ValidationError::MissingField("title"))
        );
    }

    #[test]
    fn test_order_resolve() {
        let sort = SortSpec {
            field: "calendarDate".to_string(),
            descending: true,
        };
        assert_eq!(
            LessonOrder::resolve(Some(&sort)),
            LessonOrder::CalendarDate { descending: true }
        );

        // Anything else degrades to insertion order
        let sort = SortSpec {
            field: "instructor1".to_string(),
            descending: false,
        };
        assert_eq!(LessonOrder::resolve(Some(&sort)), LessonOrder::Newest);
        assert_eq!(LessonOrder::resolve(None), LessonOrder::Newest);
    }
}
