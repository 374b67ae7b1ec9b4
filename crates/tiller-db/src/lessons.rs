use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use tiller_data::{Count, Insert, Lesson, LessonFilter, LessonOrder, Query, Retrieve, Update};

use crate::{
    conditions::order_by,
    results::{Id, QueryError, Total},
    Connection,
};

const SELECT_LESSONS: &str = r#"
    SELECT
        id,
        class_type,
        subtype,
        day,
        time,
        dates,
        calendar_date,
        instructor1,
        instructor2,
        description,
        size,
        expire,
        display
    FROM lessons
    WHERE 1
"#;

fn push_filter(qry: &mut QueryBuilder<'_, Sqlite>, filter: &LessonFilter) {
    if let Some(quarter) = filter.expire_at_least {
        qry.push(" AND expire >= ").push_bind(quarter as i64);
    }
}

#[async_trait]
impl Query<Lesson> for Connection {
    type Filter = LessonFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Lesson>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::new(SELECT_LESSONS);
        push_filter(&mut qry, filter);

        match filter.order {
            LessonOrder::Newest => {
                qry.push(order_by("id", true));
            }
            LessonOrder::CalendarDate { descending } => {
                qry.push(order_by("calendar_date", descending));
            }
            LessonOrder::Schedule => {
                qry.push(" ORDER BY calendar_date ASC, time ASC");
            }
        }

        if let Some(page) = filter.page {
            qry.push(" LIMIT ")
                .push_bind(page.limit())
                .push(" OFFSET ")
                .push_bind(page.offset());
        }

        let lessons: Vec<Lesson> = qry
            .build_query_as()
            .fetch_all(&mut *conn)
            .await
            .map_err(QueryError::failed)?;
        Ok(lessons)
    }
}

#[async_trait]
impl Count<Lesson> for Connection {
    type Filter = LessonFilter;
    async fn count(&self, filter: &Self::Filter) -> Result<u32> {
        let mut conn = self.lock().await;
        let mut qry =
            QueryBuilder::new("SELECT COUNT(*) AS total FROM lessons WHERE 1");
        push_filter(&mut qry, filter);

        let total: Total = qry
            .build_query_as()
            .fetch_one(&mut *conn)
            .await
            .map_err(QueryError::failed)?;
        Ok(total.total as u32)
    }
}

#[async_trait]
impl Retrieve<Lesson> for Connection {
    type Key = u32;
    async fn retrieve(&self, lesson_id: Self::Key) -> Result<Lesson> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::new(SELECT_LESSONS);
        qry.push(" AND id = ").push_bind(lesson_id);

        let lesson: Option<Lesson> = qry
            .build_query_as()
            .fetch_optional(&mut *conn)
            .await
            .map_err(QueryError::failed)?;
        Ok(lesson.ok_or(QueryError::NotFound)?)
    }
}

#[async_trait]
impl Insert<Lesson> for Connection {
    async fn insert(&self, lesson: Lesson) -> Result<Lesson> {
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO lessons (
                    class_type,
                    subtype,
                    day,
                    time,
                    dates,
                    calendar_date,
                    instructor1,
                    instructor2,
                    description,
                    size,
                    expire,
                    display
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(lesson.class_type)
                .push_bind(&lesson.subtype)
                .push_bind(&lesson.day)
                .push_bind(&lesson.time)
                .push_bind(&lesson.dates)
                .push_bind(lesson.calendar_date)
                .push_bind(lesson.instructor1)
                .push_bind(lesson.instructor2)
                .push_bind(&lesson.description)
                .push_bind(lesson.size)
                .push_bind(lesson.expire)
                .push_bind(lesson.display);

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await
                .map_err(QueryError::failed)?
        };
        self.retrieve(insert.id).await
    }
}

#[async_trait]
impl Update<Lesson> for Connection {
    async fn update(&self, lesson: Lesson) -> Result<Lesson> {
        {
            let mut conn = self.lock().await;
            QueryBuilder::<Sqlite>::new("UPDATE lessons SET")
                .push(" class_type = ")
                .push_bind(lesson.class_type)
                .push(", subtype = ")
                .push_bind(&lesson.subtype)
                .push(", day = ")
                .push_bind(&lesson.day)
                .push(", time = ")
                .push_bind(&lesson.time)
                .push(", dates = ")
                .push_bind(&lesson.dates)
                .push(", calendar_date = ")
                .push_bind(lesson.calendar_date)
                .push(", instructor1 = ")
                .push_bind(lesson.instructor1)
                .push(", instructor2 = ")
                .push_bind(lesson.instructor2)
                .push(", description = ")
                .push_bind(&lesson.description)
                .push(", size = ")
                .push_bind(lesson.size)
                .push(", expire = ")
                .push_bind(lesson.expire)
                .push(", display = ")
                .push_bind(lesson.display)
                .push(" WHERE id = ")
                .push_bind(lesson.id)
                .build()
                .execute(&mut *conn)
                .await
                .map_err(QueryError::failed)?;
        }
        self.retrieve(lesson.id).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    use tiller_data::{list, LessonForm, Page};

    fn lesson_on(day: u32, time: &str, expire: u32) -> Lesson {
        LessonForm {
            class_type: Some(1),
            subtype: Some("Beginning Sailing".to_string()),
            day: Some("Tuesday".to_string()),
            time: Some(time.to_string()),
            dates: Some("Spring".to_string()),
            calendar_date: NaiveDate::from_ymd_opt(2024, 4, day),
            size: Some(12),
            expire: Some(expire),
            ..Default::default()
        }
        .validate()
        .unwrap()
    }

    #[tokio::test]
    async fn test_lesson_insert() {
        let db = Connection::open_test().await;
        let lesson = db.insert(lesson_on(2, "18:00", 5)).await.unwrap();

        assert!(lesson.id > 0);
        assert_eq!(lesson.subtype.as_deref(), Some("Beginning Sailing"));
        assert_eq!(
            lesson.calendar_date,
            NaiveDate::from_ymd_opt(2024, 4, 2).unwrap()
        );
        assert_eq!(lesson.expire, Some(5));
    }

    #[tokio::test]
    async fn test_lesson_update() {
        let db = Connection::open_test().await;
        let mut lesson = db.insert(lesson_on(2, "18:00", 5)).await.unwrap();

        lesson.subtype = Some("Intermediate Sailing".to_string());
        lesson.size = Some(8);
        let lesson = db.update(lesson).await.unwrap();

        assert_eq!(lesson.subtype.as_deref(), Some("Intermediate Sailing"));
        assert_eq!(lesson.size, Some(8));
    }

    #[tokio::test]
    async fn test_lesson_default_order_is_newest() {
        let db = Connection::open_test().await;
        db.insert(lesson_on(20, "18:00", 5)).await.unwrap();
        db.insert(lesson_on(5, "18:00", 5)).await.unwrap();

        let lessons: Vec<Lesson> =
            db.query(&LessonFilter::default()).await.unwrap();
        // Insertion order, newest first
        assert_eq!(
            lessons[0].calendar_date,
            NaiveDate::from_ymd_opt(2024, 4, 5).unwrap()
        );
    }

    #[tokio::test]
    async fn test_lesson_order_by_calendar_date() {
        let db = Connection::open_test().await;
        db.insert(lesson_on(20, "18:00", 5)).await.unwrap();
        db.insert(lesson_on(5, "18:00", 5)).await.unwrap();

        let lessons: Vec<Lesson> = db
            .query(&LessonFilter {
                order: LessonOrder::CalendarDate { descending: false },
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(
            lessons[0].calendar_date,
            NaiveDate::from_ymd_opt(2024, 4, 5).unwrap()
        );
    }

    #[tokio::test]
    async fn test_lesson_listing_pagination() {
        let db = Connection::open_test().await;
        for day in 1..=5 {
            db.insert(lesson_on(day, "18:00", 5)).await.unwrap();
        }

        let filter = LessonFilter {
            page: Some(Page::new(1, 2)),
            ..Default::default()
        };
        let listing = list::<Lesson, _, _>(&db, &filter).await.unwrap();
        assert_eq!(listing.rows.len(), 2);
        assert_eq!(listing.total_count, 5);
        assert_eq!(listing.page_count(2), 3);
    }

    #[tokio::test]
    async fn test_lesson_schedule_filters_expired() {
        let db = Connection::open_test().await;
        db.insert(lesson_on(10, "18:00", 4)).await.unwrap();
        db.insert(lesson_on(12, "09:00", 5)).await.unwrap();
        db.insert(lesson_on(12, "08:00", 9)).await.unwrap();

        db.update(tiller_data::CurrentQuarter { quarter: 5 })
            .await
            .unwrap();

        let lessons = Lesson::schedule(&db).await.unwrap();
        assert_eq!(lessons.len(), 2);
        // Calendar date then time of day
        assert_eq!(lessons[0].time.as_deref(), Some("08:00"));
        assert_eq!(lessons[1].time.as_deref(), Some("09:00"));
    }
}
