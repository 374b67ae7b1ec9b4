use anyhow::Result;
use async_trait::async_trait;
use sqlx::QueryBuilder;

use tiller_data::{Category, ClassType, CurrentQuarter, Quarter, Query, Retrieve, Update};

use crate::{results::QueryError, Connection};

#[async_trait]
impl Query<Category> for Connection {
    type Filter = ();
    async fn query(&self, _filter: &Self::Filter) -> Result<Vec<Category>> {
        let mut conn = self.lock().await;
        let categories: Vec<Category> =
            sqlx::query_as("SELECT id, text FROM memcat ORDER BY id")
                .fetch_all(&mut *conn)
                .await
                .map_err(QueryError::failed)?;
        Ok(categories)
    }
}

#[async_trait]
impl Query<ClassType> for Connection {
    type Filter = ();
    async fn query(&self, _filter: &Self::Filter) -> Result<Vec<ClassType>> {
        let mut conn = self.lock().await;
        let types: Vec<ClassType> =
            sqlx::query_as("SELECT id, text FROM class_type ORDER BY id")
                .fetch_all(&mut *conn)
                .await
                .map_err(QueryError::failed)?;
        Ok(types)
    }
}

#[async_trait]
impl Query<Quarter> for Connection {
    type Filter = ();

    /// Quarters, most recent first.
    async fn query(&self, _filter: &Self::Filter) -> Result<Vec<Quarter>> {
        let mut conn = self.lock().await;
        let quarters: Vec<Quarter> = sqlx::query_as(
            "SELECT id, text, school, end_date FROM quarters ORDER BY id DESC",
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(QueryError::failed)?;
        Ok(quarters)
    }
}

#[async_trait]
impl Retrieve<CurrentQuarter> for Connection {
    type Key = ();

    /// Fetch the quarter pointer the lesson schedule compares against.
    async fn retrieve(&self, _key: Self::Key) -> Result<CurrentQuarter> {
        let mut conn = self.lock().await;
        let current: CurrentQuarter =
            sqlx::query_as("SELECT quarter FROM lesson_quarter WHERE id = 1")
                .fetch_one(&mut *conn)
                .await
                .map_err(QueryError::failed)?;
        Ok(current)
    }
}

#[async_trait]
impl Update<CurrentQuarter> for Connection {
    /// Advance the quarter pointer.
    async fn update(&self, current: CurrentQuarter) -> Result<CurrentQuarter> {
        {
            let mut conn = self.lock().await;
            QueryBuilder::new("UPDATE lesson_quarter SET")
                .push(" quarter = ")
                .push_bind(current.quarter)
                .push(" WHERE id = 1")
                .build()
                .execute(&mut *conn)
                .await
                .map_err(QueryError::failed)?;
        }
        self.retrieve(()).await
    }
}

impl Connection {
    /// Insert a lookup row. Only used by setup and tests; the lookup
    /// tables are otherwise read-only reference data.
    pub async fn insert_lookup(&self, table: LookupTable, text: &str) -> Result<u32> {
        let mut conn = self.lock().await;
        let row: crate::results::Id<u32> = QueryBuilder::new(format!(
            "INSERT INTO {} (text) VALUES (",
            table.name()
        ))
        .push_bind(text)
        .push(") RETURNING id")
        .build_query_as()
        .fetch_one(&mut *conn)
        .await
        .map_err(QueryError::failed)?;
        Ok(row.id)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum LookupTable {
    Categories,
    ClassTypes,
}

impl LookupTable {
    fn name(&self) -> &'static str {
        match self {
            LookupTable::Categories => "memcat",
            LookupTable::ClassTypes => "class_type",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_current_quarter_update_and_fetch() {
        let db = Connection::open_test().await;
        let current: CurrentQuarter = db.retrieve(()).await.unwrap();
        assert_eq!(current.quarter, 0);

        let current = db.update(CurrentQuarter { quarter: 7 }).await.unwrap();
        assert_eq!(current.quarter, 7);
    }

    #[tokio::test]
    async fn test_categories_ordered() {
        let db = Connection::open_test().await;
        db.insert_lookup(LookupTable::Categories, "Student").await.unwrap();
        db.insert_lookup(LookupTable::Categories, "Alumni").await.unwrap();

        let categories: Vec<Category> = db.query(&()).await.unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].text.as_deref(), Some("Student"));
        assert_eq!(categories[1].text.as_deref(), Some("Alumni"));
    }
}
