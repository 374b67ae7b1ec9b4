use anyhow::Result;
use serde::{Deserialize, Serialize};

/// A zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub index: u32,
    pub size: u32,
}

impl Page {
    pub fn new(index: u32, size: u32) -> Self {
        Self { index, size }
    }

    /// Page with a usable size. A size of zero would make LIMIT 0
    /// queries and zero page counts, so it is raised to 1.
    pub fn clamped(self) -> Self {
        Self {
            index: self.index,
            size: self.size.max(1),
        }
    }

    pub fn limit(&self) -> i64 {
        self.clamped().size as i64
    }

    pub fn offset(&self) -> i64 {
        let page = self.clamped();
        page.index as i64 * page.size as i64
    }
}

impl Default for Page {
    fn default() -> Self {
        Self { index: 0, size: 50 }
    }
}

/// One page of results together with the total number of rows the
/// filter matches without pagination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing<T> {
    pub rows: Vec<T>,
    pub total_count: u32,
}

impl<T> Listing<T> {
    pub fn page_count(&self, page_size: u32) -> u32 {
        self.total_count.div_ceil(page_size.max(1))
    }
}

/// Query one page and the total count for the same filter.
pub async fn list<T, DB, F>(db: &DB, filter: &F) -> Result<Listing<T>>
where
    DB: crate::Query<T, Filter = F> + crate::Count<T, Filter = F>,
{
    let rows = db.query(filter).await?;
    let total_count = db.count(filter).await?;
    Ok(Listing { rows, total_count })
}
