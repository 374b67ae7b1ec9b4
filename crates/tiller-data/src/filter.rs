/// A single predicate over a listing table. Filters lower themselves
/// into a list of conditions which the database layer folds into a
/// parameterized query. Column names are fixed by the lowering code,
/// never taken from caller input.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Column equals an integer value.
    Eq(&'static str, i64),
    /// Column contains the string (substring match).
    Contains(&'static str, String),
    /// Column starts with the string (prefix match).
    StartsWith(&'static str, String),
    /// Column is greater than or equal to the value.
    AtLeast(&'static str, i64),
    /// Any of the inner conditions holds.
    AnyOf(Vec<Condition>),
    /// All of the inner conditions hold.
    AllOf(Vec<Condition>),
}

/// A sort request as supplied by a caller: the field id used by the
/// old site plus a direction. Resolution against the per-listing
/// allow-list happens in `MemberOrder::resolve` / `LessonOrder::resolve`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub descending: bool,
}
