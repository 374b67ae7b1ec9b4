use sqlx::FromRow;
use thiserror::Error as ThisError;

/// Model errors
#[derive(Debug, Clone, ThisError)]
pub enum QueryError {
    #[error("Not found")]
    NotFound,
    #[error("Ambiguous results ({0:?}) for query")]
    Ambiguous(usize),
    #[error(
        "A member with WYC number {0} already exists. \
         Please use a different number."
    )]
    DuplicateKey(u32),
    #[error("Query failed: {message} (code: {code})")]
    Failed { message: String, code: String },
}

impl QueryError {
    /// Wrap a driver error, keeping the original error code and
    /// message for diagnostics.
    pub fn failed(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) => QueryError::Failed {
                message: db_err.message().to_string(),
                code: db_err
                    .code()
                    .map(|code| code.into_owned())
                    .unwrap_or_else(|| "NO_CODE".to_string()),
            },
            _ => QueryError::Failed {
                message: err.to_string(),
                code: "NO_CODE".to_string(),
            },
        }
    }
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation)
        }
        _ => false,
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct Id<T> {
    pub id: T,
}

#[derive(Debug, Clone, FromRow)]
pub struct Total {
    pub total: i64,
}
