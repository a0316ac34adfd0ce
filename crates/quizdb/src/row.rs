//! Row mapping traits

use crate::error::{QuizError, QuizResult};
use tokio_postgres::Row;

/// Trait for converting a database row into a Rust struct
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> QuizResult<Self>;
}

/// Extension trait for Row to provide typed access
pub trait RowExt {
    /// Try to get a column value, returning QuizError::Decode on failure
    fn try_get_column<T>(&self, column: &str) -> QuizResult<T>
    where
        T: for<'a> tokio_postgres::types::FromSql<'a>;
}

impl RowExt for Row {
    fn try_get_column<T>(&self, column: &str) -> QuizResult<T>
    where
        T: for<'a> tokio_postgres::types::FromSql<'a>,
    {
        self.try_get(column)
            .map_err(|e| QuizError::decode(column, e.to_string()))
    }
}
