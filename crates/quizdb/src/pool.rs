//! Connection pool utilities

use crate::error::{QuizError, QuizResult};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use tokio_postgres::NoTls;

/// Default maximum number of pooled connections.
pub const DEFAULT_MAX_SIZE: usize = 16;

/// Create a connection pool from a database URL.
///
/// Uses `NoTls` and [`DEFAULT_MAX_SIZE`] connections.
///
/// ```ignore
/// let pool = quizdb::create_pool("postgres://postgres@localhost/test_db")?;
/// let client = pool.get().await?;
/// let quizzes = quizdb::quiz::list_quizzes(&client).await?;
/// ```
pub fn create_pool(database_url: &str) -> QuizResult<Pool> {
    create_pool_with_config(database_url, DEFAULT_MAX_SIZE)
}

/// Create a connection pool holding at most `max_size` connections.
pub fn create_pool_with_config(database_url: &str, max_size: usize) -> QuizResult<Pool> {
    if max_size == 0 {
        return Err(QuizError::validation("pool max_size must be at least 1"));
    }

    let pg_config: tokio_postgres::Config = database_url
        .parse()
        .map_err(|e: tokio_postgres::Error| QuizError::Connection(e.to_string()))?;

    let manager_config = ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    };
    let mgr = Manager::from_config(pg_config, NoTls, manager_config);
    Pool::builder(mgr)
        .max_size(max_size)
        .build()
        .map_err(|e| QuizError::Pool(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparseable_url() {
        let err = create_pool("postgres://user@host:notaport/db").unwrap_err();
        assert!(matches!(err, QuizError::Connection(_)));
    }

    #[test]
    fn rejects_zero_sized_pool() {
        let err = create_pool_with_config("postgres://localhost/test_db", 0).unwrap_err();
        assert!(matches!(err, QuizError::Validation(_)));
    }

    #[test]
    fn builds_without_connecting() {
        let pool = create_pool_with_config("postgres://postgres@localhost/test_db", 4).unwrap();
        assert_eq!(pool.status().max_size, 4);
    }
}
