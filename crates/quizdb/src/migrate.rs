//! Embedded schema migrations via [`refinery`].
//!
//! Migrations live in `crates/quizdb/migrations` and are compiled into the
//! binary, so a deployed service can bring its database up to date without
//! shipping SQL files alongside it.

use crate::error::QuizResult;

pub use refinery::{Migration, Report};

mod embedded {
    refinery::embed_migrations!("migrations");
}

/// Every migration compiled into this crate, in version order.
pub fn migrations() -> Vec<Migration> {
    embedded::migrations::runner().get_migrations().to_vec()
}

/// Apply pending migrations on a single PostgreSQL connection.
pub async fn run(client: &mut tokio_postgres::Client) -> QuizResult<Report> {
    let report = embedded::migrations::runner().run_async(client).await?;
    #[cfg(feature = "tracing")]
    tracing::info!(
        target: "quizdb.migrate",
        applied = report.applied_migrations().len(),
        "migrations applied"
    );
    Ok(report)
}

/// Apply pending migrations using a connection checked out of `pool`.
#[cfg(feature = "pool")]
pub async fn run_pool(pool: &deadpool_postgres::Pool) -> QuizResult<Report> {
    let mut client = pool.get().await?;
    run(&mut client).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_table_migration_is_embedded() {
        let all = migrations();
        assert!(!all.is_empty());
        assert_eq!(all[0].version(), 1);
        assert_eq!(all[0].name(), "create_quiz_table");
        assert!(all[0].sql().unwrap_or_default().contains("quiz_table"));
    }
}
