//! Per-operation deadline.
//!
//! Every store call runs inside [`bounded`]. When the deadline expires the
//! in-flight future is dropped, which cancels the query and rolls back any
//! open transaction, and the caller gets [`DbError::Timeout`].

use std::future::Future;
use std::time::Duration;
use tracing::warn;

use crate::error::{DbError, DbResult};

/// Runs `fut` with a `limit` deadline.
pub async fn bounded<T, E, F>(limit: Duration, operation: &'static str, fut: F) -> DbResult<T>
where
    F: Future<Output = Result<T, E>>,
    E: Into<DbError>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result.map_err(Into::into),
        Err(_) => {
            warn!(operation, timeout_ms = limit.as_millis() as u64, "Database operation timed out");
            Err(DbError::Timeout(limit))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_slow_operation_times_out() {
        let result: DbResult<()> = bounded(Duration::from_millis(50), "slow", async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, DbError>(())
        })
        .await;

        assert!(matches!(result, Err(DbError::Timeout(d)) if d == Duration::from_millis(50)));
    }

    #[tokio::test]
    async fn test_fast_operation_passes_through() {
        let result = bounded(Duration::from_secs(1), "fast", async { Ok::<_, sqlx::Error>(7) }).await;
        assert_eq!(result.unwrap(), 7);

        let result: DbResult<i32> = bounded(Duration::from_secs(1), "missing", async {
            Err(sqlx::Error::RowNotFound)
        })
        .await;
        assert!(matches!(result, Err(DbError::NotFound { .. })));
    }
}
