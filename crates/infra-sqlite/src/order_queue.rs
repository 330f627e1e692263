// SQLite OrderQueue Adapter

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::debug;

use orderflow_core::error::{AppError, Result};
use orderflow_core::port::{OrderQueue, TimeProvider};

/// Map sqlx errors to queue errors, surfacing the SQLite code detail
fn map_sqlx_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    // SQLITE_BUSY
                    "5" => AppError::Queue(format!(
                        "Queue database is locked: {}",
                        db_err.message()
                    )),
                    // SQLITE_FULL
                    "13" => AppError::Queue(format!(
                        "Queue database is full: {}",
                        db_err.message()
                    )),
                    _ => AppError::Queue(format!(
                        "Queue database error [{}]: {}",
                        code,
                        db_err.message()
                    )),
                }
            } else {
                AppError::Queue(format!("Queue database error: {}", db_err.message()))
            }
        }
        _ => AppError::Queue(format!("Queue error: {}", err)),
    }
}

/// Durable FIFO queue backed by a dedicated SQLite database.
///
/// Records are stored as opaque TEXT in insertion order; the adapter
/// never parses them.
pub struct SqliteOrderQueue {
    pool: SqlitePool,
    time_provider: Arc<dyn TimeProvider>,
}

impl SqliteOrderQueue {
    pub fn new(pool: SqlitePool, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            pool,
            time_provider,
        }
    }
}

#[async_trait]
impl OrderQueue for SqliteOrderQueue {
    async fn push(&self, record: &str) -> Result<()> {
        let now = self.time_provider.now_millis();

        sqlx::query("INSERT INTO queue_entries (record, enqueued_at) VALUES (?, ?)")
            .bind(record)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn pop(&self) -> Result<Option<String>> {
        // Single-statement claim-and-remove of the head row. DELETE
        // RETURNING is atomic, so the record leaves the queue exactly
        // once even with concurrent callers.
        let record: Option<String> = sqlx::query_scalar(
            r#"
            DELETE FROM queue_entries
            WHERE position = (SELECT MIN(position) FROM queue_entries)
            RETURNING record
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(record)
    }

    async fn depth(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM queue_entries")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(count)
    }

    async fn dead_letter(&self, record: &str, reason: &str) -> Result<()> {
        let now = self.time_provider.now_millis();

        sqlx::query("INSERT INTO dead_letters (record, reason, failed_at) VALUES (?, ?, ?)")
            .bind(record)
            .bind(reason)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        debug!(reason, "Record parked in dead letters");
        Ok(())
    }

    async fn dead_letter_count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dead_letters")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(count)
    }

    async fn redrive_dead_letters(&self) -> Result<u64> {
        let now = self.time_provider.now_millis();

        // Move and clear in one transaction so a crash between the two
        // statements cannot duplicate records.
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let moved = sqlx::query(
            r#"
            INSERT INTO queue_entries (record, enqueued_at)
            SELECT record, ? FROM dead_letters ORDER BY id
            "#,
        )
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?
        .rows_affected();

        sqlx::query("DELETE FROM dead_letters")
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;

        debug!(moved, "Dead letters redriven to queue tail");
        Ok(moved)
    }
}
