// SQLite OrderStore Adapter

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;

use orderflow_core::domain::{Order, OrderId};
use orderflow_core::error::{AppError, Result};
use orderflow_core::port::{OrderStore, TimeProvider};

/// Map sqlx errors to persistence errors, surfacing the SQLite code detail
fn map_sqlx_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    // SQLITE_CONSTRAINT_UNIQUE / SQLITE_CONSTRAINT_PRIMARYKEY
                    "2067" | "1555" => AppError::Persistence(format!(
                        "Order already exists: {}",
                        db_err.message()
                    )),
                    // SQLITE_BUSY
                    "5" => AppError::Persistence(format!(
                        "Order store is locked: {}",
                        db_err.message()
                    )),
                    // SQLITE_FULL
                    "13" => AppError::Persistence(format!(
                        "Order store is full: {}",
                        db_err.message()
                    )),
                    _ => AppError::Persistence(format!(
                        "Order store error [{}]: {}",
                        code,
                        db_err.message()
                    )),
                }
            } else {
                AppError::Persistence(format!("Order store error: {}", db_err.message()))
            }
        }
        _ => AppError::Persistence(format!("Order store error: {}", err)),
    }
}

/// Row shape for the orders table
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    item: String,
}

impl OrderRow {
    fn into_order(self) -> Order {
        // Rows only ever come from validated orders, no re-validation.
        Order {
            id: self.id,
            item: self.item,
        }
    }
}

/// Relational order store backed by a dedicated SQLite database
pub struct SqliteOrderStore {
    pool: SqlitePool,
    time_provider: Arc<dyn TimeProvider>,
}

impl SqliteOrderStore {
    pub fn new(pool: SqlitePool, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            pool,
            time_provider,
        }
    }
}

#[async_trait]
impl OrderStore for SqliteOrderStore {
    async fn upsert(&self, order: &Order) -> Result<()> {
        let now = self.time_provider.now_millis();

        // Later write wins; created_at keeps the first write's stamp.
        sqlx::query(
            r#"
            INSERT INTO orders (id, item, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                item = excluded.item,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(order.id)
        .bind(&order.item)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>> {
        let row: Option<OrderRow> =
            sqlx::query_as("SELECT id, item FROM orders WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(row.map(OrderRow::into_order))
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(count)
    }
}
