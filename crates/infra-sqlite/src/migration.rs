// Schema migrations.
//
// The queue and the order store live in separate database files, so
// each gets its own migration chain. Both share the same versioning
// scheme: a schema_version table written by the migration scripts.

use sqlx::SqlitePool;
use tracing::info;

/// Run migrations for the queue database (queue_entries, dead_letters)
pub async fn run_queue_migrations(pool: &SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
    let current_version = current_version(pool).await?;
    info!("Queue database schema version: {}", current_version);

    if current_version < 1 {
        info!("Applying queue migration 001: Initial schema");
        apply_migration(pool, include_str!("../migrations/queue_001_initial.sql")).await?;
    }

    info!("Queue database migrations applied");
    Ok(())
}

/// Run migrations for the order store database (orders)
pub async fn run_store_migrations(pool: &SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
    let current_version = current_version(pool).await?;
    info!("Order store schema version: {}", current_version);

    if current_version < 1 {
        info!("Applying store migration 001: Initial schema");
        apply_migration(pool, include_str!("../migrations/store_001_initial.sql")).await?;
    }

    info!("Order store migrations applied");
    Ok(())
}

/// Read the schema version, treating a missing table as version 0
async fn current_version(pool: &SqlitePool) -> Result<i64, Box<dyn std::error::Error>> {
    let table: Option<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'schema_version'",
    )
    .fetch_optional(pool)
    .await?;

    if table.is_none() {
        return Ok(0);
    }

    // MAX over an empty table yields NULL
    let version: Option<i64> = sqlx::query_scalar("SELECT MAX(version) FROM schema_version")
        .fetch_one(pool)
        .await?;

    Ok(version.unwrap_or(0))
}

/// Apply one migration file inside a transaction.
///
/// sqlx executes a single statement per query, so the file is split on
/// `;` with full-line `--` comments stripped first.
async fn apply_migration(pool: &SqlitePool, sql: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut tx = pool.begin().await?;

    for statement in sql.split(';') {
        let clean: String = statement
            .lines()
            .filter(|line| !line.trim_start().starts_with("--"))
            .collect::<Vec<_>>()
            .join("\n");

        let clean = clean.trim();
        if !clean.is_empty() {
            sqlx::query(clean).execute(&mut *tx).await?;
        }
    }

    tx.commit().await?;
    Ok(())
}
