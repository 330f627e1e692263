// SQLite adapters for the core ports. The queue and the order store
// are separate database files, one adapter each.

mod connection;
mod migration;
mod order_queue;
mod order_store;

pub use connection::create_pool;
pub use migration::{run_queue_migrations, run_store_migrations};
pub use order_queue::SqliteOrderQueue;
pub use order_store::SqliteOrderStore;

// Orphan rules block a From<sqlx::Error> for AppError here, so each
// adapter maps sqlx errors through its own helper instead.
