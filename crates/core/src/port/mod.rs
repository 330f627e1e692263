// Ports. The application layer talks to the outside world only
// through these traits; adapters live in the infra crates.

pub mod order_queue;
pub mod order_store;
pub mod time_provider;

pub use order_queue::OrderQueue;
pub use order_store::OrderStore;
pub use time_provider::TimeProvider;
