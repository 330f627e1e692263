// Application layer. Use cases composed from domain types and ports.

pub mod intake;
pub mod retry;
pub mod worker;

pub use intake::IntakeService;
pub use retry::{RetryDecision, RetryPolicy};
pub use worker::{shutdown_channel, ShutdownSender, ShutdownToken, Worker, WorkerConfig};
