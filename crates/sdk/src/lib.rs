//! Orderflow SDK - Rust Client Library
//!
//! Typed client for the Orderflow daemon's JSON-RPC API.
//!
//! # Example
//!
//! ```no_run
//! use orderflow_sdk::OrderflowClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OrderflowClient::connect("http://127.0.0.1:7140").await?;
//!
//!     let accepted = client.enqueue(1, "widget").await?;
//!     println!("{}", accepted.message);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::OrderflowClient;
pub use error::{Result, SdkError};
pub use types::{EnqueueResponse, HealthResponse, RedriveResponse, StatsResponse};
