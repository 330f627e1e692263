//! JSON-RPC 2.0 server for Orderflow.
//!
//! Method names are versioned (`orders.enqueue.v1`) so the wire
//! contract can evolve without breaking existing clients.

pub mod error;
pub mod handler;
mod rate_limiter;
pub mod server;
pub mod types;

pub use server::{RpcServer, RpcServerConfig};
