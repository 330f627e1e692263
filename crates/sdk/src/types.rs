//! SDK Response Types
//!
//! Mirrors the JSON-RPC result types from the api-rpc crate.

use serde::Deserialize;

/// Response from orders.enqueue.v1
///
/// Receipt of acceptance into the queue. The order is durable but not
/// yet persisted to the store when this arrives.
#[derive(Debug, Clone, Deserialize)]
pub struct EnqueueResponse {
    pub order_id: i64,
    pub message: String,
}

/// Response from system.health.v1
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Response from admin.stats.v1
#[derive(Debug, Clone, Deserialize)]
pub struct StatsResponse {
    pub queued: i64,
    pub dead_letters: i64,
    pub persisted_orders: i64,
    pub uptime_seconds: i64,
}

/// Response from admin.redrive.v1
#[derive(Debug, Clone, Deserialize)]
pub struct RedriveResponse {
    pub redriven: u64,
}
