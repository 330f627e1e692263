//! Wire types for the intake API.
//!
//! One request/response pair per JSON-RPC method.

use serde::{Deserialize, Serialize};

/// orders.enqueue.v1 - Submit an order
#[derive(Debug, Deserialize)]
pub struct EnqueueRequest {
    pub id: i64,
    pub item: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnqueueResponse {
    pub order_id: i64,
    pub message: String,
}

/// system.health.v1 - Liveness check
///
/// Reports that the process is up and responding, nothing about
/// queue or store state.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// admin.stats.v1 - Queue and store counters
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub queued: i64,
    pub dead_letters: i64,
    pub persisted_orders: i64,
    pub uptime_seconds: i64,
}

/// admin.redrive.v1 - Requeue dead letters
#[derive(Debug, Clone, Serialize)]
pub struct RedriveResponse {
    pub redriven: u64,
}
