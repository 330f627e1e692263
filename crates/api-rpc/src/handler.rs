//! One handler per JSON-RPC method, dispatched from the server
//! module.

use crate::error::{throttled, to_rpc_error};
use crate::rate_limiter::RateLimiter;
use crate::types::{
    EnqueueRequest, EnqueueResponse, HealthResponse, RedriveResponse, StatsResponse,
};
use jsonrpsee::types::ErrorObjectOwned;
use orderflow_core::application::intake::submit::{self, OrderSubmission};
use orderflow_core::port::{OrderQueue, OrderStore};
use std::sync::Arc;

/// Rate limiter settings for the mutating methods
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub burst: u32,
    pub rate_per_sec: f64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            burst: 100,
            rate_per_sec: 50.0,
        }
    }
}

/// Method implementations over the queue and store ports.
pub struct RpcHandler {
    queue: Arc<dyn OrderQueue>,
    store: Arc<dyn OrderStore>,
    rate_limiter: RateLimiter,
    start_time: std::time::Instant,
}

impl RpcHandler {
    pub fn new(
        queue: Arc<dyn OrderQueue>,
        store: Arc<dyn OrderStore>,
        rate_limit: RateLimitConfig,
    ) -> Self {
        Self {
            queue,
            store,
            rate_limiter: RateLimiter::new(rate_limit.burst, rate_limit.rate_per_sec),
            start_time: std::time::Instant::now(),
        }
    }

    /// orders.enqueue.v1
    ///
    /// Success means accepted into the durable queue. Persistence to
    /// the order store happens later, on the worker's schedule.
    pub async fn enqueue(
        &self,
        params: EnqueueRequest,
    ) -> Result<EnqueueResponse, ErrorObjectOwned> {
        // Rate limiting check before any validation work
        if !self.rate_limiter.check().await {
            return Err(throttled());
        }

        let submission = OrderSubmission {
            id: params.id,
            item: params.item,
        };

        let order_id = submit::execute(self.queue.as_ref(), submission)
            .await
            .map_err(to_rpc_error)?;

        Ok(EnqueueResponse {
            order_id,
            message: format!("Order {} enqueued", order_id),
        })
    }

    /// system.health.v1
    ///
    /// Always "OK" while the process can answer at all. Queue or store
    /// trouble shows up in stats and logs, not here.
    pub async fn health(&self) -> Result<HealthResponse, ErrorObjectOwned> {
        Ok(HealthResponse { status: "OK" })
    }

    /// admin.stats.v1
    pub async fn stats(&self) -> Result<StatsResponse, ErrorObjectOwned> {
        let queued = self.queue.depth().await.map_err(to_rpc_error)?;
        let dead_letters = self.queue.dead_letter_count().await.map_err(to_rpc_error)?;
        let persisted_orders = self.store.count().await.map_err(to_rpc_error)?;

        Ok(StatsResponse {
            queued,
            dead_letters,
            persisted_orders,
            uptime_seconds: self.start_time.elapsed().as_secs() as i64,
        })
    }

    /// admin.redrive.v1
    pub async fn redrive(&self) -> Result<RedriveResponse, ErrorObjectOwned> {
        // Mutating method, same throttle as enqueue
        if !self.rate_limiter.check().await {
            return Err(throttled());
        }

        let redriven = self
            .queue
            .redrive_dead_letters()
            .await
            .map_err(to_rpc_error)?;

        Ok(RedriveResponse { redriven })
    }
}
