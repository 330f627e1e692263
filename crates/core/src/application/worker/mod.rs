// Worker - Queue drain loop

pub mod constants;
mod shutdown;

use constants::*;
pub use shutdown::{shutdown_channel, ShutdownSender, ShutdownToken};

use crate::application::retry::{RetryDecision, RetryPolicy};
use crate::domain::{codec, Order};
use crate::error::{AppError, Result};
use crate::port::{OrderQueue, OrderStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{error, info, warn};

/// Worker pacing. Process and idle intervals are distinct so an
/// operator can throttle drain rate without touching poll latency.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub process_interval: Duration,
    pub idle_interval: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            process_interval: DEFAULT_PROCESS_INTERVAL,
            idle_interval: DEFAULT_IDLE_INTERVAL,
        }
    }
}

/// Worker drains the queue and persists orders.
///
/// One record per cycle. A record leaves the queue exactly once: it
/// either reaches the store or, if it cannot be processed, the dead
/// letter table. Failures never stop the loop.
pub struct Worker {
    queue: Arc<dyn OrderQueue>,
    store: Arc<dyn OrderStore>,
    retry_policy: RetryPolicy,
    config: WorkerConfig,
}

impl Worker {
    pub fn new(
        queue: Arc<dyn OrderQueue>,
        store: Arc<dyn OrderStore>,
        retry_policy: RetryPolicy,
        config: WorkerConfig,
    ) -> Self {
        Self {
            queue,
            store,
            retry_policy,
            config,
        }
    }

    /// Run the drain loop with graceful shutdown support
    pub async fn run(&self, mut shutdown: ShutdownToken) -> Result<()> {
        info!("Worker started");
        loop {
            if shutdown.is_shutdown() {
                info!("Worker shutting down");
                break;
            }
            match self.drain_next().await {
                Ok(consumed) => {
                    let pause = if consumed {
                        self.config.process_interval
                    } else {
                        self.config.idle_interval
                    };
                    tokio::select! {
                        _ = sleep(pause) => {},
                        _ = shutdown.wait() => {
                            info!("Worker interrupted during pause");
                            break;
                        }
                    }
                }
                Err(e) => {
                    // Queue-level failure. Log, back off, poll again.
                    error!("Worker error: {}", e);
                    tokio::select! {
                        _ = sleep(ERROR_RECOVERY_SLEEP_DURATION) => {},
                        _ = shutdown.wait() => {
                            info!("Worker interrupted during error recovery");
                            break;
                        }
                    }
                }
            }
        }
        info!("Worker stopped");
        Ok(())
    }

    /// Consume one record from the queue head (returns true if a record
    /// was consumed).
    ///
    /// A malformed record is parked in dead letters rather than
    /// propagated, so one bad entry cannot wedge the queue behind it.
    /// Only queue access failures surface as `Err`.
    pub async fn drain_next(&self) -> Result<bool> {
        let record = match self.queue.pop().await? {
            Some(r) => r,
            None => return Ok(false), // Queue empty
        };

        let order = match codec::decode(&record) {
            Ok(order) => order,
            Err(e) => {
                warn!(reason = %e, "Unprocessable record, parking in dead letters");
                self.queue.dead_letter(&record, &e.to_string()).await?;
                return Ok(true);
            }
        };

        self.persist_with_retry(&order, &record).await?;
        Ok(true)
    }

    /// Upsert one order, retrying per policy. When attempts are
    /// exhausted the original record is dead-lettered and the worker
    /// moves on.
    async fn persist_with_retry(&self, order: &Order, record: &str) -> Result<()> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;

            let result = match timeout(PERSIST_TIMEOUT, self.store.upsert(order)).await {
                Ok(res) => res,
                Err(_) => Err(AppError::Persistence(format!(
                    "upsert timed out after {:?}",
                    PERSIST_TIMEOUT
                ))),
            };

            match result {
                Ok(()) => {
                    info!(order_id = order.id, attempt, "Order persisted");
                    return Ok(());
                }
                Err(e) => match self.retry_policy.decide(attempt) {
                    RetryDecision::Retry(delay_ms) => {
                        warn!(
                            order_id = order.id,
                            attempt,
                            delay_ms,
                            error = %e,
                            "Persist failed, retrying"
                        );
                        sleep(Duration::from_millis(delay_ms)).await;
                    }
                    RetryDecision::GiveUp => {
                        error!(
                            order_id = order.id,
                            attempt,
                            error = %e,
                            "Persist failed permanently, parking in dead letters"
                        );
                        self.queue.dead_letter(record, &e.to_string()).await?;
                        return Ok(());
                    }
                },
            }
        }
    }
}
