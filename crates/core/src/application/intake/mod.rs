// Intake Service - Order acceptance use case

pub mod submit;

pub use submit::OrderSubmission;

use crate::domain::OrderId;
use crate::error::Result;
use crate::port::OrderQueue;
use std::sync::Arc;

/// Intake validates submissions and hands them to the queue. It never
/// touches the order store; persistence is the worker's job.
pub struct IntakeService {
    queue: Arc<dyn OrderQueue>,
}

impl IntakeService {
    pub fn new(queue: Arc<dyn OrderQueue>) -> Self {
        Self { queue }
    }

    /// Accept an order into the queue.
    ///
    /// A returned id is an acceptance receipt, not a persistence
    /// receipt: the order is durable in the queue but not yet in the
    /// store.
    pub async fn submit(&self, submission: OrderSubmission) -> Result<OrderId> {
        submit::execute(self.queue.as_ref(), submission).await
    }
}
