// Submit Order Use Case

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{codec, Order, OrderId};
use crate::error::Result;
use crate::port::OrderQueue;

/// Order submission payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSubmission {
    pub id: OrderId,
    pub item: String,
}

/// Validate, encode, and enqueue one order.
///
/// Validation runs before any queue interaction; an invalid submission
/// never reaches the queue. Duplicate ids are accepted here without
/// deduplication, the store resolves them at persist time.
pub async fn execute(queue: &dyn OrderQueue, submission: OrderSubmission) -> Result<OrderId> {
    let order = Order::new(submission.id, submission.item)?;

    let record = codec::encode(&order);
    queue.push(&record).await?;

    info!(order_id = order.id, "Order accepted into queue");
    Ok(order.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::error::AppError;
    use crate::port::order_queue::mocks::InMemoryOrderQueue;

    #[tokio::test]
    async fn test_submit_enqueues_encoded_order() {
        let queue = InMemoryOrderQueue::new();

        let id = execute(
            &queue,
            OrderSubmission {
                id: 1,
                item: "widget".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(id, 1);
        assert_eq!(queue.depth().await.unwrap(), 1);

        let record = queue.pop().await.unwrap().unwrap();
        let order = codec::decode(&record).unwrap();
        assert_eq!(order.id, 1);
        assert_eq!(order.item, "widget");
    }

    #[tokio::test]
    async fn test_invalid_id_is_rejected_before_the_queue() {
        let queue = InMemoryOrderQueue::new();

        let result = execute(
            &queue,
            OrderSubmission {
                id: -7,
                item: "widget".to_string(),
            },
        )
        .await;

        assert!(matches!(
            result,
            Err(AppError::Validation(DomainError::InvalidOrderId(-7)))
        ));
        assert_eq!(queue.depth().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_empty_item_is_rejected_before_the_queue() {
        let queue = InMemoryOrderQueue::new();

        let result = execute(
            &queue,
            OrderSubmission {
                id: 1,
                item: "".to_string(),
            },
        )
        .await;

        assert!(matches!(
            result,
            Err(AppError::Validation(DomainError::EmptyItem))
        ));
        assert_eq!(queue.depth().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_ids_are_both_accepted() {
        let queue = InMemoryOrderQueue::new();

        for item in ["widget", "gadget"] {
            execute(
                &queue,
                OrderSubmission {
                    id: 7,
                    item: item.to_string(),
                },
            )
            .await
            .unwrap();
        }

        // Intake does not deduplicate; both records are queued in order.
        assert_eq!(queue.depth().await.unwrap(), 2);
    }
}
