// Order Store Port

use async_trait::async_trait;

use crate::domain::{Order, OrderId};
use crate::error::Result;

/// Durable order persistence keyed by order id.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Insert or overwrite the row for `order.id`. Idempotent: repeating
    /// an upsert is safe, and the later write wins.
    async fn upsert(&self, order: &Order) -> Result<()>;

    /// Fetch a persisted order by id.
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>>;

    /// Number of persisted orders.
    async fn count(&self) -> Result<i64>;
}

/// Mock implementations for testing
pub mod mocks {
    use super::*;
    use crate::error::AppError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock store behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Every upsert succeeds
        Success,
        /// The first `n` upserts fail, later ones succeed
        FailTimes(usize),
        /// Every upsert fails
        AlwaysFail,
    }

    /// In-memory store with failure injection and call counting
    pub struct MockOrderStore {
        behavior: MockBehavior,
        rows: Mutex<HashMap<OrderId, Order>>,
        upsert_calls: Mutex<usize>,
    }

    impl MockOrderStore {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior,
                rows: Mutex::new(HashMap::new()),
                upsert_calls: Mutex::new(0),
            }
        }

        pub fn new_success() -> Self {
            Self::new(MockBehavior::Success)
        }

        /// Total upsert attempts observed, including failed ones.
        pub fn upsert_calls(&self) -> usize {
            *self.upsert_calls.lock().unwrap()
        }

        pub fn get(&self, id: OrderId) -> Option<Order> {
            self.rows.lock().unwrap().get(&id).cloned()
        }
    }

    #[async_trait]
    impl OrderStore for MockOrderStore {
        async fn upsert(&self, order: &Order) -> Result<()> {
            let call = {
                let mut calls = self.upsert_calls.lock().unwrap();
                *calls += 1;
                *calls
            };

            match self.behavior {
                MockBehavior::Success => {}
                MockBehavior::FailTimes(n) if call <= n => {
                    return Err(AppError::Persistence(format!(
                        "injected failure on attempt {}",
                        call
                    )));
                }
                MockBehavior::FailTimes(_) => {}
                MockBehavior::AlwaysFail => {
                    return Err(AppError::Persistence("injected failure".to_string()));
                }
            }

            self.rows.lock().unwrap().insert(order.id, order.clone());
            Ok(())
        }

        async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>> {
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn count(&self) -> Result<i64> {
            Ok(self.rows.lock().unwrap().len() as i64)
        }
    }
}
