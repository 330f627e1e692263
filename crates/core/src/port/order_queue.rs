// Order Queue Port

use async_trait::async_trait;

use crate::error::Result;

/// Durable FIFO buffer between intake (producer) and the worker (the
/// sole consumer). Records are opaque strings; the queue never inspects
/// their content.
#[async_trait]
pub trait OrderQueue: Send + Sync {
    /// Append a record at the tail.
    async fn push(&self, record: &str) -> Result<()>;

    /// Remove and return the head record, or `None` when the queue is
    /// empty. Destructive: the record is gone once this returns.
    async fn pop(&self) -> Result<Option<String>>;

    /// Number of records currently buffered.
    async fn depth(&self) -> Result<i64>;

    /// Park an unprocessable record together with the failure reason.
    async fn dead_letter(&self, record: &str, reason: &str) -> Result<()>;

    /// Number of parked records.
    async fn dead_letter_count(&self) -> Result<i64>;

    /// Move every parked record back to the queue tail, oldest failure
    /// first. Returns how many records were moved.
    async fn redrive_dead_letters(&self) -> Result<u64>;
}

/// Mock implementations for testing
pub mod mocks {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// In-memory queue with inspectable dead letters
    pub struct InMemoryOrderQueue {
        entries: Mutex<VecDeque<String>>,
        dead: Mutex<Vec<(String, String)>>,
    }

    impl InMemoryOrderQueue {
        pub fn new() -> Self {
            Self {
                entries: Mutex::new(VecDeque::new()),
                dead: Mutex::new(Vec::new()),
            }
        }

        /// Seed a raw record directly, bypassing intake validation.
        pub fn seed(&self, record: impl Into<String>) {
            self.entries.lock().unwrap().push_back(record.into());
        }

        /// Snapshot of parked (record, reason) pairs.
        pub fn dead_letters(&self) -> Vec<(String, String)> {
            self.dead.lock().unwrap().clone()
        }
    }

    impl Default for InMemoryOrderQueue {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl OrderQueue for InMemoryOrderQueue {
        async fn push(&self, record: &str) -> Result<()> {
            self.entries.lock().unwrap().push_back(record.to_string());
            Ok(())
        }

        async fn pop(&self) -> Result<Option<String>> {
            Ok(self.entries.lock().unwrap().pop_front())
        }

        async fn depth(&self) -> Result<i64> {
            Ok(self.entries.lock().unwrap().len() as i64)
        }

        async fn dead_letter(&self, record: &str, reason: &str) -> Result<()> {
            self.dead
                .lock()
                .unwrap()
                .push((record.to_string(), reason.to_string()));
            Ok(())
        }

        async fn dead_letter_count(&self) -> Result<i64> {
            Ok(self.dead.lock().unwrap().len() as i64)
        }

        async fn redrive_dead_letters(&self) -> Result<u64> {
            let mut dead = self.dead.lock().unwrap();
            let mut entries = self.entries.lock().unwrap();

            let moved = dead.len() as u64;
            for (record, _reason) in dead.drain(..) {
                entries.push_back(record);
            }

            Ok(moved)
        }
    }
}
