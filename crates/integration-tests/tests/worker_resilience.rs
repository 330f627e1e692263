//! Worker resilience tests
//!
//! Failure injection against the real SQLite queue: malformed records,
//! transient and permanent store failures, dead letter redrive, and a
//! full drain loop with graceful shutdown.

use std::sync::Arc;
use std::time::{Duration, Instant};

use orderflow_core::application::intake::{IntakeService, OrderSubmission};
use orderflow_core::application::retry::RetryPolicy;
use orderflow_core::application::worker::{shutdown_channel, Worker, WorkerConfig};
use orderflow_core::domain::{codec, Order};
use orderflow_core::port::order_store::mocks::{MockBehavior, MockOrderStore};
use orderflow_core::port::time_provider::SystemTimeProvider;
use orderflow_core::port::{OrderQueue, OrderStore};
use orderflow_infra_sqlite::{
    create_pool, run_queue_migrations, run_store_migrations, SqliteOrderQueue, SqliteOrderStore,
};

fn fast_config() -> WorkerConfig {
    WorkerConfig {
        process_interval: Duration::from_millis(5),
        idle_interval: Duration::from_millis(5),
    }
}

fn fast_policy() -> RetryPolicy {
    RetryPolicy::new(1, 2.0, 3)
}

/// Malformed record is parked and the queue keeps flowing
#[tokio::test]
async fn test_malformed_record_parked_flow_continues() {
    let pool = create_pool(":memory:").await.unwrap();
    run_queue_migrations(&pool).await.unwrap();
    let queue = Arc::new(SqliteOrderQueue::new(
        pool.clone(),
        Arc::new(SystemTimeProvider),
    ));
    let store = Arc::new(MockOrderStore::new_success());

    // A record that is not valid JSON, ahead of a valid one
    queue.push("{{{garbage").await.unwrap();
    queue
        .push(&codec::encode(&Order::new(5, "widget").unwrap()))
        .await
        .unwrap();

    let worker = Worker::new(queue.clone(), store.clone(), fast_policy(), fast_config());

    assert!(worker.drain_next().await.unwrap());
    assert!(worker.drain_next().await.unwrap());
    assert!(!worker.drain_next().await.unwrap());

    assert_eq!(queue.dead_letter_count().await.unwrap(), 1);
    assert_eq!(store.get(5).unwrap().item, "widget");

    // The parked record and reason are preserved verbatim
    let (record, reason): (String, String) =
        sqlx::query_as("SELECT record, reason FROM dead_letters")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(record, "{{{garbage");
    assert!(!reason.is_empty());

    println!("✅ Bad record parked, valid record persisted");
}

/// Transient store failures are retried until the upsert lands
#[tokio::test]
async fn test_transient_store_failure_retried() {
    let pool = create_pool(":memory:").await.unwrap();
    run_queue_migrations(&pool).await.unwrap();
    let queue = Arc::new(SqliteOrderQueue::new(pool, Arc::new(SystemTimeProvider)));
    let store = Arc::new(MockOrderStore::new(MockBehavior::FailTimes(2)));

    queue
        .push(&codec::encode(&Order::new(8, "flaky").unwrap()))
        .await
        .unwrap();

    let worker = Worker::new(queue.clone(), store.clone(), fast_policy(), fast_config());
    assert!(worker.drain_next().await.unwrap());

    assert_eq!(store.upsert_calls(), 3);
    assert_eq!(store.get(8).unwrap().item, "flaky");
    assert_eq!(queue.dead_letter_count().await.unwrap(), 0);

    println!("✅ Third attempt landed after two injected failures");
}

/// Exhausted retries park the original record with the failure reason
#[tokio::test]
async fn test_exhausted_retries_dead_letter() {
    let pool = create_pool(":memory:").await.unwrap();
    run_queue_migrations(&pool).await.unwrap();
    let queue = Arc::new(SqliteOrderQueue::new(
        pool.clone(),
        Arc::new(SystemTimeProvider),
    ));
    let store = Arc::new(MockOrderStore::new(MockBehavior::AlwaysFail));

    let encoded = codec::encode(&Order::new(13, "doomed").unwrap());
    queue.push(&encoded).await.unwrap();

    let worker = Worker::new(queue.clone(), store.clone(), fast_policy(), fast_config());
    assert!(worker.drain_next().await.unwrap());

    assert_eq!(store.upsert_calls(), 3);
    assert_eq!(queue.depth().await.unwrap(), 0);
    assert_eq!(queue.dead_letter_count().await.unwrap(), 1);

    let (record, reason): (String, String) =
        sqlx::query_as("SELECT record, reason FROM dead_letters")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(record, encoded);
    assert!(reason.contains("injected failure"));

    println!("✅ Record parked with reason after 3 failed attempts");
}

/// Redriven dead letters flow to the store once the fault clears
#[tokio::test]
async fn test_redrive_recovers_after_fault_clears() {
    let pool = create_pool(":memory:").await.unwrap();
    run_queue_migrations(&pool).await.unwrap();
    let queue = Arc::new(SqliteOrderQueue::new(pool, Arc::new(SystemTimeProvider)));

    queue
        .push(&codec::encode(&Order::new(21, "retry-me").unwrap()))
        .await
        .unwrap();

    // Store is down: the record ends up parked
    let broken_store = Arc::new(MockOrderStore::new(MockBehavior::AlwaysFail));
    let worker = Worker::new(
        queue.clone(),
        broken_store.clone(),
        fast_policy(),
        fast_config(),
    );
    worker.drain_next().await.unwrap();
    assert_eq!(queue.dead_letter_count().await.unwrap(), 1);

    // Operator redrives once the store is healthy again
    assert_eq!(queue.redrive_dead_letters().await.unwrap(), 1);
    assert_eq!(queue.depth().await.unwrap(), 1);
    assert_eq!(queue.dead_letter_count().await.unwrap(), 0);

    let healthy_store = Arc::new(MockOrderStore::new_success());
    let worker = Worker::new(
        queue.clone(),
        healthy_store.clone(),
        fast_policy(),
        fast_config(),
    );
    worker.drain_next().await.unwrap();

    assert_eq!(healthy_store.get(21).unwrap().item, "retry-me");
    assert_eq!(queue.depth().await.unwrap(), 0);

    println!("✅ Dead letter redriven and persisted on the second pass");
}

/// Full drain loop: spawned worker empties the queue, then stops on signal
#[tokio::test]
async fn test_worker_loop_drains_and_shuts_down() {
    let queue_db = "/tmp/orderflow_test_loop_queue.db";
    let store_db = "/tmp/orderflow_test_loop_store.db";
    for path in [queue_db, store_db] {
        let _ = std::fs::remove_file(path);
        let _ = std::fs::remove_file(format!("{}-wal", path));
        let _ = std::fs::remove_file(format!("{}-shm", path));
    }

    let queue_pool = create_pool(queue_db).await.unwrap();
    run_queue_migrations(&queue_pool).await.unwrap();
    let store_pool = create_pool(store_db).await.unwrap();
    run_store_migrations(&store_pool).await.unwrap();

    let queue = Arc::new(SqliteOrderQueue::new(queue_pool, Arc::new(SystemTimeProvider)));
    let store = Arc::new(SqliteOrderStore::new(store_pool, Arc::new(SystemTimeProvider)));

    let service = IntakeService::new(queue.clone());
    for id in [1, 2, 3] {
        service
            .submit(OrderSubmission {
                id,
                item: format!("loop-{}", id),
            })
            .await
            .unwrap();
    }

    let worker = Worker::new(queue.clone(), store.clone(), fast_policy(), fast_config());
    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    let handle = tokio::spawn(async move { worker.run(shutdown_rx).await });

    // Wait for the loop to drain all three submissions
    let deadline = Instant::now() + Duration::from_secs(5);
    while store.count().await.unwrap() < 3 {
        assert!(Instant::now() < deadline, "Worker did not drain in time");
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    shutdown_tx.shutdown();
    let run_result = tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("Worker should stop promptly after shutdown")
        .expect("Worker task should not panic");
    run_result.unwrap();

    assert_eq!(queue.depth().await.unwrap(), 0);
    assert_eq!(store.find_by_id(2).await.unwrap().unwrap().item, "loop-2");

    for path in [queue_db, store_db] {
        let _ = std::fs::remove_file(path);
        let _ = std::fs::remove_file(format!("{}-wal", path));
        let _ = std::fs::remove_file(format!("{}-shm", path));
    }
    println!("✅ Loop drained the queue and honored shutdown");
}

/// Empty queue reports nothing consumed
#[tokio::test]
async fn test_drain_next_empty_queue_is_noop() {
    let pool = create_pool(":memory:").await.unwrap();
    run_queue_migrations(&pool).await.unwrap();
    let queue = Arc::new(SqliteOrderQueue::new(pool, Arc::new(SystemTimeProvider)));
    let store = Arc::new(MockOrderStore::new_success());

    let worker = Worker::new(queue.clone(), store.clone(), fast_policy(), fast_config());
    assert!(!worker.drain_next().await.unwrap());
    assert_eq!(store.upsert_calls(), 0);

    println!("✅ Nothing to drain, nothing touched");
}
