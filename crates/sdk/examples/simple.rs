//! Walks the full RPC surface against a running daemon.
//!
//! Start the daemon first (`cargo run --package orderflow-daemon`),
//! then run this with `cargo run --example simple`.

use orderflow_sdk::OrderflowClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = OrderflowClient::connect("http://127.0.0.1:7140").await?;

    let health = client.health().await?;
    println!("daemon status: {}", health.status);

    let accepted = client.enqueue(1001, "mechanical keyboard").await?;
    println!("{} (order {})", accepted.message, accepted.order_id);

    // Give the worker a cycle to pick the record up.
    println!("waiting 3s for the worker...");
    tokio::time::sleep(tokio::time::Duration::from_secs(3)).await;

    let stats = client.stats().await?;
    println!("queued:           {}", stats.queued);
    println!("dead letters:     {}", stats.dead_letters);
    println!("persisted orders: {}", stats.persisted_orders);
    println!("uptime:           {}s", stats.uptime_seconds);

    Ok(())
}
