//! Orderflow Daemon - Main Entry Point
//!
//! Composition root: wires the SQLite adapters into the core services,
//! starts the JSON-RPC server and the worker, and owns shutdown.

mod config;

use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{Config, LogFormat};
use orderflow_api_rpc::handler::{RateLimitConfig, RpcHandler};
use orderflow_api_rpc::{RpcServer, RpcServerConfig};
use orderflow_core::application::retry::RetryPolicy;
use orderflow_core::application::worker::{shutdown_channel, Worker, WorkerConfig};
use orderflow_core::port::time_provider::SystemTimeProvider;
use orderflow_core::port::{OrderQueue, OrderStore};
use orderflow_infra_sqlite::{
    create_pool, run_queue_migrations, run_store_migrations, SqliteOrderQueue, SqliteOrderStore,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load configuration first; the log format depends on it. A bad
    //    value aborts startup here, before anything is wired up.
    let cfg = Config::from_env().map_err(|e| anyhow::anyhow!("{}", e))?;

    // 2. Initialize logging
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("orderflow=info"))
        .expect("Default log filter must parse");

    match cfg.log_format {
        LogFormat::Json => {
            // JSON lines for log shippers
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        LogFormat::Pretty => {
            // Human-readable output for development
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }

    info!("Orderflow v{} starting...", VERSION);
    info!(
        queue_db = %cfg.queue_db_path,
        store_db = %cfg.store_db_path,
        "Initializing databases..."
    );

    // 3. Initialize databases. The queue and the order store are
    //    separate files with separate migration chains.
    let queue_pool = create_pool(&cfg.queue_db_path)
        .await
        .map_err(|e| anyhow::anyhow!("Queue DB pool creation failed: {}", e))?;
    run_queue_migrations(&queue_pool)
        .await
        .map_err(|e| anyhow::anyhow!("Queue migration failed: {}", e))?;

    let store_pool = create_pool(&cfg.store_db_path)
        .await
        .map_err(|e| anyhow::anyhow!("Store DB pool creation failed: {}", e))?;
    run_store_migrations(&store_pool)
        .await
        .map_err(|e| anyhow::anyhow!("Store migration failed: {}", e))?;

    // 4. Wire adapters into the core ports
    let time_provider = Arc::new(SystemTimeProvider);
    let queue: Arc<dyn OrderQueue> =
        Arc::new(SqliteOrderQueue::new(queue_pool, time_provider.clone()));
    let store: Arc<dyn OrderStore> =
        Arc::new(SqliteOrderStore::new(store_pool, time_provider.clone()));

    // 5. Start JSON-RPC server
    info!("Starting intake API...");
    let handler = Arc::new(RpcHandler::new(
        queue.clone(),
        store.clone(),
        RateLimitConfig {
            burst: cfg.rate_limit_burst,
            rate_per_sec: cfg.rate_limit_rate,
        },
    ));
    let rpc_handle = RpcServer::new(
        RpcServerConfig {
            host: cfg.rpc_host.clone(),
            port: cfg.rpc_port,
        },
        handler,
    )
    .start()
    .await
    .map_err(|e| anyhow::anyhow!("Failed to start RPC server: {}", e))?;

    // 6. Start Worker (queue drain loop)
    info!("Starting drain worker...");
    let (shutdown_tx, shutdown_rx) = shutdown_channel();

    let worker = Worker::new(
        queue.clone(),
        store.clone(),
        RetryPolicy::default(),
        WorkerConfig {
            process_interval: cfg.process_interval,
            idle_interval: cfg.idle_interval,
        },
    );

    let worker_handle = tokio::spawn(async move {
        if let Err(e) = worker.run(shutdown_rx).await {
            tracing::error!(error = ?e, "Worker exited with error");
        }
    });

    info!(
        "System ready. Accepting orders on {}:{}",
        cfg.rpc_host, cfg.rpc_port
    );
    info!("Ctrl+C to stop");

    // 7. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received, draining...");

    // 8. Graceful shutdown: stop intake, then let the worker finish its
    //    current record before the timeout expires.
    shutdown_tx.shutdown();
    rpc_handle
        .stop()
        .map_err(|e| anyhow::anyhow!("Failed to stop RPC server: {}", e))?;
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), worker_handle).await;

    info!("Shutdown finished.");

    Ok(())
}
