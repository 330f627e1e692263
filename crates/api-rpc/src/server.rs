//! Server bootstrap.
//!
//! Binds the RPC surface to localhost TCP and routes each method to
//! its handler.

use crate::handler::RpcHandler;
use crate::types::EnqueueRequest;
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::RpcModule;
use std::sync::Arc;
use tracing::info;

const DEFAULT_RPC_HOST: &str = "127.0.0.1";
const DEFAULT_RPC_PORT: u16 = 7140;

/// Listen address for the intake endpoint.
pub struct RpcServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RPC_HOST.to_string(),
            port: DEFAULT_RPC_PORT,
        }
    }
}

pub struct RpcServer {
    config: RpcServerConfig,
    handler: Arc<RpcHandler>,
}

impl RpcServer {
    pub fn new(config: RpcServerConfig, handler: Arc<RpcHandler>) -> Self {
        Self { config, handler }
    }

    /// Bind the listener and register the method table.
    ///
    /// Defaults bind to 127.0.0.1 only; exposing the port is an
    /// explicit operator decision.
    pub async fn start(self) -> Result<ServerHandle, String> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        info!(addr = %addr, "Starting JSON-RPC server");

        let server = Server::builder()
            .build(&addr)
            .await
            .map_err(|e| format!("Failed to bind {}: {}", addr, e))?;

        let module = rpc_module(self.handler)?;

        let handle = server.start(module);
        info!("JSON-RPC server ready");
        Ok(handle)
    }
}

/// Wire each versioned method name to its handler method.
fn rpc_module(handler: Arc<RpcHandler>) -> Result<RpcModule<()>, String> {
    let mut module = RpcModule::new(());

    let h = handler.clone();
    module
        .register_async_method("orders.enqueue.v1", move |params, _, _| {
            let h = h.clone();
            async move {
                let req: EnqueueRequest = params.parse()?;
                h.enqueue(req).await
            }
        })
        .map_err(|e| e.to_string())?;

    // The admin and health methods take no parameters; whatever the
    // client sends as params is ignored.
    let h = handler.clone();
    module
        .register_async_method("system.health.v1", move |_params, _, _| {
            let h = h.clone();
            async move { h.health().await }
        })
        .map_err(|e| e.to_string())?;

    let h = handler.clone();
    module
        .register_async_method("admin.stats.v1", move |_params, _, _| {
            let h = h.clone();
            async move { h.stats().await }
        })
        .map_err(|e| e.to_string())?;

    let h = handler;
    module
        .register_async_method("admin.redrive.v1", move |_params, _, _| {
            let h = h.clone();
            async move { h.redrive().await }
        })
        .map_err(|e| e.to_string())?;

    Ok(module)
}
