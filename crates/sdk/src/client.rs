//! Orderflow Client Implementation

use crate::error::{Result, SdkError};
use crate::types::{EnqueueResponse, HealthResponse, RedriveResponse, StatsResponse};
use jsonrpsee::core::client::ClientT;
use jsonrpsee::core::params::ObjectParams;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Orderflow daemon client
///
/// Parameters go over the wire by name, matching the daemon's request
/// structs field for field.
///
/// # Example
///
/// ```no_run
/// use orderflow_sdk::OrderflowClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = OrderflowClient::connect("http://127.0.0.1:7140").await?;
/// # Ok(())
/// # }
/// ```
pub struct OrderflowClient {
    inner: HttpClient,
}

impl OrderflowClient {
    /// Connect to the Orderflow daemon
    ///
    /// # Arguments
    ///
    /// * `url` - RPC endpoint URL (e.g., `http://127.0.0.1:7140`)
    pub async fn connect(url: impl AsRef<str>) -> Result<Self> {
        let inner = HttpClientBuilder::default()
            .request_timeout(REQUEST_TIMEOUT)
            .build(url.as_ref())
            .map_err(|e| SdkError::Connection(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { inner })
    }

    /// Submit an order
    ///
    /// Success means the daemon queued the order durably; persistence
    /// happens afterwards on the worker's schedule.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use orderflow_sdk::OrderflowClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = OrderflowClient::connect("http://127.0.0.1:7140").await?;
    /// let response = client.enqueue(1, "widget").await?;
    /// println!("{}", response.message);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn enqueue(&self, id: i64, item: impl Into<String>) -> Result<EnqueueResponse> {
        let mut params = ObjectParams::new();
        params.insert("id", id)?;
        params.insert("item", item.into())?;

        let response: EnqueueResponse = self.inner.request("orders.enqueue.v1", params).await?;
        Ok(response)
    }

    /// Check daemon liveness
    pub async fn health(&self) -> Result<HealthResponse> {
        let response: HealthResponse = self
            .inner
            .request("system.health.v1", ObjectParams::new())
            .await?;
        Ok(response)
    }

    /// Fetch queue and store counters
    pub async fn stats(&self) -> Result<StatsResponse> {
        let response: StatsResponse = self
            .inner
            .request("admin.stats.v1", ObjectParams::new())
            .await?;
        Ok(response)
    }

    /// Move dead letters back onto the queue
    pub async fn redrive(&self) -> Result<RedriveResponse> {
        let response: RedriveResponse = self
            .inner
            .request("admin.redrive.v1", ObjectParams::new())
            .await?;
        Ok(response)
    }
}
