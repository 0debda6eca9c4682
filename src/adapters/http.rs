use crate::domain::ports::OrderTransport;
use crate::utils::error::{Result, StorefrontError};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

/// Posts orders as `text/plain` so the gateway accepts them cross-origin.
/// The response body is never read.
#[derive(Debug, Clone, Default)]
pub struct HttpOrderTransport {
    client: Client,
}

impl HttpOrderTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrderTransport for HttpOrderTransport {
    async fn dispatch(
        &self,
        endpoint: &str,
        body: String,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let mut request = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, "text/plain")
            .body(body);

        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!("Posting order to: {}", endpoint);

        let response = request
            .send()
            .await
            .map_err(|e| StorefrontError::SubmitTransport {
                reason: e.to_string(),
            })?;

        // 閘道回應不透明，只記錄狀態碼
        if response.status().is_success() {
            tracing::debug!("Order endpoint answered {}", response.status());
        } else {
            tracing::warn!(
                "Order endpoint answered {}; treating dispatch as sent",
                response.status()
            );
        }

        Ok(())
    }
}
