use crate::domain::model::{CartSnapshot, Confirmation, CustomerFields, Order};
use crate::domain::ports::OrderTransport;
use crate::utils::error::{Result, StorefrontError};
use crate::utils::validation::validate_submission_endpoint;
use chrono::Utc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct SubmitterSettings {
    /// Substring a real submission URL must contain.
    pub required_path_marker: String,
    /// Substring marking an endpoint that was never configured.
    pub placeholder_marker: String,
    pub simulated_delay: Duration,
    /// `None` leaves the transport's own default in place.
    pub timeout: Option<Duration>,
}

impl Default for SubmitterSettings {
    fn default() -> Self {
        Self {
            required_path_marker: "/exec".to_string(),
            placeholder_marker: "REPLACE".to_string(),
            simulated_delay: Duration::from_millis(1500),
            timeout: None,
        }
    }
}

pub struct OrderSubmitter<T: OrderTransport> {
    transport: T,
    settings: SubmitterSettings,
}

impl<T: OrderTransport> OrderSubmitter<T> {
    pub fn new(transport: T, settings: SubmitterSettings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    pub fn settings(&self) -> &SubmitterSettings {
        &self.settings
    }

    /// Builds an order from `snapshot` and dispatches it.
    ///
    /// An empty cart or a misconfigured endpoint is rejected before any
    /// network call. Success means the request was sent without a
    /// transport error; the caller is responsible for clearing the cart.
    pub async fn submit(
        &self,
        snapshot: &CartSnapshot,
        customer: CustomerFields,
        endpoint: &str,
    ) -> Result<Confirmation> {
        if snapshot.is_empty() {
            return Err(StorefrontError::EmptyCart);
        }

        let simulated = endpoint.contains(&self.settings.placeholder_marker);
        if !simulated {
            validate_submission_endpoint(endpoint, &self.settings.required_path_marker)?;
        }

        let order = Order::from_snapshot(snapshot, customer);
        let body = order.to_request_body()?;

        if simulated {
            // 後端尚未設定：模擬送出
            tokio::time::sleep(self.settings.simulated_delay).await;
            tracing::info!("🧪 Order simulated ({} lines, total {})", order.cart.len(), order.total);
            tracing::debug!("Simulated order body: {}", body);
        } else {
            tracing::info!(
                "📤 Dispatching order ({} lines, total {})",
                order.cart.len(),
                order.total
            );
            self.transport
                .dispatch(endpoint, body, self.settings.timeout)
                .await?;
        }

        Ok(Confirmation {
            order,
            dispatched_at: Utc::now(),
            simulated,
        })
    }
}
