use crate::domain::model::Service;
use crate::utils::error::{Result, StorefrontError};
use reqwest::Client;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::time::Duration;

const FALLBACK_CATALOG: &str = include_str!("../../data/fallback_services.json");

pub const DEFAULT_CATALOG_TIMEOUT: Duration = Duration::from_millis(10_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    Remote,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub services: Vec<Service>,
    pub source: CatalogSource,
}

impl Catalog {
    pub fn fallback() -> Self {
        Self {
            services: fallback_services(),
            source: CatalogSource::Fallback,
        }
    }

    pub fn get(&self, index: usize) -> Option<&Service> {
        self.services.get(index)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

/// The catalog bundled into the binary.
pub fn fallback_services() -> Vec<Service> {
    serde_json::from_str(FALLBACK_CATALOG).expect("bundled fallback catalog must be valid JSON")
}

pub struct CatalogLoader {
    client: Client,
    placeholder_marker: String,
}

impl CatalogLoader {
    pub fn new(placeholder_marker: impl Into<String>) -> Self {
        Self::with_client(Client::new(), placeholder_marker)
    }

    pub fn with_client(client: Client, placeholder_marker: impl Into<String>) -> Self {
        Self {
            client,
            placeholder_marker: placeholder_marker.into(),
        }
    }

    /// Loads the remote catalog, substituting the bundled one on any
    /// failure. Never returns an empty catalog.
    pub async fn load(&self, endpoint: &str, timeout: Duration) -> Catalog {
        match self.fetch_remote(endpoint, timeout).await {
            Ok(services) => {
                tracing::info!("📦 Loaded {} services from remote catalog", services.len());
                Catalog {
                    services,
                    source: CatalogSource::Remote,
                }
            }
            Err(e) => {
                tracing::warn!("⚠️ Using fallback catalog: {}", e);
                Catalog::fallback()
            }
        }
    }

    async fn fetch_remote(&self, endpoint: &str, timeout: Duration) -> Result<Vec<Service>> {
        if endpoint.contains(&self.placeholder_marker) {
            return Err(unavailable("endpoint is not configured yet"));
        }

        tracing::debug!("Requesting services from: {}", endpoint);

        let response = self
            .client
            .get(endpoint)
            .query(&[("op", "services")])
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| unavailable(describe_request_error(&e, timeout)))?;

        tracing::debug!("Catalog response status: {}", response.status());

        if !response.status().is_success() {
            return Err(unavailable(format!("HTTP error status {}", response.status())));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| unavailable(describe_request_error(&e, timeout)))?;

        parse_services(json)
    }
}

/// 單一服務可接受的最高價格
pub const MAX_SERVICE_PRICE: u64 = 1_000_000_000;

fn max_service_price() -> Decimal {
    Decimal::from(MAX_SERVICE_PRICE)
}

/// 驗證 `{ "data": [...] }` 格式並取出有效的服務
pub fn parse_services(json: serde_json::Value) -> Result<Vec<Service>> {
    let items = match json {
        serde_json::Value::Object(mut obj) => match obj.remove("data") {
            Some(serde_json::Value::Array(items)) => items,
            _ => return Err(unavailable("response has no 'data' array")),
        },
        _ => return Err(unavailable("response is not a JSON object")),
    };

    if items.is_empty() {
        return Err(unavailable("remote catalog is empty"));
    }

    let mut seen = HashSet::new();
    let mut services = Vec::with_capacity(items.len());

    for (index, item) in items.into_iter().enumerate() {
        let service: Service = match serde_json::from_value(item) {
            Ok(service) => service,
            Err(e) => {
                tracing::warn!("Skipping catalog entry #{}: {}", index, e);
                continue;
            }
        };

        if service.title.trim().is_empty() {
            tracing::warn!("Skipping catalog entry #{}: empty title", index);
            continue;
        }
        if service.price < Decimal::ZERO {
            tracing::warn!(
                "Skipping catalog entry '{}': negative price {}",
                service.title,
                service.price
            );
            continue;
        }
        if service.price > max_service_price() {
            tracing::warn!(
                "Skipping catalog entry '{}': price {} above {}",
                service.title,
                service.price,
                MAX_SERVICE_PRICE
            );
            continue;
        }
        if !seen.insert(service.title.clone()) {
            tracing::warn!("Skipping duplicate catalog entry '{}'", service.title);
            continue;
        }

        services.push(service);
    }

    if services.is_empty() {
        return Err(unavailable("no valid services in remote catalog"));
    }

    Ok(services)
}

fn unavailable(reason: impl Into<String>) -> StorefrontError {
    StorefrontError::CatalogUnavailable {
        reason: reason.into(),
    }
}

fn describe_request_error(error: &reqwest::Error, timeout: Duration) -> String {
    if error.is_timeout() {
        format!("no response within {} ms", timeout.as_millis())
    } else {
        error.to_string()
    }
}
