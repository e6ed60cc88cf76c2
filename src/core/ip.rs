use crate::core::http::get_success;
use crate::core::IpResolver;
use crate::utils::error::{LocatorError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

pub const DEFAULT_IP_ENDPOINT: &str = "https://api.ipify.org?format=json";

/// Asks a "what is my IP" service for the caller's public address.
pub struct HttpIpResolver {
    client: Client,
    endpoint: String,
}

impl HttpIpResolver {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl IpResolver for HttpIpResolver {
    async fn resolve_public_ip(&self) -> Result<String> {
        let response = get_success(&self.client, &self.endpoint).await?;

        // A body we cannot read is reported like any other network failure.
        let body: Value = response.json().await.map_err(|e| {
            LocatorError::network(&self.endpoint, format!("invalid response body: {}", e))
        })?;

        let ip = body
            .as_object()
            .and_then(|obj| obj.get("ip"))
            .and_then(Value::as_str)
            .map(|ip| ip.trim().to_string())
            .filter(|ip| !ip.is_empty())
            .ok_or_else(|| LocatorError::network(&self.endpoint, "response has no `ip` field"))?;

        tracing::debug!("🌐 Public IP resolved: {}", ip);
        Ok(ip)
    }
}
