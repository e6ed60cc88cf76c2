use crate::core::http::get_success;
use crate::core::Geolocator;
use crate::utils::error::{LocatorError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

pub const DEFAULT_GEOLOCATION_ENDPOINT: &str = "https://ipinfo.io/{ip}/json";
pub const IP_PLACEHOLDER: &str = "{ip}";

/// IP geolocation over HTTP. The endpoint is a template with an `{ip}`
/// placeholder, e.g. `https://ipinfo.io/{ip}/json`.
pub struct HttpGeolocator {
    client: Client,
    endpoint_template: String,
}

impl HttpGeolocator {
    pub fn new(client: Client, endpoint_template: impl Into<String>) -> Self {
        Self {
            client,
            endpoint_template: endpoint_template.into(),
        }
    }

    fn build_endpoint(&self, ip: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(ip.as_bytes()).collect();
        self.endpoint_template.replace(IP_PLACEHOLDER, &encoded)
    }
}

#[async_trait]
impl Geolocator for HttpGeolocator {
    async fn locate(&self, ip: &str) -> Result<String> {
        let endpoint = self.build_endpoint(ip);
        let response = get_success(&self.client, &endpoint).await?;

        let text = response.text().await.map_err(|e| {
            LocatorError::network(&endpoint, format!("failed to read response body: {}", e))
        })?;

        // Anything but a JSON object carries no `loc` either.
        let body: Value = serde_json::from_str(&text).map_err(|e| {
            tracing::debug!("📡 {} returned a non-JSON body: {}", endpoint, e);
            LocatorError::missing_field(&endpoint, "loc")
        })?;

        match body.as_object().and_then(|obj| obj.get("loc")).and_then(Value::as_str) {
            Some(loc) if !loc.trim().is_empty() => Ok(loc.to_string()),
            _ => Err(LocatorError::missing_field(&endpoint, "loc")),
        }
    }
}
