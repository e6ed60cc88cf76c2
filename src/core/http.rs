use crate::core::ConfigProvider;
use crate::utils::error::{LocatorError, Result};
use reqwest::{Client, Response};

/// Builds the client shared by both lookups. Every request it sends carries
/// the configured timeout.
pub fn build_client<C: ConfigProvider + ?Sized>(config: &C) -> Result<Client> {
    Client::builder()
        .timeout(config.request_timeout())
        .user_agent(config.user_agent())
        .build()
        .map_err(|e| LocatorError::ConfigError {
            message: format!("Failed to build HTTP client: {}", e),
        })
}

/// Sends a GET and turns transport failures and non-2xx statuses into
/// [`LocatorError::NetworkError`].
pub async fn get_success(client: &Client, endpoint: &str) -> Result<Response> {
    tracing::debug!("📡 GET {}", endpoint);

    let response = client.get(endpoint).send().await.map_err(|e| {
        let message = if e.is_timeout() {
            format!("request timed out: {}", e)
        } else {
            e.to_string()
        };
        LocatorError::network(endpoint, message)
    })?;

    tracing::debug!("📡 {} responded with status {}", endpoint, response.status());

    if !response.status().is_success() {
        return Err(LocatorError::network(
            endpoint,
            format!("API request failed with status: {}", response.status()),
        ));
    }

    Ok(response)
}
