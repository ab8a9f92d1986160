//! HTTP authority client for the host server's capability endpoints

use async_trait::async_trait;
use serde::Deserialize;

use crate::authority::{Authority, error::AuthorityError};

/// Path of the capability query endpoint.
pub const QUERY_ENDPOINT: &str = "/cg_cache_node_query";

/// Path of the conversion request endpoint.
pub const REQUEST_ENDPOINT: &str = "/cg_cache_node_request";

/// Configuration for the HTTP authority client
#[derive(Clone, Debug)]
pub struct HttpAuthorityConfig {
    /// Host server URL (default: http://localhost:8188)
    pub host: String,
}

impl Default for HttpAuthorityConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost:8188".to_string(),
        }
    }
}

/// Response body shared by both capability endpoints
#[derive(Debug, Deserialize)]
pub struct CapabilityResponse {
    pub response: bool,
}

/// HTTP implementation of [`Authority`].
///
/// Each call is one `POST` with a single form field `type` carrying the stable
/// node-type identifier; the body is JSON `{"response": <bool>}`.
#[derive(Clone)]
pub struct HttpAuthority {
    client: reqwest::Client,
    config: HttpAuthorityConfig,
}

impl HttpAuthority {
    /// Create a client against the default host (http://localhost:8188).
    pub fn new() -> Self {
        Self::with_config(HttpAuthorityConfig::default())
    }

    /// Create a client against a custom host URL.
    pub fn at(host: impl Into<String>) -> Self {
        Self::with_config(HttpAuthorityConfig { host: host.into() })
    }

    pub fn with_config(config: HttpAuthorityConfig) -> Self {
        HttpAuthority {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn call(&self, type_id: &str, endpoint: &str) -> Result<bool, AuthorityError> {
        let response = self
            .client
            .post(format!("{}{}", self.config.host, endpoint))
            .form(&[("type", type_id)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AuthorityError::InvalidResponse(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let text = response.text().await?;
        let body: CapabilityResponse = serde_json::from_str(&text)?;
        Ok(body.response)
    }
}

impl Default for HttpAuthority {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Authority for HttpAuthority {
    async fn query(&self, type_id: &str) -> Result<bool, AuthorityError> {
        self.call(type_id, QUERY_ENDPOINT).await
    }

    async fn convert(&self, type_id: &str) -> Result<bool, AuthorityError> {
        self.call(type_id, REQUEST_ENDPOINT).await
    }
}
