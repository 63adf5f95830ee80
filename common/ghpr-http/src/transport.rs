//! HTTP transport used to send task requests

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::HeaderMap;
use serde_json::Value;
use std::time::Duration;

/// Capability to send a JSON POST request
///
/// The associated `Response` is handed back to callers untouched, so an
/// implementation decides what "the response" is. [`ReqwestTransport`]
/// returns the raw `reqwest::Response`.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    type Response: Send;

    /// POST `json` to `url` with the given headers
    ///
    /// # Errors
    /// Returns an error if the request could not be sent. HTTP error
    /// statuses are not errors at this level.
    async fn post(&self, url: &str, headers: HeaderMap, json: &Value) -> Result<Self::Response>;
}

/// Transport backed by a shared `reqwest::Client`
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with reqwest's default client settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport whose requests fail after `timeout`
    ///
    /// # Errors
    /// Returns an error if the underlying client cannot be built
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::from_client(client))
    }

    /// Wrap an existing client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    type Response = reqwest::Response;

    async fn post(&self, url: &str, headers: HeaderMap, json: &Value) -> Result<Self::Response> {
        let response = self
            .client
            .post(url)
            .headers(headers)
            .json(json)
            .send()
            .await?;
        Ok(response)
    }
}
