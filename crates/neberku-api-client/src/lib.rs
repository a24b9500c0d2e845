//! HTTP client for the Neberku backend.
//!
//! Covers the guest side of the API: reading an event's media policy and
//! posting a contribution. Guests post anonymously; hosts may pass a bearer
//! token. The CLI uses this client directly and through the
//! `SubmissionTransport` seam.

pub mod api;
pub mod errors;

use anyhow::{Context, Result};
use neberku_core::ClientConfig;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub use errors::{flatten_error_body, ApiStatusError};

/// Authentication strategy for the API.
#[derive(Clone, Debug)]
pub enum Auth {
    /// No credentials; public guest endpoints
    Anonymous,
    /// `Authorization: Bearer {token}`
    Bearer(String),
}

/// HTTP client for the Neberku API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    api_prefix: String,
    auth: Auth,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, auth: Auth, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_prefix: "/api".to_string(),
            auth,
        })
    }

    /// Create a client from loaded configuration. A configured token switches to Bearer auth.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let auth = match &config.api_token {
            Some(token) => Auth::Bearer(token.clone()),
            None => Auth::Anonymous,
        };

        let mut client = Self::new(
            config.api_url.clone(),
            auth,
            Duration::from_secs(config.request_timeout_secs),
        )?;
        client.api_prefix = config.api_prefix();
        Ok(client)
    }

    /// Create a client from the environment (`NEBERKU_API_URL`, `NEBERKU_API_TOKEN`, ...).
    pub fn from_env() -> Result<Self> {
        let config = ClientConfig::from_env().context("Invalid client configuration")?;
        Self::from_config(&config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_prefix(&self) -> &str {
        &self.api_prefix
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            Auth::Anonymous => request,
            Auth::Bearer(token) => request.header("Authorization", format!("Bearer {}", token)),
        }
    }

    /// GET request with optional query parameters. Deserializes JSON response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.build_url(path);
        let mut request = self.apply_auth(self.client.get(&url));

        if !query.is_empty() {
            request = request.query(query);
        }

        tracing::debug!(url = %url, "GET");
        let response = request.send().await.context("Failed to send request")?;
        Self::read_json(response).await
    }

    /// POST multipart form and deserialize response.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T> {
        let url = self.build_url(path);
        let request = self.apply_auth(self.client.post(&url).multipart(form));

        tracing::debug!(url = %url, "POST multipart");
        let response = request.send().await.context("Failed to send request")?;
        Self::read_json(response).await
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = flatten_error_body(&error_text);
            tracing::warn!(status = status.as_u16(), error = %message, "API request failed");
            return Err(ApiStatusError {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let body: T = response
            .json()
            .await
            .context("Failed to parse response as JSON")?;

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_uses_prefix_and_auth() {
        let config = ClientConfig {
            api_url: "https://neberku.example/".to_string(),
            api_version: Some("v1".to_string()),
            api_token: Some("host-token".to_string()),
            ..Default::default()
        };

        let client = ApiClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "https://neberku.example");
        assert_eq!(client.api_prefix(), "/api/v1");
        assert!(matches!(client.auth, Auth::Bearer(ref t) if t == "host-token"));
        assert_eq!(
            client.build_url("/api/v1/guest-post-create/"),
            "https://neberku.example/api/v1/guest-post-create/"
        );
    }

    #[test]
    fn test_default_config_is_anonymous() {
        let client = ApiClient::from_config(&ClientConfig::default()).unwrap();
        assert!(matches!(client.auth, Auth::Anonymous));
        assert_eq!(client.api_prefix(), "/api");
    }
}
