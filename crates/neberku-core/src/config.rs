//! Configuration module
//!
//! Client configuration is read from the environment (and a `.env` file when
//! present): where the Neberku backend lives, how to authenticate and how long
//! a request may take.

use std::env;

const DEFAULT_API_URL: &str = "http://localhost:8000";
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Configuration for talking to the Neberku backend
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_url: String,
    /// API version segment; `None` means the unversioned `/api` prefix.
    pub api_version: Option<String>,
    /// Bearer token for host endpoints. Guests submit anonymously.
    pub api_token: Option<String>,
    pub request_timeout_secs: u64,
    pub environment: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_version: None,
            api_token: None,
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
            environment: "development".to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        let config = ClientConfig {
            api_url: non_empty("NEBERKU_API_URL")
                .or_else(|| non_empty("API_URL"))
                .unwrap_or_else(|| DEFAULT_API_URL.to_string())
                .trim()
                .trim_end_matches('/')
                .to_string(),
            api_version: non_empty("NEBERKU_API_VERSION").map(|v| v.trim().to_string()),
            api_token: non_empty("NEBERKU_API_TOKEN"),
            request_timeout_secs: non_empty("NEBERKU_REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|| REQUEST_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(REQUEST_TIMEOUT_SECS),
            environment: non_empty("NEBERKU_ENVIRONMENT")
                .unwrap_or_else(|| "development".to_string())
                .to_lowercase(),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "NEBERKU_API_URL must start with http:// or https://"
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "NEBERKU_REQUEST_TIMEOUT_SECS must be greater than zero"
            ));
        }

        if self.is_production() && self.api_url.starts_with("http://") {
            tracing::warn!(
                api_url = %self.api_url,
                "Production client configured with a plain HTTP backend URL"
            );
        }

        Ok(())
    }

    /// Check if the client is running against production
    pub fn is_production(&self) -> bool {
        self.environment.eq("production") || self.environment.eq("prod")
    }

    /// API path prefix, e.g. `/api` or `/api/v1`.
    pub fn api_prefix(&self) -> String {
        match &self.api_version {
            Some(version) => format!("/api/{}", version),
            None => "/api".to_string(),
        }
    }
}
