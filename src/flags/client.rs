//! HTTP client for the feature flags endpoint
//!
//! This module provides functionality to fetch the current flag values from
//! the application's flags endpoint and parse them into a [`FlagValues`] map.

use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::Client;
use thiserror::Error;

use super::{FlagSource, FlagValues};

/// Path of the flags endpoint, resolved against the configured base URL
const FLAGS_PATH: &str = "/app/features";

/// Errors that can occur when fetching flag values
#[derive(Debug, Error)]
pub enum FlagsError {
    /// HTTP request failed (transport error or non-2xx status)
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse flags response: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Client for fetching flag values from the flags endpoint
///
/// The endpoint is expected to return a flat JSON object mapping flag names
/// to booleans, e.g. `{"new_ui": true, "beta_search": false}`. Any other
/// shape is a parse error.
#[derive(Debug, Clone)]
pub struct FlagsClient {
    client: Client,
    base_url: String,
}

impl FlagsClient {
    /// Create a new FlagsClient for the service at `base_url`
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the service, e.g. `https://example.com`.
    ///   A trailing slash is tolerated.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Create a new FlagsClient with a custom HTTP client
    ///
    /// Useful when the application shares one `reqwest::Client` across
    /// services (connection pooling, ambient credentials).
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Returns the full URL of the flags endpoint
    fn flags_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), FLAGS_PATH)
    }

    /// Fetch the current flag values from the endpoint
    ///
    /// # Returns
    /// * `Ok(FlagValues)` - The complete flag set as returned by the server
    /// * `Err(FlagsError)` - If the request fails, the server returns a
    ///   non-2xx status, or the body is not a JSON object of booleans
    pub async fn fetch(&self) -> Result<FlagValues, FlagsError> {
        let response = self
            .client
            .get(self.flags_url())
            .send()
            .await?
            .error_for_status()?;
        let text = response.text().await?;
        let values: FlagValues = serde_json::from_str(&text)?;

        Ok(values)
    }
}

impl FlagSource for FlagsClient {
    fn fetch_flags(&self) -> BoxFuture<'static, Result<FlagValues, FlagsError>> {
        let client = self.clone();
        async move { client.fetch().await }.boxed()
    }
}
