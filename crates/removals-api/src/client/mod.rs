//! HTTP client for the removals backend.
//!
//! One [`RemovalsClient`] covers every endpoint the booking wizard talks to.
//! Endpoint groups live in submodules as additional `impl` blocks.

mod checkout;
mod orders;
mod places;
mod pricing;

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use removals_core::AppConfig;

use crate::error::ApiError;
use crate::retry::retry_with_backoff;

/// Client for the removals backend REST API.
///
/// Use [`RemovalsClient::from_config`] in binaries and
/// [`RemovalsClient::new`] with a mock server URL in tests.
pub struct RemovalsClient {
    client: Client,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl RemovalsClient {
    /// Creates a client with the given timeout, `User-Agent` and retry policy.
    ///
    /// `max_retries` applies to lookups only; creation calls are never retried.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` cannot be
    /// constructed, or [`ApiError::InvalidBaseUrl`] if `base_url` does not parse
    /// as an absolute URL.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so endpoint segments append to the path
        // instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ApiError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "URL cannot be used as a base".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// See [`RemovalsClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Self::new(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_ms,
        )
    }

    /// Builds an endpoint URL from path segments, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GET with retry on transient errors.
    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, ApiError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async move {
            tracing::debug!(%url, "GET");
            let response = self.client.get(url.clone()).send().await?;
            Self::read_json(response, url).await
        })
        .await
    }

    /// POST with retry on transient errors. Only for side-effect-free lookups.
    async fn post_lookup<B, T>(&self, url: &Url, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async move {
            self.post_json(url, body).await
        })
        .await
    }

    /// POST sent exactly once.
    async fn post_json<B, T>(&self, url: &Url, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(%url, "POST");
        let response = self.client.post(url.clone()).json(body).send().await?;
        Self::read_json(response, url).await
    }

    /// Maps non-2xx statuses to typed errors and parses the body as JSON.
    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
        url: &Url,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
            context: url.path().to_owned(),
            source: e,
        })
    }
}
