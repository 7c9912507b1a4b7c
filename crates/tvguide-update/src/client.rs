//! `GithubClient` - GitHub releases API client implementation.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::LocalReleaseFeed;
use super::types::Release;

/// Default base URL for the GitHub REST API.
const DEFAULT_BASE_URL: &str = "https://api.github.com/";

/// Maximum number of retries for HTTP 429 responses.
const MAX_RETRIES: u32 = 3;

/// Backoff duration between retries when no `Retry-After` is given.
const RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// GitHub releases API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct GithubClient {
    /// HTTP client (reqwest, gzip enabled).
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Optional bearer token (raises the unauthenticated rate limit).
    api_token: Option<String>,
}

/// Builder for `GithubClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct GithubClientBuilder {
    base_url: Option<Url>,
    api_token: Option<String>,
    user_agent: Option<String>,
}

impl GithubClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_token: None,
            user_agent: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets a bearer token (optional).
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the User-Agent (required; the GitHub API rejects requests
    /// without one).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<GithubClient> {
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(GithubClient {
            http_client,
            base_url,
            api_token: self.api_token,
        })
    }
}

impl GithubClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> GithubClientBuilder {
        GithubClientBuilder::new()
    }

    /// Sends a GET request with JSON accept header and optional bearer auth.
    /// Retries up to `MAX_RETRIES` times on HTTP 429, honoring `Retry-After`.
    #[instrument(skip_all)]
    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        let mut retries = 0u32;
        loop {
            let mut request = self
                .http_client
                .get(url.clone())
                .header(reqwest::header::ACCEPT, "application/vnd.github+json");
            if let Some(token) = &self.api_token {
                request = request.bearer_auth(token);
            }

            let response = request
                .send()
                .await
                .with_context(|| format!("request to {url} failed"))?;
            let status = response.status();

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS && retries < MAX_RETRIES {
                let retry_after = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .map_or(RETRY_BACKOFF, Duration::from_secs);

                retries = retries.saturating_add(1);
                tracing::warn!(
                    code = status.as_u16(),
                    retries,
                    retry_after_secs = retry_after.as_secs(),
                    "Rate limited, waiting before retry"
                );
                tokio::time::sleep(retry_after).await;
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let preview: String = body.chars().take(200).collect();
                bail!("release feed error (HTTP {status}): {preview}");
            }

            return response
                .json::<T>()
                .await
                .context("failed to decode release feed response");
        }
    }
}

impl LocalReleaseFeed for GithubClient {
    #[instrument(skip_all)]
    async fn latest_release(&self, owner: &str, repo: &str) -> Result<Release> {
        let path = format!("repos/{owner}/{repo}/releases/latest");
        self.get_json(&path)
            .await
            .with_context(|| format!("failed to fetch latest release for {owner}/{repo}"))
    }
}
