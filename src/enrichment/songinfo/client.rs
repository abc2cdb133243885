//! Song-info HTTP client
//!
//! One GET per lookup. No retries: a failed lookup fails the song creation
//! that asked for it.

use std::time::Duration;

use super::{adapter, dto};
use crate::config::EnrichmentConfig;
use crate::enrichment::domain::{EnrichmentError, SongDetails};

/// User agent string sent with every lookup
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Song-info API client
pub struct SongInfoClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl SongInfoClient {
    /// Create a client from the enrichment config section.
    ///
    /// The request timeout bounds the whole lookup, so a hung upstream
    /// cannot stall song creation forever.
    pub fn new(config: &EnrichmentConfig) -> Result<Self, EnrichmentError> {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EnrichmentError::Client(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(5))
    }

    /// Test client with custom base URL and request timeout
    #[cfg(test)]
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .no_proxy()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    /// Look up release date, lyrics, and link for a song
    pub async fn lookup(&self, group: &str, title: &str) -> Result<SongDetails, EnrichmentError> {
        let response = self.send_info_request(group, title).await?;
        adapter::to_details(response)
    }

    fn info_url(&self, group: &str, title: &str) -> String {
        format!(
            "{}/info?group={}&song={}",
            self.base_url,
            urlencoding::encode(group),
            urlencoding::encode(title)
        )
    }

    /// Send the HTTP request and parse the response
    async fn send_info_request(
        &self,
        group: &str,
        title: &str,
    ) -> Result<dto::SongInfoResponse, EnrichmentError> {
        let url = self.info_url(group, title);
        tracing::debug!(%url, "Requesting song info");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(EnrichmentError::NoMatches);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EnrichmentError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        response
            .json::<dto::SongInfoResponse>()
            .await
            .map_err(|e| EnrichmentError::Parse(e.to_string()))
    }
}
