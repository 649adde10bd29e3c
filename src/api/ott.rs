//! OTT details advanced search client
//!
//! Fetches one page of movies matching a [`SearchCriteria`] from the RapidAPI
//! hosted `ott-details` service.
//! API docs: https://rapidapi.com/gox-ai-gox-ai-default/api/ott-details

use rand::Rng;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;
use crate::models::{MovieRecord, SearchCriteria};

/// Production endpoint
pub const DEFAULT_BASE_URL: &str = "https://ott-details.p.rapidapi.com";

/// Value of the `X-RapidAPI-Host` header
pub const DEFAULT_API_HOST: &str = "ott-details.p.rapidapi.com";

/// Highest page number requested. The API does not report a total count up
/// front, so a random page in `[1, MAX_PAGE]` stands in for a random offset.
pub const MAX_PAGE: u32 = 20;

/// Advanced search error types
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    #[error("Server error: {0}")]
    ServerError(#[source] reqwest::Error),

    #[error("Could not decode response: {0}")]
    DecodeError(#[source] serde_json::Error),
}

/// Advanced search API client
pub struct OttClient {
    api_key: String,
    api_host: String,
    base_url: String,
    client: reqwest::Client,
}

impl OttClient {
    /// Create a new client for the production endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_API_HOST, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom host header and base URL (for testing)
    pub fn with_base_url(
        api_key: impl Into<String>,
        api_host: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_host: api_host.into(),
            base_url: base_url.into(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Create a client from resolved configuration
    pub fn from_config(config: &Config, api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, config.api_host(), config.base_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the request URL for the given criteria on a random page
    pub fn build_url(&self, criteria: &SearchCriteria) -> Result<Url, QueryError> {
        self.build_url_with_page(criteria, random_page())
    }

    /// Build the request URL for the given criteria and page
    pub fn build_url_with_page(
        &self,
        criteria: &SearchCriteria,
        page: u32,
    ) -> Result<Url, QueryError> {
        let page = page.clamp(1, MAX_PAGE);
        let genres = criteria
            .genres
            .values()
            .map(|g| urlencoding::encode(g).into_owned())
            .collect::<Vec<_>>()
            .join(",");

        let raw = format!(
            "{}/advancedsearch?start_year={}&end_year={}&min_imdb={}&max_imdb={}&genre={}&type=movie&sort=latest&page={}",
            self.base_url.trim_end_matches('/'),
            criteria.from_year,
            criteria.to_year,
            criteria.from_rating,
            criteria.to_rating,
            genres,
            page
        );

        Url::parse(&raw).map_err(|e| QueryError::InvalidUrl(format!("{}: {}", raw, e)))
    }

    /// Fetch one page of movies matching the criteria
    ///
    /// A single attempt is made. Transport failures and non-success statuses
    /// are [`QueryError::ServerError`]; a body that is not the expected schema
    /// is [`QueryError::DecodeError`].
    pub async fn fetch_movies(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<Vec<MovieRecord>, QueryError> {
        let url = self.build_url(criteria)?;
        debug!(%url, "requesting advanced search");

        let response = self
            .client
            .get(url)
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", &self.api_host)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(QueryError::ServerError)?
            .error_for_status()
            .map_err(QueryError::ServerError)?;

        let body = response.text().await.map_err(QueryError::ServerError)?;
        let parsed: AdvancedSearchResponse =
            serde_json::from_str(&body).map_err(QueryError::DecodeError)?;

        info!(count = parsed.results.len(), "advanced search returned");
        Ok(parsed.results)
    }
}

/// Uniform page number in `[1, MAX_PAGE]`
pub fn random_page() -> u32 {
    rand::thread_rng().gen_range(1..=MAX_PAGE)
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct AdvancedSearchResponse {
    results: Vec<MovieRecord>,
}
