use async_trait::async_trait;
use serde::Deserialize;

use crate::models::InterviewListing;
use crate::services::query_engine::{SearchBackend, SearchConfig};
use crate::utils::{AppError, TtlCache};

#[derive(Debug, Deserialize)]
struct ListingsResponse {
    interviews: Vec<InterviewListing>,
}

/// HTTP client for the service's `/search` endpoint and the full listing.
/// Search hits are cached per term for `SearchConfig::cache_ttl`.
pub struct RemoteSearchClient {
    http: reqwest::Client,
    base_url: String,
    cache: TtlCache<Vec<InterviewListing>>,
}

impl RemoteSearchClient {
    pub fn new(base_url: &str, config: &SearchConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            cache: TtlCache::new(config.cache_ttl),
        })
    }

    pub fn search_url(&self, query: &str) -> String {
        format!("{}/search?q={}", self.base_url, urlencoding::encode(query))
    }

    /// Full visible listing, used as the session's local list.
    pub async fn fetch_interviews(&self) -> Result<Vec<InterviewListing>, AppError> {
        let url = format!("{}/api/v1/interviews", self.base_url);
        log::info!("📥 Fetching interview listing from {}", url);

        let response = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::UpstreamError(format!(
                "listing returned {}",
                response.status()
            )));
        }

        let body: ListingsResponse = response.json().await?;
        Ok(body.interviews)
    }
}

#[async_trait]
impl SearchBackend for RemoteSearchClient {
    async fn search(&self, query: &str) -> Result<Vec<InterviewListing>, AppError> {
        let term = query.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(hits) = self.cache.get(term) {
            log::debug!("💾 Cache hit for '{}'", term);
            return Ok(hits);
        }

        let response = self
            .http
            .get(self.search_url(term))
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::UpstreamError(format!(
                "search returned {}",
                response.status()
            )));
        }

        let hits: Vec<InterviewListing> = response.json().await?;
        self.cache.insert(term.to_string(), hits.clone());
        Ok(hits)
    }
}
