//! Easynews search backend implementation.

use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::config::EasynewsConfig;
use crate::metrics;

use super::{SearchError, SearchResponse, Searcher};

/// Path of the advanced search endpoint, relative to the members host.
pub const SEARCH_PATH: &str = "/2.0/search/solr-search/advanced";

/// File extensions the search is restricted to.
pub const VIDEO_EXTENSIONS: &str = "m4v,3gp,mov,divx,xvid,wmv,avi,mpg,mpeg,mp4,mkv,avc,flv,webm";

/// Easynews search backend implementation.
///
/// Holds no mutable state, so one client can serve concurrent searches.
pub struct EasynewsClient {
    client: Client,
    config: EasynewsConfig,
    auth_header: HeaderValue,
}

impl std::fmt::Debug for EasynewsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EasynewsClient")
            .field("base_url", &self.config.base_url)
            .field("timeout_secs", &self.config.timeout_secs)
            .field("page_size", &self.config.page_size)
            .finish()
    }
}

impl EasynewsClient {
    /// Create a new client. Fails when the config carries no credentials.
    pub fn new(config: EasynewsConfig) -> Result<Self, SearchError> {
        let credentials = config.credentials.as_ref().ok_or_else(|| {
            SearchError::NotConfigured("Easynews credentials are required".to_string())
        })?;

        let mut auth_header = HeaderValue::from_str(&credentials.basic_auth_header())
            .map_err(|e| SearchError::NotConfigured(format!("Invalid credentials: {}", e)))?;
        auth_header.set_sensitive(true);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                SearchError::ConnectionFailed(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            config,
            auth_header,
        })
    }

    pub fn config(&self) -> &EasynewsConfig {
        &self.config
    }

    /// Full URL of the search endpoint.
    fn search_url(&self) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), SEARCH_PATH)
    }

    /// Query parameters for one page of results.
    fn search_params(query: &str, page: u32, page_size: u32) -> Vec<(&'static str, String)> {
        vec![
            ("st", "adv".to_string()),
            ("sb", "1".to_string()),
            ("fex", VIDEO_EXTENSIONS.to_string()),
            ("fty[]", "VIDEO".to_string()),
            ("spamf", "1".to_string()),
            ("u", "1".to_string()),
            ("gx", "1".to_string()),
            ("pno", page.to_string()),
            ("sS", "3".to_string()),
            ("s1", "relevance".to_string()),
            ("s1d", "-".to_string()),
            ("s2", "dsize".to_string()),
            ("s2d", "-".to_string()),
            ("s3", "dtime".to_string()),
            ("s3d", "-".to_string()),
            ("pby", page_size.to_string()),
            ("safeO", "0".to_string()),
            ("gps", query.to_string()),
        ]
    }

    fn request_error(&self, query: &str, e: reqwest::Error) -> SearchError {
        if e.is_timeout() {
            SearchError::Timeout {
                query: query.to_string(),
                timeout_secs: self.config.timeout_secs,
            }
        } else {
            SearchError::ConnectionFailed(e.to_string())
        }
    }

    async fn fetch_page(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<SearchResponse, SearchError> {
        let response = self
            .client
            .get(self.search_url())
            .header(AUTHORIZATION, self.auth_header.clone())
            .query(&Self::search_params(query, page, page_size))
            .send()
            .await
            .map_err(|e| self.request_error(query, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Http {
                query: query.to_string(),
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.request_error(query, e))?;

        serde_json::from_str(&body).map_err(|e| {
            SearchError::Parse(format!("Invalid response for query '{}': {}", query, e))
        })
    }
}

#[async_trait]
impl Searcher for EasynewsClient {
    fn name(&self) -> &str {
        "easynews"
    }

    fn page_size(&self) -> u32 {
        self.config.page_size
    }

    async fn search(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<SearchResponse, SearchError> {
        let start = Instant::now();
        debug!(query = query, page = page, page_size = page_size, "Searching Easynews");

        let result = self.fetch_page(query, page, page_size).await;

        let status = match &result {
            Ok(_) => "success",
            Err(e) => e.kind(),
        };
        metrics::SEARCH_REQUESTS.with_label_values(&[status]).inc();
        metrics::SEARCH_REQUEST_DURATION.observe(start.elapsed().as_secs_f64());

        if let Ok(response) = &result {
            debug!(
                query = query,
                page = page,
                results = response.data.len(),
                duration_ms = start.elapsed().as_millis() as u64,
                "Easynews page fetched"
            );
        }

        result
    }
}
