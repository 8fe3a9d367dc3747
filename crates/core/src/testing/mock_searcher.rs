//! Mock searcher for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

use crate::searcher::{SearchError, SearchResponse, Searcher, DEFAULT_PAGE_SIZE};

use super::fixtures;

/// A recorded page request for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedSearch {
    /// The query that was searched.
    pub query: String,
    /// Requested page (1-based).
    pub page: u32,
    /// Requested page size.
    pub page_size: u32,
    /// When the request was made.
    pub timestamp: Instant,
}

/// Mock implementation of the Searcher trait.
///
/// Serves scripted pages in order: page `n` returns the `n`-th configured
/// response, pages past the end return an empty page. Failures can be
/// injected per page number.
#[derive(Debug, Clone)]
pub struct MockSearcher {
    /// Scripted responses, page 1 first.
    pages: Arc<RwLock<Vec<SearchResponse>>>,
    /// Page number -> error to return instead of the page.
    errors: Arc<RwLock<HashMap<u32, SearchError>>>,
    /// Recorded page requests.
    searches: Arc<RwLock<Vec<RecordedSearch>>>,
    page_size: u32,
}

impl Default for MockSearcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSearcher {
    /// Create a new mock searcher that returns nothing.
    pub fn new() -> Self {
        Self::with_pages(Vec::new())
    }

    /// Create a mock searcher serving the given pages.
    pub fn with_pages(pages: Vec<SearchResponse>) -> Self {
        Self {
            pages: Arc::new(RwLock::new(pages)),
            errors: Arc::new(RwLock::new(HashMap::new())),
            searches: Arc::new(RwLock::new(Vec::new())),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Create a mock searcher whose pages hold `sizes[i]` records each.
    pub fn with_page_sizes(sizes: &[usize]) -> Self {
        let pages = sizes
            .iter()
            .enumerate()
            .map(|(i, &size)| fixtures::page(fixtures::video_files(&format!("page{}", i + 1), size)))
            .collect();
        Self::with_pages(pages)
    }

    /// Set the page size reported to `search_all`.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Make the request for `page` fail with `error` (once).
    pub async fn fail_page(&self, page: u32, error: SearchError) {
        self.errors.write().await.insert(page, error);
    }

    /// Get recorded page requests.
    pub async fn recorded_searches(&self) -> Vec<RecordedSearch> {
        self.searches.read().await.clone()
    }

    /// Get the number of page requests performed.
    pub async fn search_count(&self) -> usize {
        self.searches.read().await.len()
    }

    /// Clear recorded page requests.
    pub async fn clear_recorded(&self) {
        self.searches.write().await.clear();
    }
}

#[async_trait]
impl Searcher for MockSearcher {
    fn name(&self) -> &str {
        "mock"
    }

    fn page_size(&self) -> u32 {
        self.page_size
    }

    async fn search(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<SearchResponse, SearchError> {
        self.searches.write().await.push(RecordedSearch {
            query: query.to_string(),
            page,
            page_size,
            timestamp: Instant::now(),
        });

        if let Some(error) = self.errors.write().await.remove(&page) {
            return Err(error);
        }

        let pages = self.pages.read().await;
        let index = page.saturating_sub(1) as usize;
        Ok(pages
            .get(index)
            .cloned()
            .unwrap_or_else(fixtures::empty_page))
    }
}
