//! Testing utilities and mock implementations.
//!
//! Provides a mock [`Searcher`](crate::searcher::Searcher) that serves
//! scripted pages, so pagination and filtering can be tested without the
//! real endpoint.
//!
//! # Example
//!
//! ```rust,ignore
//! use easynews_core::testing::{fixtures, MockSearcher};
//!
//! let searcher = MockSearcher::with_pages(vec![
//!     fixtures::page(vec![fixtures::video_file("Foo.S01E01.1080p", "h1")]),
//!     fixtures::empty_page(),
//! ]);
//!
//! let result = searcher.search_all("foo").await?;
//! assert_eq!(result.data.len(), 1);
//! ```

mod mock_searcher;

pub use mock_searcher::{MockSearcher, RecordedSearch};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::searcher::{FileRecord, SearchResponse};

    /// Create a playable video record with reasonable defaults.
    pub fn video_file(title: &str, hash: &str) -> FileRecord {
        FileRecord {
            hash: hash.to_string(),
            extension: ".mkv".to_string(),
            size: "1.4 GB".to_string(),
            title: title.to_string(),
            duration: "1h 32m".to_string(),
            media_type: "VIDEO".to_string(),
            is_password: false,
            is_virus: false,
            raw_size: Some(1_503_238_553),
            full_resolution: Some("1920 x 1080".to_string()),
        }
    }

    /// Create `count` numbered video records (`<prefix> 1`, `<prefix> 2`, ...).
    pub fn video_files(prefix: &str, count: usize) -> Vec<FileRecord> {
        (1..=count)
            .map(|i| video_file(&format!("{} {}", prefix, i), &format!("{}-{}", prefix, i)))
            .collect()
    }

    /// Create a response page carrying the given records.
    pub fn page(data: Vec<FileRecord>) -> SearchResponse {
        SearchResponse {
            results: data.len() as u64,
            returned: data.len() as u64,
            data,
            dl_farm: "auto".to_string(),
            dl_port: "443".to_string(),
            down_url: "https://members.easynews.com/dl".to_string(),
            thumb_url: "https://th.easynews.com/thumbnails-".to_string(),
            ..Default::default()
        }
    }

    /// Create the empty page that terminates pagination.
    pub fn empty_page() -> SearchResponse {
        page(Vec::new())
    }
}
