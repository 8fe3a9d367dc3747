//! Easynews search abstraction.
//!
//! This module provides a `Searcher` trait for paginated search backends,
//! the Easynews implementation, and helpers turning search results into
//! stream and thumbnail links.

mod easynews;
pub mod links;
mod types;

pub use easynews::{EasynewsClient, SEARCH_PATH, VIDEO_EXTENSIONS};
pub use types::*;
