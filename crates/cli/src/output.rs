//! Result filtering and stream entry output.

use serde::Serialize;
use tracing::debug;

use easynews_core::{links, metrics, FileRecord, MatchingConfig, SearchResponse, TitleMatcher};

/// One playable result, printed as a JSON line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamEntry {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    pub size: String,
    pub duration: String,
    pub url: String,
    pub thumbnail: String,
}

impl StreamEntry {
    pub fn new(response: &SearchResponse, file: &FileRecord, matcher: &TitleMatcher) -> Self {
        Self {
            title: file.title.clone(),
            quality: matcher.quality(&file.title, file.full_resolution.as_deref()),
            size: file.size.clone(),
            duration: file.duration.clone(),
            url: links::file_url(response, file),
            thumbnail: links::thumbnail_url(response, file),
        }
    }
}

/// Keep the files that are playable and belong to `name`, in result order.
pub fn select_entries(
    response: &SearchResponse,
    name: &str,
    matching: &MatchingConfig,
    strict: bool,
) -> Vec<StreamEntry> {
    let matcher = TitleMatcher::with_policy(matching.normalization);

    response
        .data
        .iter()
        .filter(|file| {
            if matching.skip_bad_videos && file.is_bad_video() {
                debug!(title = %file.title, duration = %file.duration, "Skipping bad video");
                metrics::FILES_FILTERED
                    .with_label_values(&["bad_video"])
                    .inc();
                return false;
            }
            if !matcher.matches(&file.title, name, strict) {
                debug!(title = %file.title, query = name, strict, "Title mismatch");
                metrics::FILES_FILTERED
                    .with_label_values(&["title_mismatch"])
                    .inc();
                return false;
            }
            true
        })
        .map(|file| StreamEntry::new(response, file, &matcher))
        .collect()
}
