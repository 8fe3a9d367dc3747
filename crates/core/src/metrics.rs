//! Prometheus metrics for the search client and result filtering.

use once_cell::sync::Lazy;
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder};

// =============================================================================
// Search Metrics
// =============================================================================

/// Search page requests total by status.
pub static SEARCH_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "easynews_search_requests_total",
            "Total search page requests",
        ),
        &["status"], // "success", "http_error", "timeout", "parse_error", "connection_failed"
    )
    .unwrap()
});

/// Search page request duration in seconds.
pub static SEARCH_REQUEST_DURATION: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "easynews_search_request_duration_seconds",
            "Duration of search page requests",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 20.0]),
    )
    .unwrap()
});

/// Pages fetched per paginated search, including the terminating empty page.
pub static SEARCH_PAGES: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "easynews_search_pages",
            "Number of pages fetched per paginated search",
        )
        .buckets(vec![1.0, 2.0, 3.0, 5.0, 10.0, 20.0]),
    )
    .unwrap()
});

/// Records accumulated per paginated search.
pub static SEARCH_RESULTS: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "easynews_search_results",
            "Number of records returned per paginated search",
        )
        .buckets(vec![0.0, 1.0, 10.0, 50.0, 100.0, 500.0, 1000.0, 5000.0]),
    )
    .unwrap()
});

// =============================================================================
// Filtering Metrics
// =============================================================================

/// Files dropped while filtering results, by reason.
pub static FILES_FILTERED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "easynews_files_filtered_total",
            "Total search results dropped by filtering",
        ),
        &["reason"], // "bad_video", "title_mismatch"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(SEARCH_REQUESTS.clone()),
        Box::new(SEARCH_REQUEST_DURATION.clone()),
        Box::new(SEARCH_PAGES.clone()),
        Box::new(SEARCH_RESULTS.clone()),
        Box::new(FILES_FILTERED.clone()),
    ]
}

/// Register all metrics in a fresh registry and render them in the text
/// exposition format.
pub fn render_metrics() -> Result<String, prometheus::Error> {
    let registry = Registry::new();
    for metric in all_metrics() {
        registry.register(metric)?;
    }

    let mut buffer = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
