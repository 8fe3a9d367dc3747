//! Paginated search integration tests.
//!
//! These tests drive `Searcher::search_all` through the mock searcher:
//! - Accumulation order across pages
//! - Termination on the first empty page
//! - Error propagation without partial results

use easynews_core::{
    testing::{fixtures, MockSearcher},
    SearchError, Searcher, TitleMatcher,
};

#[tokio::test]
async fn test_accumulates_pages_until_empty() {
    let searcher = MockSearcher::with_page_sizes(&[2, 2, 0]);

    let result = searcher.search_all("foo").await.unwrap();

    assert_eq!(result.data.len(), 4);
    assert_eq!(searcher.search_count().await, 3);
}

#[tokio::test]
async fn test_preserves_page_order() {
    let searcher = MockSearcher::with_pages(vec![
        fixtures::page(vec![
            fixtures::video_file("first", "h1"),
            fixtures::video_file("second", "h2"),
        ]),
        fixtures::page(vec![fixtures::video_file("third", "h3")]),
        fixtures::empty_page(),
    ]);

    let result = searcher.search_all("foo").await.unwrap();
    let titles: Vec<_> = result.data.iter().map(|f| f.title.as_str()).collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn test_requests_sequential_pages_with_page_size() {
    let searcher = MockSearcher::with_page_sizes(&[3, 1]).with_page_size(3);

    searcher.search_all("Foo S01E02").await.unwrap();

    let searches = searcher.recorded_searches().await;
    let pages: Vec<u32> = searches.iter().map(|s| s.page).collect();
    assert_eq!(pages, vec![1, 2, 3]);
    assert!(searches.iter().all(|s| s.page_size == 3));
    assert!(searches.iter().all(|s| s.query == "Foo S01E02"));
}

#[tokio::test]
async fn test_stops_at_first_empty_page_even_if_more_follow() {
    let searcher = MockSearcher::with_page_sizes(&[1, 0, 5]);

    let result = searcher.search_all("foo").await.unwrap();

    assert_eq!(result.data.len(), 1);
    assert_eq!(searcher.search_count().await, 2);
}

#[tokio::test]
async fn test_returns_last_page_envelope() {
    let mut last = fixtures::empty_page();
    last.dl_farm = "farm-7".to_string();
    last.thumb_url = "https://thumbs.example/".to_string();

    let searcher = MockSearcher::with_pages(vec![
        fixtures::page(fixtures::video_files("a", 2)),
        last,
    ]);

    let result = searcher.search_all("foo").await.unwrap();
    assert_eq!(result.dl_farm, "farm-7");
    assert_eq!(result.thumb_url, "https://thumbs.example/");
    assert_eq!(result.data.len(), 2);
}

#[tokio::test]
async fn test_first_page_empty() {
    let searcher = MockSearcher::new();

    let result = searcher.search_all("nothing").await.unwrap();

    assert!(result.data.is_empty());
    assert_eq!(searcher.search_count().await, 1);
}

#[tokio::test]
async fn test_http_error_on_first_page_fails() {
    let searcher = MockSearcher::with_page_sizes(&[2, 2]);
    searcher
        .fail_page(
            1,
            SearchError::Http {
                query: "foo".to_string(),
                status: 401,
                status_text: "Unauthorized".to_string(),
            },
        )
        .await;

    let err = searcher.search_all("foo").await.unwrap_err();

    assert!(matches!(err, SearchError::Http { status: 401, .. }));
    assert_eq!(searcher.search_count().await, 1);
}

#[tokio::test]
async fn test_mid_pagination_error_discards_earlier_pages() {
    let searcher = MockSearcher::with_page_sizes(&[2, 2, 2]);
    searcher
        .fail_page(
            3,
            SearchError::Timeout {
                query: "foo".to_string(),
                timeout_secs: 20,
            },
        )
        .await;

    let result = searcher.search_all("foo").await;

    assert!(matches!(result, Err(SearchError::Timeout { .. })));
    assert_eq!(searcher.search_count().await, 3);
}

#[tokio::test]
async fn test_concurrent_searches_do_not_interfere() {
    let searcher = MockSearcher::with_page_sizes(&[2, 1]);

    let (a, b) = tokio::join!(searcher.search_all("a"), searcher.search_all("b"));

    assert_eq!(a.unwrap().data.len(), 3);
    assert_eq!(b.unwrap().data.len(), 3);
    assert_eq!(searcher.search_count().await, 6);
}

#[tokio::test]
async fn test_filtering_results_with_matcher() {
    let searcher = MockSearcher::with_pages(vec![
        fixtures::page(vec![
            fixtures::video_file("Foo.S01E02.1080p.WEB-DL", "h1"),
            fixtures::video_file("Foobar.S01E02.720p", "h2"),
            fixtures::video_file("Other.Show.S01E02", "h3"),
        ]),
        fixtures::empty_page(),
    ]);

    let result = searcher.search_all("Foo S01E02").await.unwrap();
    let matcher = TitleMatcher::new();

    let loose: Vec<_> = result
        .data
        .iter()
        .filter(|f| matcher.matches(&f.title, "Foo", false))
        .map(|f| f.hash.as_str())
        .collect();
    assert_eq!(loose, vec!["h1", "h2"]);

    let strict: Vec<_> = result
        .data
        .iter()
        .filter(|f| matcher.matches(&f.title, "Foo", true))
        .map(|f| f.hash.as_str())
        .collect();
    assert_eq!(strict, vec!["h1"]);
}
