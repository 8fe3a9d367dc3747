//! Easynews client integration tests.
//!
//! These tests run the client against an in-process HTTP server that mimics
//! the search endpoint:
//! - Authorization header and query parameters
//! - Multi-page accumulation
//! - HTTP error, timeout and malformed body handling

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use easynews_core::{
    links, Credentials, EasynewsClient, EasynewsConfig, SearchError, Searcher,
};

const ROUTE: &str = "/2.0/search/solr-search/advanced";

#[derive(Clone, Default)]
struct Recorded {
    requests: Arc<Mutex<Vec<(Option<String>, HashMap<String, String>)>>>,
}

impl Recorded {
    fn requests(&self) -> Vec<(Option<String>, HashMap<String, String>)> {
        self.requests.lock().unwrap().clone()
    }
}

async fn spawn_server(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn config_for(addr: SocketAddr) -> EasynewsConfig {
    EasynewsConfig {
        credentials: Some(Credentials::new("user", "pass")),
        base_url: format!("http://{}", addr),
        timeout_secs: 5,
        page_size: 2,
    }
}

fn record(hash: &str, title: &str) -> Value {
    json!({
        "0": hash,
        "2": ".mkv",
        "4": "1.2 GB",
        "10": title,
        "11": ".mkv",
        "14": "42m 10s",
        "type": "VIDEO",
        "passwd": false,
        "virus": false,
        "rawSize": 1288490188u64,
        "fullres": "1920 x 1080"
    })
}

fn envelope(data: Vec<Value>) -> Value {
    json!({
        "data": data,
        "sid": "abc",
        "results": 4,
        "perPage": "2",
        "numPages": 2,
        "page": 1,
        "returned": data.len(),
        "dlFarm": "auto",
        "dlPort": 443,
        "baseURL": "https://members.easynews.com",
        "downURL": "https://members.easynews.com/dl",
        "thumbURL": "https://th.easynews.com/thumbnails-"
    })
}

async fn paged_handler(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let page: u32 = params.get("pno").and_then(|p| p.parse().ok()).unwrap_or(0);
    recorded.requests.lock().unwrap().push((auth, params));

    let data = match page {
        1 => vec![
            record("h1", "Foo.S01E02.1080p.WEB-DL"),
            record("h2", "Foo.S01E02.720p.HDTV"),
        ],
        2 => vec![record("h3", "Foobar.S01E02.480p")],
        _ => Vec::new(),
    };
    Json(envelope(data))
}

#[tokio::test]
async fn test_search_all_fetches_every_page() {
    let recorded = Recorded::default();
    let router = Router::new()
        .route(ROUTE, get(paged_handler))
        .with_state(recorded.clone());
    let addr = spawn_server(router).await;

    let client = EasynewsClient::new(config_for(addr)).unwrap();
    let result = client.search_all("Foo S01E02").await.unwrap();

    let hashes: Vec<_> = result.data.iter().map(|f| f.hash.as_str()).collect();
    assert_eq!(hashes, vec!["h1", "h2", "h3"]);
    assert_eq!(result.dl_farm, "auto");
    assert_eq!(result.dl_port, "443");
    assert_eq!(result.per_page, 2);

    let requests = recorded.requests();
    assert_eq!(requests.len(), 3);
    for (i, (auth, params)) in requests.iter().enumerate() {
        assert_eq!(auth.as_deref(), Some("Basic dXNlcjpwYXNz"));
        assert_eq!(params.get("pno"), Some(&(i + 1).to_string()));
        assert_eq!(params.get("pby").map(String::as_str), Some("2"));
        assert_eq!(params.get("gps").map(String::as_str), Some("Foo S01E02"));
        assert_eq!(params.get("fty[]").map(String::as_str), Some("VIDEO"));
        assert_eq!(params.get("st").map(String::as_str), Some("adv"));
    }
}

#[tokio::test]
async fn test_records_are_decoded_from_wire_keys() {
    let router = Router::new()
        .route(ROUTE, get(paged_handler))
        .with_state(Recorded::default());
    let addr = spawn_server(router).await;

    let client = EasynewsClient::new(config_for(addr)).unwrap();
    let page = client.search("Foo", 1, 2).await.unwrap();

    let first = &page.data[0];
    assert_eq!(first.hash, "h1");
    assert_eq!(first.title, "Foo.S01E02.1080p.WEB-DL");
    assert_eq!(first.extension, ".mkv");
    assert_eq!(first.duration, "42m 10s");
    assert_eq!(first.raw_size, Some(1_288_490_188));
    assert!(!first.is_bad_video());

    let url = links::file_url(&page, first);
    assert!(url.starts_with("https://members.easynews.com/dl/auto/443/h1"));
}

#[tokio::test]
async fn test_http_error_status() {
    let router = Router::new().route(
        ROUTE,
        get(|| async { (StatusCode::UNAUTHORIZED, "nope").into_response() }),
    );
    let addr = spawn_server(router).await;

    let client = EasynewsClient::new(config_for(addr)).unwrap();
    let err = client.search_all("Foo").await.unwrap_err();

    match &err {
        SearchError::Http {
            query,
            status,
            status_text,
        } => {
            assert_eq!(query, "Foo");
            assert_eq!(*status, 401);
            assert_eq!(status_text, "Unauthorized");
        }
        other => panic!("expected Http error, got {:?}", other),
    }
    assert_eq!(
        err.to_string(),
        "Failed to fetch search results of query 'Foo': 401 Unauthorized"
    );
}

#[tokio::test]
async fn test_error_on_second_page_discards_first() {
    let router = Router::new().route(
        ROUTE,
        get(|Query(params): Query<HashMap<String, String>>| async move {
            if params.get("pno").map(String::as_str) == Some("1") {
                Json(envelope(vec![record("h1", "Foo 2020")])).into_response()
            } else {
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }),
    );
    let addr = spawn_server(router).await;

    let client = EasynewsClient::new(config_for(addr)).unwrap();
    let result = client.search_all("Foo").await;

    assert!(matches!(result, Err(SearchError::Http { status: 500, .. })));
}

#[tokio::test]
async fn test_timeout() {
    let router = Router::new().route(
        ROUTE,
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(envelope(Vec::new()))
        }),
    );
    let addr = spawn_server(router).await;

    let client = EasynewsClient::new(EasynewsConfig {
        timeout_secs: 1,
        ..config_for(addr)
    })
    .unwrap();
    let err = client.search("Foo", 1, 2).await.unwrap_err();

    assert!(matches!(
        err,
        SearchError::Timeout {
            timeout_secs: 1,
            ..
        }
    ));
}

#[tokio::test]
async fn test_malformed_body() {
    let router = Router::new().route(ROUTE, get(|| async { "<html>maintenance</html>" }));
    let addr = spawn_server(router).await;

    let client = EasynewsClient::new(config_for(addr)).unwrap();
    let err = client.search("Foo", 1, 2).await.unwrap_err();

    assert!(matches!(err, SearchError::Parse(_)));
}

#[tokio::test]
async fn test_null_data_is_an_empty_page() {
    let router = Router::new().route(
        ROUTE,
        get(|| async { Json(json!({ "data": null, "dlFarm": "auto" })) }),
    );
    let addr = spawn_server(router).await;

    let client = EasynewsClient::new(config_for(addr)).unwrap();
    let result = client.search_all("Foo").await.unwrap();

    assert!(result.data.is_empty());
    assert_eq!(result.dl_farm, "auto");
}

#[tokio::test]
async fn test_connection_refused() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = EasynewsClient::new(config_for(addr)).unwrap();
    let err = client.search("Foo", 1, 2).await.unwrap_err();

    assert!(matches!(err, SearchError::ConnectionFailed(_)));
}

#[test]
fn test_missing_credentials() {
    let result = EasynewsClient::new(EasynewsConfig {
        credentials: None,
        ..EasynewsConfig::default()
    });

    assert!(matches!(result, Err(SearchError::NotConfigured(_))));
}
