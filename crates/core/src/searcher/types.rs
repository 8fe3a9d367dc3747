//! Types for the Easynews search system.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::metrics;

/// Records requested per page when the searcher doesn't say otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 1000;

/// Easynews account credentials.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// `Authorization` header value: `Basic base64(username:password)`.
    pub fn basic_auth_header(&self) -> String {
        let raw = format!("{}:{}", self.username, self.password);
        format!("Basic {}", STANDARD.encode(raw))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A single file returned by the search endpoint.
///
/// The wire format keys fields by small numeric strings; they are mapped to
/// named fields here and nowhere else, in both directions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawFileRecord", into = "RawFileRecord")]
pub struct FileRecord {
    /// Post hash, also used as the thumbnail id.
    pub hash: String,
    /// Extension including the leading dot (`.mkv`).
    pub extension: String,
    /// Human readable size (`1.4 GB`).
    pub size: String,
    /// Post title.
    pub title: String,
    /// Human readable duration (`1h 32m`, `45s`).
    pub duration: String,
    /// Media type as reported (`VIDEO`, `AUDIO`, ...).
    pub media_type: String,
    pub is_password: bool,
    pub is_virus: bool,
    /// Size in bytes, when reported.
    pub raw_size: Option<u64>,
    /// Frame size (`1920 x 1080`), when reported.
    pub full_resolution: Option<String>,
}

impl FileRecord {
    /// Whether this file is unusable as a stream: shorter than six minutes,
    /// password protected, infected, or not a video.
    pub fn is_bad_video(&self) -> bool {
        is_short_duration(&self.duration)
            || self.is_password
            || self.is_virus
            || !self.media_type.eq_ignore_ascii_case("VIDEO")
    }
}

/// `45s`, `5m 59s` and the like.
fn is_short_duration(duration: &str) -> bool {
    let mut chars = duration.chars();
    match chars.next() {
        Some(first) if first.is_ascii_digit() => {}
        _ => return false,
    }

    let digits_then = duration.trim_start_matches(|c: char| c.is_ascii_digit());
    if digits_then.starts_with('s') {
        return true;
    }

    matches!(duration.as_bytes(), [b'0'..=b'5', b'm', ..])
}

/// Wire representation of a [`FileRecord`].
#[derive(Serialize, Deserialize)]
struct RawFileRecord {
    #[serde(rename = "0", default, deserialize_with = "lenient_string")]
    hash: String,
    #[serde(rename = "2", default, deserialize_with = "lenient_string")]
    short_extension: String,
    #[serde(rename = "4", default, deserialize_with = "lenient_string")]
    size: String,
    #[serde(rename = "10", default, deserialize_with = "lenient_string")]
    title: String,
    #[serde(rename = "11", default, deserialize_with = "lenient_string")]
    extension: String,
    #[serde(rename = "14", default, deserialize_with = "lenient_string")]
    duration: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    media_type: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    passwd: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    virus: bool,
    #[serde(
        rename = "rawSize",
        default,
        deserialize_with = "lenient_opt_u64",
        skip_serializing_if = "Option::is_none"
    )]
    raw_size: Option<u64>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    fullres: Option<String>,
}

impl From<FileRecord> for RawFileRecord {
    fn from(record: FileRecord) -> Self {
        Self {
            hash: record.hash,
            short_extension: record.extension.clone(),
            size: record.size,
            title: record.title,
            extension: record.extension,
            duration: record.duration,
            media_type: record.media_type,
            passwd: record.is_password,
            virus: record.is_virus,
            raw_size: record.raw_size,
            fullres: record.full_resolution,
        }
    }
}

impl From<RawFileRecord> for FileRecord {
    fn from(raw: RawFileRecord) -> Self {
        let extension = if raw.extension.is_empty() {
            raw.short_extension
        } else {
            raw.extension
        };

        Self {
            hash: raw.hash,
            extension,
            size: raw.size,
            title: raw.title,
            duration: raw.duration,
            media_type: raw.media_type,
            is_password: raw.passwd,
            is_virus: raw.virus,
            raw_size: raw.raw_size,
            full_resolution: raw.fullres,
        }
    }
}

/// Response envelope of the search endpoint.
///
/// Besides the records it carries the connection parameters needed to build
/// stream and thumbnail links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: Vec<FileRecord>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sid: String,
    /// Total hits for the query.
    #[serde(default, deserialize_with = "lenient_u64")]
    pub results: u64,
    #[serde(rename = "perPage", default, deserialize_with = "lenient_u64")]
    pub per_page: u64,
    #[serde(rename = "numPages", default, deserialize_with = "lenient_u64")]
    pub num_pages: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub page: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub returned: u64,
    #[serde(rename = "dlFarm", default, deserialize_with = "lenient_string")]
    pub dl_farm: String,
    #[serde(rename = "dlPort", default, deserialize_with = "lenient_string")]
    pub dl_port: String,
    #[serde(rename = "baseURL", default, deserialize_with = "lenient_string")]
    pub base_url: String,
    #[serde(rename = "downURL", default, deserialize_with = "lenient_string")]
    pub down_url: String,
    #[serde(rename = "thumbURL", default, deserialize_with = "lenient_string")]
    pub thumb_url: String,
}

/// Errors that can occur during search operations.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search client not configured: {0}")]
    NotConfigured(String),

    #[error("Failed to fetch search results of query '{query}': {status} {status_text}")]
    Http {
        query: String,
        status: u16,
        status_text: String,
    },

    #[error("Search for '{query}' timed out after {timeout_secs}s")]
    Timeout { query: String, timeout_secs: u64 },

    #[error("Failed to parse search response: {0}")]
    Parse(String),

    #[error("Search backend connection failed: {0}")]
    ConnectionFailed(String),
}

impl SearchError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotConfigured(_) => "not_configured",
            Self::Http { .. } => "http_error",
            Self::Timeout { .. } => "timeout",
            Self::Parse(_) => "parse_error",
            Self::ConnectionFailed(_) => "connection_failed",
        }
    }
}

/// Trait for paginated search backends.
#[async_trait]
pub trait Searcher: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Records requested per page by [`Searcher::search_all`].
    fn page_size(&self) -> u32 {
        DEFAULT_PAGE_SIZE
    }

    /// Fetch a single page (1-based).
    async fn search(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<SearchResponse, SearchError>;

    /// Fetch every page, one after another, until a page comes back empty.
    ///
    /// Returns the envelope of the last (empty) page with `data` replaced by
    /// all records in page order. The first failing page aborts the whole
    /// call; records fetched before it are dropped.
    async fn search_all(&self, query: &str) -> Result<SearchResponse, SearchError> {
        let page_size = self.page_size();
        let mut data: Vec<FileRecord> = Vec::new();
        let mut page: u32 = 1;

        loop {
            let mut response = match self.search(query, page, page_size).await {
                Ok(response) => response,
                Err(e) => {
                    warn!(
                        searcher = self.name(),
                        query = query,
                        page = page,
                        error = %e,
                        "Paginated search failed"
                    );
                    return Err(e);
                }
            };

            if response.data.is_empty() {
                debug!(
                    searcher = self.name(),
                    query = query,
                    pages = page,
                    results = data.len(),
                    "Paginated search complete"
                );
                metrics::SEARCH_PAGES.observe(page as f64);
                metrics::SEARCH_RESULTS.observe(data.len() as f64);

                response.data = data;
                return Ok(response);
            }

            data.append(&mut response.data);
            page += 1;
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = lenient_string(deserializer)?;
    Ok(if s.is_empty() { None } else { Some(s) })
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
        Some(Value::String(s)) => matches!(s.trim().to_lowercase().as_str(), "true" | "1" | "yes"),
        _ => false,
    })
}

fn lenient_opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|v| *v >= 0.0).map(|v| v as u64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_u64(deserializer)?.unwrap_or(0))
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
