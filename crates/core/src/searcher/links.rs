//! Stream and thumbnail link construction from search results.

use super::{Credentials, FileRecord, SearchResponse};

/// Download host for the files of a response: `downURL/dlFarm/dlPort`.
pub fn stream_url(response: &SearchResponse) -> String {
    format!(
        "{}/{}/{}",
        response.down_url, response.dl_farm, response.dl_port
    )
}

/// Path of a file below [`stream_url`]: `<hash><ext>/<title><ext>`.
pub fn stream_path(file: &FileRecord) -> String {
    format!(
        "{}{}/{}{}",
        file.hash, file.extension, file.title, file.extension
    )
}

/// Full stream link of a file.
pub fn file_url(response: &SearchResponse, file: &FileRecord) -> String {
    format!("{}/{}", stream_url(response), stream_path(file))
}

/// Credentials as a query-string style `Authorization=<user:pass>` pair,
/// percent-encoded, for players that can't send headers.
pub fn stream_auth(credentials: &Credentials) -> String {
    let raw = format!("{}:{}", credentials.username, credentials.password);
    format!("Authorization={}", urlencoding::encode(&raw))
}

/// Thumbnail of a file:
/// `thumbURL<first 3 chars of hash>/pr-<hash>.jpg/th-<title>.jpg`.
pub fn thumbnail_url(response: &SearchResponse, file: &FileRecord) -> String {
    let prefix: String = file.hash.chars().take(3).collect();
    format!(
        "{}{}/pr-{}.jpg/th-{}.jpg",
        response.thumb_url, prefix, file.hash, file.title
    )
}

/// First run of ASCII digits in `value`.
pub fn extract_digits(value: &str) -> Option<u64> {
    let start = value.find(|c: char| c.is_ascii_digit())?;
    let digits: String = value[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
