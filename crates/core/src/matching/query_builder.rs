//! Search string construction from title metadata.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of media being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Movie,
    Series,
    Channel,
    Tv,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
            Self::Channel => "channel",
            Self::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown media kind: {0}")]
pub struct ParseMediaKindError(pub String);

impl FromStr for MediaKind {
    type Err = ParseMediaKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movie" => Ok(Self::Movie),
            "series" => Ok(Self::Series),
            "channel" => Ok(Self::Channel),
            "tv" => Ok(Self::Tv),
            _ => Err(ParseMediaKindError(s.to_string())),
        }
    }
}

/// Title metadata a search string is built from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaMeta {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode: Option<u32>,
}

/// Build the search string for a title.
///
/// Series get an `SxxEyy` token (either half may be missing), every kind gets
/// the year appended last. The result is not URL-encoded.
pub fn build_query(kind: MediaKind, meta: &MediaMeta) -> String {
    let mut query = meta.name.clone();

    if kind == MediaKind::Series {
        if let Some(season) = meta.season {
            query.push_str(&format!(" S{:02}", season));
        }

        if let Some(episode) = meta.episode {
            let separator = if meta.season.is_some() { "" } else { " " };
            query.push_str(&format!("{}E{:02}", separator, episode));
        }
    }

    if let Some(year) = meta.year {
        query.push_str(&format!(" {}", year));
    }

    query
}
