//! Release-name parser.
//!
//! Extracts a best-effort structure (title, season, episode, year, quality
//! tags) from free-text release names such as
//! `The.Matrix.1999.1080p.BluRay.x264-GROUP.mkv`.

use once_cell::sync::Lazy;
use regex_lite::{Captures, Regex};
use serde::Serialize;

/// Video container extensions stripped from the end of a release name.
const VIDEO_EXTENSIONS: &[&str] = &[
    "3gp", "avi", "divx", "flv", "m2ts", "m4v", "mkv", "mov", "mp4", "mpeg", "mpg", "ts", "webm",
    "wmv", "xvid",
];

static LEADING_GROUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\[[^\]]*\]\s*").unwrap());

static EXTENSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.([A-Za-z0-9]{2,4})$").unwrap());

static SEASON_EPISODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bs(\d{1,2})[ .-]?e(\d{1,3})(?:[ .-]?e\d{1,3})*\b").unwrap()
});

static CROSS_EPISODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{1,2})x(\d{2,3})\b").unwrap());

static SEASON_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:s|season[ .-]?)(\d{1,2})\b").unwrap());

static YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[(\[]?\b((?:19|20)\d{2})\b[)\]]?").unwrap());

static RESOLUTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{3,4}[pi]|4k|uhd)\b").unwrap());

static SOURCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(blu-?ray|bdrip|brrip|bdremux|remux|web-?dl|web-?rip|hdtv|dvdrip|hdrip|dvdscr)\b",
    )
    .unwrap()
});

static CODEC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(x\.?264|x\.?265|h\.?264|h\.?265|hevc|xvid|divx|av1)\b").unwrap()
});

/// Structured guess extracted from a release name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedRelease {
    /// Canonical title, empty when nothing precedes the first recognized tag.
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode: Option<u32>,
    /// Normalized resolution (`720p`, `1080p`, `2160p`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codec: Option<String>,
    /// Container extension without the dot, lowercase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

/// Parses release names into a [`ParsedRelease`].
///
/// Strict title matching depends on this trait so callers can plug in a
/// different parser.
pub trait TitleParser: Send + Sync {
    /// Parser name for logging.
    fn name(&self) -> &str;

    /// Parse a release name. Never fails; unknown parts are left empty.
    fn parse(&self, name: &str) -> ParsedRelease;
}

/// Heuristic, regex-based release-name parser.
///
/// The title is whatever precedes the earliest recognized tag (episode
/// marker, year, resolution, source or codec). A year at the very start is
/// treated as part of the title ("1917", "2001 A Space Odyssey").
#[derive(Debug, Clone, Copy, Default)]
pub struct ReleaseNameParser;

impl ReleaseNameParser {
    pub fn new() -> Self {
        Self
    }
}

impl TitleParser for ReleaseNameParser {
    fn name(&self) -> &str {
        "release-name"
    }

    fn parse(&self, name: &str) -> ParsedRelease {
        let mut parsed = ParsedRelease::default();

        let mut working = LEADING_GROUP.replace(name.trim(), "").into_owned();

        if let Some(caps) = EXTENSION.captures(&working) {
            let ext = caps[1].to_lowercase();
            if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
                let cut = caps.get(0).map(|m| m.start()).unwrap_or(working.len());
                working.truncate(cut);
                parsed.extension = Some(ext);
            }
        }

        // `_` is a word character, which would hide tags from `\b`.
        let working = working.replace('_', " ");

        let mut title_end = working.len();
        let mut mark = |start: usize| title_end = title_end.min(start);

        if let Some(caps) = SEASON_EPISODE.captures(&working) {
            parsed.season = capture_number(&caps, 1);
            parsed.episode = capture_number(&caps, 2);
            mark(match_start(&caps));
        } else if let Some(caps) = CROSS_EPISODE.captures(&working) {
            parsed.season = capture_number(&caps, 1);
            parsed.episode = capture_number(&caps, 2);
            mark(match_start(&caps));
        } else if let Some(caps) = SEASON_ONLY.captures(&working) {
            parsed.season = capture_number(&caps, 1);
            mark(match_start(&caps));
        }

        if let Some(caps) = YEAR.captures_iter(&working).find(|c| match_start(c) > 0) {
            parsed.year = capture_number(&caps, 1);
            mark(match_start(&caps));
        }

        if let Some(caps) = RESOLUTION.captures(&working) {
            parsed.resolution = Some(normalize_resolution(&caps[1]));
            mark(match_start(&caps));
        }

        if let Some(caps) = SOURCE.captures(&working) {
            parsed.source = Some(caps[1].to_lowercase().replace('-', ""));
            mark(match_start(&caps));
        }

        if let Some(caps) = CODEC.captures(&working) {
            parsed.codec = Some(caps[1].to_lowercase().replace('.', ""));
            mark(match_start(&caps));
        }

        parsed.title = tidy_title(&working[..title_end]);
        parsed
    }
}

fn match_start(caps: &Captures<'_>) -> usize {
    caps.get(0).map(|m| m.start()).unwrap_or(0)
}

fn capture_number(caps: &Captures<'_>, group: usize) -> Option<u32> {
    caps.get(group).and_then(|m| m.as_str().parse().ok())
}

fn normalize_resolution(raw: &str) -> String {
    let lower = raw.to_lowercase();
    match lower.as_str() {
        "4k" | "uhd" => "2160p".to_string(),
        _ => lower,
    }
}

/// Turn the raw title prefix into readable words.
fn tidy_title(raw: &str) -> String {
    let spaced = raw.replace('.', " ");
    let trimmed = spaced.trim_end_matches(|c: char| c.is_whitespace() || "-([{,:".contains(c));
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}
