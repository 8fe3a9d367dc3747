use serde::{Deserialize, Serialize};

use crate::matching::NormalizationPolicy;
use crate::searcher::Credentials;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub easynews: EasynewsConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
}

/// Easynews search client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EasynewsConfig {
    /// Account credentials. The client refuses to start without them.
    #[serde(default)]
    pub credentials: Option<Credentials>,
    /// Members API host (default: https://members.easynews.com)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds (default: 20)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Records requested per page (default: 1000)
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for EasynewsConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            page_size: default_page_size(),
        }
    }
}

fn default_base_url() -> String {
    "https://members.easynews.com".to_string()
}

fn default_timeout() -> u64 {
    20
}

fn default_page_size() -> u32 {
    1000
}

/// Result filtering configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatchingConfig {
    /// Compare the parsed release title for equality instead of substring containment.
    #[serde(default)]
    pub strict: bool,
    /// Normalization applied to both titles and queries before comparing.
    #[serde(default)]
    pub normalization: NormalizationPolicy,
    /// Drop short, password protected, infected and non-video files.
    #[serde(default = "default_true")]
    pub skip_bad_videos: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            strict: false,
            normalization: NormalizationPolicy::default(),
            skip_bad_videos: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Sanitized config for logging (credentials redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub easynews: SanitizedEasynewsConfig,
    pub matching: MatchingConfig,
}

/// Sanitized Easynews config (only the username is shown)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedEasynewsConfig {
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub password_configured: bool,
    pub timeout_secs: u64,
    pub page_size: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        let easynews = &config.easynews;
        Self {
            easynews: SanitizedEasynewsConfig {
                base_url: easynews.base_url.clone(),
                username: easynews.credentials.as_ref().map(|c| c.username.clone()),
                password_configured: easynews
                    .credentials
                    .as_ref()
                    .map(|c| !c.password.is_empty())
                    .unwrap_or(false),
                timeout_secs: easynews.timeout_secs,
                page_size: easynews.page_size,
            },
            matching: config.matching.clone(),
        }
    }
}
