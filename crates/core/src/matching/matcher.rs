//! Title matcher.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::normalize::{clean_title, sanitize_title};
use super::title_parser::{ReleaseNameParser, TitleParser};

/// How titles and queries are brought to a comparable form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationPolicy {
    /// [`sanitize_title`], lowercased.
    #[default]
    Sanitize,
    /// [`clean_title`]: sanitized, lowercased, inner stop words removed.
    Clean,
}

impl NormalizationPolicy {
    /// Apply this policy to a string.
    pub fn normalize(self, text: &str) -> String {
        match self {
            Self::Sanitize => sanitize_title(text).to_lowercase(),
            Self::Clean => clean_title(text),
        }
    }
}

/// Decides whether a result title belongs to a query.
///
/// Non-strict matching is substring containment of the normalized query in
/// the normalized title. Strict matching compares the title extracted by the
/// release-name parser for equality, falling back to containment only when
/// the parser finds no title at all.
#[derive(Clone)]
pub struct TitleMatcher {
    policy: NormalizationPolicy,
    parser: Arc<dyn TitleParser>,
}

impl std::fmt::Debug for TitleMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TitleMatcher")
            .field("policy", &self.policy)
            .field("parser", &self.parser.name())
            .finish()
    }
}

impl Default for TitleMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl TitleMatcher {
    /// Create a matcher with the `sanitize` policy and the bundled parser.
    pub fn new() -> Self {
        Self::with_policy(NormalizationPolicy::default())
    }

    /// Create a matcher with a specific normalization policy.
    pub fn with_policy(policy: NormalizationPolicy) -> Self {
        Self {
            policy,
            parser: Arc::new(ReleaseNameParser::new()),
        }
    }

    /// Replace the release-name parser used in strict mode.
    pub fn with_parser(mut self, parser: Arc<dyn TitleParser>) -> Self {
        self.parser = parser;
        self
    }

    /// Normalize a string with this matcher's policy.
    pub fn normalize(&self, text: &str) -> String {
        self.policy.normalize(text)
    }

    /// Check whether `title` matches `query`.
    ///
    /// An empty query matches every title.
    pub fn matches(&self, title: &str, query: &str, strict: bool) -> bool {
        let normalized_query = self.normalize(query);

        if strict {
            let parsed = self.parser.parse(title);
            if !parsed.title.is_empty() {
                let normalized_parsed = self.normalize(&parsed.title);
                trace!(
                    title = title,
                    parsed_title = %normalized_parsed,
                    query = %normalized_query,
                    "Strict title comparison"
                );
                return normalized_parsed == normalized_query;
            }
        }

        self.normalize(title).contains(&normalized_query)
    }

    /// Resolution reported by the parser for `title`, else `fallback`.
    pub fn quality(&self, title: &str, fallback: Option<&str>) -> Option<String> {
        self.parser
            .parse(title)
            .resolution
            .or_else(|| fallback.map(str::to_string))
    }
}

/// Match with the default policy and parser.
pub fn matches_title(title: &str, query: &str, strict: bool) -> bool {
    TitleMatcher::new().matches(title, query, strict)
}
