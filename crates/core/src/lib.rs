pub mod config;
pub mod matching;
pub mod metrics;
pub mod searcher;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, EasynewsConfig,
    MatchingConfig, SanitizedConfig,
};
pub use matching::{
    build_query, clean_title, matches_title, sanitize_title, MediaKind, MediaMeta,
    NormalizationPolicy, ParsedRelease, ReleaseNameParser, TitleMatcher, TitleParser,
};
pub use searcher::{
    links, Credentials, EasynewsClient, FileRecord, SearchError, SearchResponse, Searcher,
};
