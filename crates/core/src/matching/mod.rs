//! Title matching - normalization, release-name parsing and query building.
//!
//! Used to decide which search results belong to the requested title:
//! - Normalizing titles and queries to a comparable canonical form
//! - Extracting the canonical title from release names (strict mode)
//! - Building the search string sent to the search backend
//!
//! Everything here is pure string manipulation and works offline.

mod matcher;
mod normalize;
mod query_builder;
mod title_parser;

pub use matcher::{matches_title, NormalizationPolicy, TitleMatcher};
pub use normalize::{clean_title, sanitize_title, STOP_WORDS};
pub use query_builder::{build_query, MediaKind, MediaMeta, ParseMediaKindError};
pub use title_parser::{ParsedRelease, ReleaseNameParser, TitleParser};
