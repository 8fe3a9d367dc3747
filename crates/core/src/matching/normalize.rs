//! Title normalization.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use unicode_normalization::UnicodeNormalization;

/// Words dropped by [`clean_title`] when surrounded by whitespace.
///
/// Removal runs one word at a time, in this order.
pub const STOP_WORDS: &[&str] = &[
    "the", "and", "of", "in", "to", "it", "is", "for", "that", "on", "at", "with", "a", "an",
];

static STOP_WORD_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    STOP_WORDS
        .iter()
        .map(|word| Regex::new(&format!(r"\s+{}\s+", word)).unwrap())
        .collect()
});

/// Combining Diacritical Marks block.
fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// Normalize a title to a comparable form.
///
/// Decomposes (NFD) and drops combining accents (`é` -> `e`), turns `-`, `_`
/// and `.` into spaces, then removes every character that is not an ASCII
/// letter or digit, whitespace or `'`. Whitespace runs collapse to one space
/// and the result is trimmed. Case is preserved.
pub fn sanitize_title(title: &str) -> String {
    let kept: String = title
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| match c {
            '-' | '_' | '.' => ' ',
            other => other,
        })
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '\'')
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Stronger normalization: [`sanitize_title`], lowercased, with [`STOP_WORDS`]
/// removed from the inside of the title.
///
/// A stop word at the very start or end is kept, as is the second of two
/// adjacent stop words of the same kind ("the the").
pub fn clean_title(title: &str) -> String {
    let mut cleaned = sanitize_title(title).to_lowercase();

    for pattern in STOP_WORD_PATTERNS.iter() {
        cleaned = pattern.replace_all(&cleaned, " ").into_owned();
    }

    cleaned.trim().to_string()
}
