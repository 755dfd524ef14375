//! Title-to-query reduction for secondary lookups.
//!
//! Code and dataset providers match poorly on full titles, so a title is cut down
//! to a handful of content words. Over-filtering is acceptable here.

/// Maximum tokens kept in a keyword query.
pub const MAX_KEYWORDS: usize = 6;

/// Words dropped from keyword queries.
const STOPWORDS: &[&str] = &[
    // articles and conjunctions
    "a", "an", "the", "and", "or", "nor", "but",
    // prepositions
    "of", "in", "on", "for", "to", "with", "without", "by", "at", "as", "into", "onto", "over",
    "under", "about", "above", "below", "between", "among", "across", "after", "before",
    "during", "within", "towards", "toward", "upon", "against", "beyond", "per",
    // common verbs and pronouns in titles
    "is", "are", "be", "its", "their", "this", "that", "these", "those",
    // domain filler
    "using", "based", "via", "from", "through", "mostly",
];

/// Reduce a title to at most [`MAX_KEYWORDS`] lowercase alphabetic content words.
///
/// Tokens are split on whitespace, trailing `.` and `,` are stripped, and any token
/// that is then not purely alphabetic (digits, hyphens, other punctuation) is dropped
/// along with stopwords. Order is preserved. Returns an empty string when nothing
/// survives.
#[must_use]
pub fn extract_keywords(title: &str) -> String {
    title
        .to_lowercase()
        .split_whitespace()
        .map(|token| token.trim_end_matches(['.', ',']))
        .filter(|token| is_word(token))
        .filter(|token| !STOPWORDS.contains(token))
        .take(MAX_KEYWORDS)
        .collect::<Vec<_>>()
        .join(" ")
}

// Some characters have no lowercase mapping; those tokens are dropped too.
fn is_word(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_alphabetic() && !c.is_uppercase())
}
