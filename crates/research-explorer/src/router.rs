//! Decides how raw user input is looked up.
//!
//! This is a prefix/substring heuristic, not a URL parser: anything that does not
//! cleanly yield a DOI or paper ID falls through to a topic search.

use crate::models::{QueryKind, SearchQuery, SortKey};

/// Web domain of the primary provider's paper pages.
pub const PRIMARY_WEB_DOMAIN: &str = "semanticscholar.org";

const DOI_HOST: &str = "doi.org";
const DOI_PREFIX: &str = "10.";

/// A classified input with the extracted lookup target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Free-text search.
    Topic(String),
    /// Lookup by DOI.
    Doi(String),
    /// Lookup by opaque primary-provider paper ID.
    PaperId(String),
}

impl Route {
    /// The query kind for this route.
    #[must_use]
    pub const fn kind(&self) -> QueryKind {
        match self {
            Self::Topic(_) => QueryKind::Topic,
            Self::Doi(_) => QueryKind::Doi,
            Self::PaperId(_) => QueryKind::IdentifierUrl,
        }
    }

    /// The topic text, DOI, or paper ID.
    #[must_use]
    pub fn target(&self) -> &str {
        match self {
            Self::Topic(s) | Self::Doi(s) | Self::PaperId(s) => s,
        }
    }
}

/// Classify raw input.
#[must_use]
pub fn classify(raw_input: &str) -> QueryKind {
    route(raw_input).kind()
}

/// Classify raw input and extract its lookup target.
///
/// Rules in priority order:
/// 1. starts with `10.` or mentions `doi.org` → DOI (suffix after `doi.org/` for URLs)
/// 2. mentions the primary provider's domain → paper ID (last path segment)
/// 3. otherwise → topic
#[must_use]
pub fn route(raw_input: &str) -> Route {
    let input = raw_input.trim();

    if input.starts_with(DOI_PREFIX) {
        return Route::Doi(input.to_string());
    }

    if input.contains(DOI_HOST) {
        if let Some(doi) = doi_from_url(input) {
            return Route::Doi(doi);
        }
        tracing::debug!(input, "doi.org input without a usable DOI, searching as topic");
        return Route::Topic(input.to_string());
    }

    if input.contains(PRIMARY_WEB_DOMAIN) {
        if let Some(id) = last_path_segment(input) {
            return Route::PaperId(id);
        }
        tracing::debug!(input, "Paper URL without an ID, searching as topic");
    }

    Route::Topic(input.to_string())
}

/// Build a [`SearchQuery`] with no year bounds.
#[must_use]
pub fn parse_query(raw_input: &str, sort_key: SortKey) -> SearchQuery {
    let route = route(raw_input);
    SearchQuery {
        raw_input: raw_input.to_string(),
        kind: route.kind(),
        target: route.target().to_string(),
        year_from: None,
        year_to: None,
        sort_key,
    }
}

fn doi_from_url(input: &str) -> Option<String> {
    let start = input.find(DOI_HOST)? + DOI_HOST.len();
    let rest = strip_query(&input[start..]).trim_start_matches('/');
    rest.starts_with(DOI_PREFIX).then(|| rest.trim_end_matches('/').to_string())
}

fn last_path_segment(input: &str) -> Option<String> {
    let start = input.find(PRIMARY_WEB_DOMAIN)? + PRIMARY_WEB_DOMAIN.len();
    let segment = strip_query(&input[start..]).split('/').rev().find(|s| !s.is_empty())?;
    (segment != "paper").then(|| segment.to_string())
}

fn strip_query(s: &str) -> &str {
    s.split(['?', '#']).next().unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_doi() {
        assert_eq!(classify("10.1016/j.agwat.2023.108250"), QueryKind::Doi);
        assert_eq!(
            route("  10.1016/j.agwat.2023.108250 "),
            Route::Doi("10.1016/j.agwat.2023.108250".into())
        );
    }

    #[test]
    fn test_doi_url_extracts_suffix() {
        assert_eq!(route("https://doi.org/10.1016/x"), Route::Doi("10.1016/x".into()));
        assert_eq!(
            route("http://dx.doi.org/10.1145/1327452.1327492?via=x"),
            Route::Doi("10.1145/1327452.1327492".into())
        );
    }

    #[test]
    fn test_malformed_doi_url_falls_back_to_topic() {
        assert_eq!(classify("https://doi.org/"), QueryKind::Topic);
        assert_eq!(classify("doi.org is down"), QueryKind::Topic);
    }

    #[test]
    fn test_paper_url() {
        let id = "204e3073870fae3d05bcbc2f6a8e263d9b72e776";
        let url = format!("https://www.semanticscholar.org/paper/Attention-Is-All-You-Need/{id}");
        let url = url.as_str();
        assert_eq!(route(url), Route::PaperId(id.into()));
        assert_eq!(classify(url), QueryKind::IdentifierUrl);
    }

    #[test]
    fn test_paper_url_trailing_slash_and_query() {
        assert_eq!(
            route("https://www.semanticscholar.org/paper/abc123/?utm=1"),
            Route::PaperId("abc123".into())
        );
        assert_eq!(classify("https://www.semanticscholar.org/paper/"), QueryKind::Topic);
    }

    #[test]
    fn test_topic() {
        assert_eq!(classify("machine learning"), QueryKind::Topic);
        assert_eq!(route(" machine learning "), Route::Topic("machine learning".into()));
    }

    #[test]
    fn test_parse_query() {
        let query = parse_query("https://doi.org/10.1016/x", SortKey::MostCitations);
        assert_eq!(query.kind, QueryKind::Doi);
        assert_eq!(query.target, "10.1016/x");
        assert_eq!(query.sort_key, SortKey::MostCitations);
        assert!(query.year_from.is_none());
    }
}
