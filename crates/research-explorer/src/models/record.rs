//! Canonical records shared by filtering, display, export, and enrichment.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A normalized paper.
///
/// Created once per upstream hit and never mutated afterwards; filtering and
/// sorting produce new views.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperRecord {
    /// Title, possibly empty.
    pub title: String,

    /// Author names in upstream order.
    pub authors: Vec<String>,

    /// Four-digit publication year.
    pub year: Option<i32>,

    /// Citation count, zero when unknown.
    pub citation_count: u32,

    /// Venue name.
    pub venue: Option<String>,

    /// Abstract text.
    pub r#abstract: Option<String>,

    /// Landing page.
    pub url: Option<String>,

    /// External identifiers keyed by scheme (`DOI`, `ArXiv`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_ids: Option<BTreeMap<String, String>>,
}

impl PaperRecord {
    /// Author names as a comma-separated string.
    #[must_use]
    pub fn author_names(&self) -> String {
        self.authors.join(", ")
    }

    /// Title, or a placeholder for display when empty.
    #[must_use]
    pub fn title_or_default(&self) -> &str {
        if self.title.trim().is_empty() { "Untitled" } else { &self.title }
    }

    /// The DOI if available.
    #[must_use]
    pub fn doi(&self) -> Option<&str> {
        self.external_ids.as_ref()?.get("DOI").map(String::as_str)
    }

    /// Whether two records describe the same paper.
    #[must_use]
    pub fn same_paper(&self, other: &Self) -> bool {
        self.title == other.title && self.url == other.url
    }
}

/// Secondary source identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Papers with Code.
    PapersWithCode,
    /// GitHub repository search.
    GitHub,
    /// Zenodo dataset archive.
    Zenodo,
    /// Kaggle dataset catalog.
    Kaggle,
}

impl SourceKind {
    /// Human-readable name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PapersWithCode => "Papers with Code",
            Self::GitHub => "GitHub",
            Self::Zenodo => "Zenodo",
            Self::Kaggle => "Kaggle",
        }
    }
}

/// A normalized code or dataset link from a secondary source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLink {
    /// Where this link came from.
    pub source: SourceKind,

    /// Display title.
    pub title: String,

    /// Target URL.
    pub url: Option<String>,

    /// Star count, repository sources only.
    pub stars: Option<u64>,
}

/// Outcome of a lookup that may require configuration.
///
/// `Unavailable` means the source was never queried because credentials are
/// missing; `Found(vec![])` means it was queried and returned nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// The source was queried.
    Found(Vec<T>),
    /// The source is not configured.
    Unavailable,
}

impl<T> Lookup<T> {
    /// Items found, empty when unavailable.
    #[must_use]
    pub fn items(&self) -> &[T] {
        match self {
            Self::Found(items) => items,
            Self::Unavailable => &[],
        }
    }

    /// Returns true if the source is not configured.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }

    /// Apply `f` to every found item.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Lookup<U> {
        match self {
            Self::Found(items) => Lookup::Found(items.into_iter().map(f).collect()),
            Self::Unavailable => Lookup::Unavailable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_or_default() {
        let record = PaperRecord::default();
        assert_eq!(record.title_or_default(), "Untitled");
    }

    #[test]
    fn test_doi_lookup() {
        let record = PaperRecord {
            external_ids: Some(BTreeMap::from([("DOI".to_string(), "10.1/x".to_string())])),
            ..Default::default()
        };
        assert_eq!(record.doi(), Some("10.1/x"));
    }

    #[test]
    fn test_lookup_unavailable_is_not_empty_found() {
        let unavailable: Lookup<u8> = Lookup::Unavailable;
        let empty: Lookup<u8> = Lookup::Found(vec![]);
        assert_ne!(unavailable, empty);
        assert!(unavailable.items().is_empty());
        assert!(unavailable.is_unavailable());
        assert!(!empty.is_unavailable());
    }
}
