//! Paper hit model matching the Semantic Scholar API schema.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::lenient;

/// A raw paper hit from Semantic Scholar.
///
/// Every field is optional and tolerant of wrong types; [`crate::normalize`]
/// turns it into a [`super::PaperRecord`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    /// Semantic Scholar paper ID.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub paper_id: Option<String>,

    /// Paper title.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub title: Option<String>,

    /// Paper abstract.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub r#abstract: Option<String>,

    /// Publication year.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub year: Option<i64>,

    /// Number of citations this paper has received.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub citation_count: Option<i64>,

    /// List of authors, in upstream order.
    #[serde(default, deserialize_with = "lenient::skip_invalid")]
    pub authors: Vec<AuthorRef>,

    /// Flat venue string.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub venue: Option<String>,

    /// Structured publication venue.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub publication_venue: Option<PublicationVenue>,

    /// Landing page on semanticscholar.org.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub url: Option<String>,

    /// External identifiers (DOI, ArXiv, CorpusId, ...).
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub external_ids: Option<BTreeMap<String, serde_json::Value>>,
}

/// Author reference embedded in a paper.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRef {
    /// Author ID.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub author_id: Option<String>,

    /// Display name.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub name: Option<String>,
}

/// Structured venue information.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublicationVenue {
    /// Venue name.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub name: Option<String>,
}

/// Search result wrapper.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResult {
    /// Total number of matching papers.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub total: i64,

    /// Papers in this page; entries that are not objects are dropped.
    #[serde(default, deserialize_with = "lenient::skip_invalid")]
    pub data: Vec<Paper>,
}
