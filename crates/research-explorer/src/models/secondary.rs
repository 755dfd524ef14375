//! Raw hit shapes from the secondary (code and dataset) sources.

use serde::{Deserialize, Serialize};

use super::lenient;

/// Papers with Code search response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodeSearchResponse {
    /// Matching entries.
    #[serde(default, deserialize_with = "lenient::skip_invalid")]
    pub results: Vec<CodeHit>,
}

/// One Papers with Code hit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodeHit {
    /// Title of the linked paper.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub paper_title: Option<String>,

    /// Link to the code page.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub url: Option<String>,
}

/// GitHub repository search response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepoSearchResponse {
    /// Matching repositories, most stars first.
    #[serde(default, deserialize_with = "lenient::skip_invalid")]
    pub items: Vec<RepoHit>,
}

/// One GitHub repository.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepoHit {
    /// `owner/name`.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub full_name: Option<String>,

    /// Browser URL.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub html_url: Option<String>,

    /// Star count.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub stargazers_count: Option<u64>,
}

/// Zenodo records response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZenodoResponse {
    /// Hit envelope.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub hits: ZenodoHits,
}

/// Zenodo hit envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZenodoHits {
    /// Matching records.
    #[serde(default, deserialize_with = "lenient::skip_invalid")]
    pub hits: Vec<DatasetHit>,
}

/// One Zenodo record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetHit {
    /// Descriptive metadata.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub metadata: DatasetMetadata,

    /// Record links.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub links: DatasetLinks,
}

/// Zenodo record metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetMetadata {
    /// Record title.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub title: Option<String>,
}

/// Zenodo record links.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetLinks {
    /// Landing page.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub html: Option<String>,
}

/// One Kaggle dataset from `datasets/list`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KaggleDataset {
    /// `owner/slug` reference.
    #[serde(rename = "ref", default, deserialize_with = "lenient::or_default")]
    pub reference: Option<String>,

    /// Dataset title.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub title: Option<String>,

    /// Dataset page, when the API includes it.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub url: Option<String>,
}
