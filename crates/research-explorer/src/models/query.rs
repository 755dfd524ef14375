//! Search query and display parameters.

use serde::{Deserialize, Serialize};

/// How the raw input will be looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    /// Free-text topic search.
    Topic,
    /// Digital Object Identifier.
    Doi,
    /// Paper page URL on the primary provider.
    IdentifierUrl,
}

/// User input plus the parameters resolved from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// Input as typed.
    pub raw_input: String,

    /// Derived from `raw_input` by [`crate::router::classify`].
    pub kind: QueryKind,

    /// Topic text, DOI, or opaque paper ID depending on `kind`.
    pub target: String,

    /// Lower year bound (inclusive).
    pub year_from: Option<i32>,

    /// Upper year bound (inclusive).
    pub year_to: Option<i32>,

    /// Ordering of the result view.
    pub sort_key: SortKey,
}

/// Ordering of the result view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Most recent year first.
    #[default]
    Newest,
    /// Highest citation count first.
    MostCitations,
}

impl SortKey {
    /// Parse a user-facing name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "newest" | "new" | "year" => Some(Self::Newest),
            "citations" | "cited" | "most-citations" | "most_citations" => {
                Some(Self::MostCitations)
            }
            _ => None,
        }
    }

    /// Label shown to the user.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Newest => "Newest First",
            Self::MostCitations => "Most Citations",
        }
    }
}

/// File format for exporting the current view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Comma-separated values.
    #[default]
    Csv,
    /// JSON array of records.
    Json,
}

impl ExportFormat {
    /// Get the file extension for this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// Default output file name.
    #[must_use]
    pub const fn default_file_name(self) -> &'static str {
        match self {
            Self::Csv => "research_papers.csv",
            Self::Json => "research_papers.json",
        }
    }

    /// Infer the format from a path's extension, defaulting to CSV.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        if path.to_lowercase().ends_with(".json") { Self::Json } else { Self::Csv }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_parse() {
        assert_eq!(SortKey::parse("Newest"), Some(SortKey::Newest));
        assert_eq!(SortKey::parse(" citations "), Some(SortKey::MostCitations));
        assert_eq!(SortKey::parse("random"), None);
    }

    #[test]
    fn test_export_format_from_path() {
        assert_eq!(ExportFormat::from_path("out.JSON"), ExportFormat::Json);
        assert_eq!(ExportFormat::from_path("out.csv"), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_path("out"), ExportFormat::Csv);
        assert_eq!(ExportFormat::Json.extension(), "json");
    }
}
