//! Conversion of raw upstream hits into canonical records.
//!
//! Every function here is total: missing or malformed fields degrade to their
//! default or absent value.

use std::collections::BTreeMap;

use crate::models::{
    CodeHit, DatasetHit, KaggleDataset, Paper, PaperRecord, RepoHit, ResourceLink, SourceKind,
};

const KAGGLE_DATASET_URL: &str = "https://www.kaggle.com/datasets";

/// Normalize a primary paper hit.
#[must_use]
pub fn normalize(hit: Paper) -> PaperRecord {
    let authors = hit
        .authors
        .into_iter()
        .filter_map(|a| non_blank(a.name))
        .collect();

    let venue =
        non_blank(hit.publication_venue.and_then(|v| v.name)).or_else(|| non_blank(hit.venue));

    PaperRecord {
        title: hit.title.unwrap_or_default(),
        authors,
        year: hit.year.and_then(four_digit_year),
        citation_count: hit
            .citation_count
            .map_or(0, |c| u32::try_from(c.max(0)).unwrap_or(u32::MAX)),
        venue,
        r#abstract: non_blank(hit.r#abstract),
        url: non_blank(hit.url),
        external_ids: hit.external_ids.map(stringify_ids).filter(|ids| !ids.is_empty()),
    }
}

/// Normalize a Papers with Code hit.
#[must_use]
pub fn normalize_code_hit(hit: CodeHit) -> ResourceLink {
    ResourceLink {
        source: SourceKind::PapersWithCode,
        title: hit.paper_title.unwrap_or_default(),
        url: non_blank(hit.url),
        stars: None,
    }
}

/// Normalize a GitHub repository hit.
#[must_use]
pub fn normalize_repo_hit(hit: RepoHit) -> ResourceLink {
    ResourceLink {
        source: SourceKind::GitHub,
        title: hit.full_name.unwrap_or_default(),
        url: non_blank(hit.html_url),
        stars: hit.stargazers_count,
    }
}

/// Normalize a Zenodo record.
#[must_use]
pub fn normalize_dataset_hit(hit: DatasetHit) -> ResourceLink {
    ResourceLink {
        source: SourceKind::Zenodo,
        title: hit.metadata.title.unwrap_or_default(),
        url: non_blank(hit.links.html),
        stars: None,
    }
}

/// Normalize a Kaggle dataset, building its URL from the reference when absent.
#[must_use]
pub fn normalize_kaggle_dataset(hit: KaggleDataset) -> ResourceLink {
    let reference = non_blank(hit.reference);
    let url = non_blank(hit.url)
        .or_else(|| reference.as_ref().map(|r| format!("{KAGGLE_DATASET_URL}/{r}")));

    ResourceLink {
        source: SourceKind::Kaggle,
        title: non_blank(hit.title).or(reference).unwrap_or_default(),
        url,
        stars: None,
    }
}

fn four_digit_year(year: i64) -> Option<i32> {
    (1000..=9999).contains(&year).then_some(year as i32)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn stringify_ids(ids: BTreeMap<String, serde_json::Value>) -> BTreeMap<String, String> {
    ids.into_iter()
        .filter_map(|(scheme, value)| match value {
            serde_json::Value::String(s) if !s.is_empty() => Some((scheme, s)),
            serde_json::Value::Number(n) => Some((scheme, n.to_string())),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn paper(value: serde_json::Value) -> Paper {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_title_only_hit() {
        let record = normalize(paper(json!({"title": "Lonely"})));
        assert_eq!(record.title, "Lonely");
        assert!(record.authors.is_empty());
        assert_eq!(record.citation_count, 0);
        assert!(record.year.is_none());
        assert!(record.venue.is_none());
        assert!(record.r#abstract.is_none());
        assert!(record.url.is_none());
    }

    #[test]
    fn test_authors_skip_missing_names() {
        let record = normalize(paper(json!({
            "title": "T",
            "authors": [{"name": "Ada"}, {"authorId": "2"}, {"name": ""}, {"name": "Grace"}]
        })));
        assert_eq!(record.authors, vec!["Ada", "Grace"]);
    }

    #[test]
    fn test_venue_prefers_structured_name() {
        let both = normalize(paper(json!({
            "venue": "NeurIPS",
            "publicationVenue": {"name": "Neural Information Processing Systems"}
        })));
        assert_eq!(both.venue.as_deref(), Some("Neural Information Processing Systems"));

        let flat = normalize(paper(json!({"venue": "NeurIPS", "publicationVenue": null})));
        assert_eq!(flat.venue.as_deref(), Some("NeurIPS"));

        let blank = normalize(paper(json!({"venue": ""})));
        assert!(blank.venue.is_none());
    }

    #[test]
    fn test_numeric_fields_clamped() {
        let record = normalize(paper(json!({"year": 99, "citationCount": -4})));
        assert!(record.year.is_none());
        assert_eq!(record.citation_count, 0);

        let record = normalize(paper(json!({"year": "2020", "citationCount": "many"})));
        assert!(record.year.is_none());
        assert_eq!(record.citation_count, 0);
    }

    #[test]
    fn test_external_ids_stringified() {
        let record = normalize(paper(json!({
            "externalIds": {"DOI": "10.1/x", "CorpusId": 12, "MAG": null}
        })));
        assert_eq!(record.doi(), Some("10.1/x"));
        assert_eq!(record.external_ids.unwrap().get("CorpusId").map(String::as_str), Some("12"));
    }

    #[test]
    fn test_kaggle_url_from_reference() {
        let link = normalize_kaggle_dataset(KaggleDataset {
            reference: Some("owner/crops".into()),
            title: None,
            url: None,
        });
        assert_eq!(link.title, "owner/crops");
        assert_eq!(link.url.as_deref(), Some("https://www.kaggle.com/datasets/owner/crops"));
    }

    #[test]
    fn test_repo_hit_keeps_stars() {
        let link = normalize_repo_hit(RepoHit {
            full_name: Some("a/b".into()),
            html_url: Some("https://github.com/a/b".into()),
            stargazers_count: Some(42),
        });
        assert_eq!(link.source, SourceKind::GitHub);
        assert_eq!(link.stars, Some(42));
    }
}
