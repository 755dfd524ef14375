//! JSON output formatting.

use serde_json::{Value, json};

use crate::models::PaperRecord;

/// Create a compact record representation for JSON output.
///
/// Optional fields appear only when present.
#[must_use]
pub fn compact_record(record: &PaperRecord) -> Value {
    let mut obj = json!({
        "title": record.title,
        "authors": record.authors,
        "year": record.year,
        "citations": record.citation_count,
    });

    if let Some(venue) = &record.venue {
        obj["venue"] = json!(venue);
    }

    if let Some(url) = &record.url {
        obj["url"] = json!(url);
    }

    if let Some(doi) = record.doi() {
        obj["doi"] = json!(doi);
    }

    if let Some(abs) = &record.r#abstract {
        obj["abstract"] = json!(abs);
    }

    obj
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_record_omits_absent_fields() {
        let record = PaperRecord { title: "T".into(), citation_count: 3, ..Default::default() };
        let value = compact_record(&record);
        assert_eq!(value["title"], "T");
        assert_eq!(value["citations"], 3);
        assert!(value["year"].is_null());
        assert!(value.get("venue").is_none());
        assert!(value.get("doi").is_none());
    }
}
