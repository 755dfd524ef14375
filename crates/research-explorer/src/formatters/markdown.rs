//! Markdown output formatting.

use std::borrow::Cow;

use crate::config::api;
use crate::enrichment::Enrichment;
use crate::models::{Lookup, PaperRecord, ResourceLink};
use crate::processor::Page;

/// Truncate text to `max_chars` characters, appending `...` when cut.
#[must_use]
pub fn preview(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => Cow::Owned(format!("{}...", &text[..cut])),
        None => Cow::Borrowed(text),
    }
}

/// Format one page of results.
#[must_use]
pub fn format_page(page: &Page<'_>, total: usize) -> String {
    if page.records.is_empty() {
        return "No papers found.".to_string();
    }

    let mut output = format!(
        "# Research Papers ({total} results, page {} of {})\n\n",
        page.number, page.page_count
    );

    for (i, record) in page.records.iter().enumerate() {
        output.push_str(&format_record_markdown(record, page.offset + i + 1));
        output.push_str("\n---\n\n");
    }

    output
}

/// Format a single record for list views, with a truncated abstract.
#[must_use]
pub fn format_record_markdown(record: &PaperRecord, index: usize) -> String {
    let mut output = header_and_meta(record, index);

    if let Some(abs) = &record.r#abstract {
        output.push_str(&format!(
            "**Abstract**: {}\n\n",
            preview(abs, api::ABSTRACT_PREVIEW_CHARS)
        ));
    }

    if let Some(url) = &record.url {
        output.push_str(&format!("[View Paper]({url})\n"));
    }

    output
}

/// Format a single record with its full abstract and identifiers.
#[must_use]
pub fn format_record_detail(record: &PaperRecord, index: usize) -> String {
    let mut output = header_and_meta(record, index);

    if let Some(ids) = &record.external_ids {
        let ids = ids.iter().map(|(k, v)| format!("{k}: {v}")).collect::<Vec<_>>();
        output.push_str(&format!("**IDs**: {}\n\n", ids.join(" | ")));
    }

    if let Some(doi) = record.doi() {
        output.push_str(&format!("**DOI**: [https://doi.org/{doi}](https://doi.org/{doi})\n\n"));
    }

    match &record.r#abstract {
        Some(abs) => output.push_str(&format!("**Abstract**: {abs}\n\n")),
        None => output.push_str("_No abstract available._\n\n"),
    }

    if let Some(url) = &record.url {
        output.push_str(&format!("[View Paper]({url})\n"));
    }

    output
}

fn header_and_meta(record: &PaperRecord, index: usize) -> String {
    let mut output = format!("## {}. {}\n\n", index, record.title_or_default());

    if !record.authors.is_empty() {
        output.push_str(&format!("**Authors**: {}\n\n", record.author_names()));
    }

    let mut meta = Vec::new();
    meta.push(match record.year {
        Some(year) => format!("**Year**: {year}"),
        None => "**Year**: N/A".to_string(),
    });
    meta.push(format!("**Citations**: {}", record.citation_count));

    if let Some(venue) = &record.venue {
        meta.push(format!("**Venue**: {venue}"));
    }

    output.push_str(&format!("{}\n\n", meta.join(" | ")));
    output
}

/// Format the code and dataset panel for a record.
#[must_use]
pub fn format_enrichment(record: &PaperRecord, enrichment: &Enrichment) -> String {
    let mut output = format!("# Code & Datasets: {}\n\n", record.title_or_default());

    if enrichment.keywords.is_empty() {
        output.push_str("_No usable keywords in the title; nothing to search for._\n");
        return output;
    }

    output.push_str(&format!("**Keywords**: {}\n\n", enrichment.keywords));

    for (kind, lookup) in &enrichment.sources {
        output.push_str(&format!("### {}\n\n", kind.label()));
        match lookup {
            Lookup::Unavailable => output.push_str("_Not configured._\n\n"),
            Lookup::Found(links) if links.is_empty() => output.push_str("No results found.\n\n"),
            Lookup::Found(links) => {
                for link in links {
                    output.push_str(&format_link(link));
                }
                output.push('\n');
            }
        }
    }

    output
}

fn format_link(link: &ResourceLink) -> String {
    let title = if link.title.is_empty() { "Untitled" } else { &link.title };
    let mut line = match &link.url {
        Some(url) => format!("- [{title}]({url})"),
        None => format!("- {title}"),
    };
    if let Some(stars) = link.stars {
        line.push_str(&format!(" ({stars} stars)"));
    }
    line.push('\n');
    line
}

/// Format the bookmark list.
#[must_use]
pub fn format_bookmarks(bookmarks: &[PaperRecord]) -> String {
    if bookmarks.is_empty() {
        return "No bookmarks yet.".to_string();
    }

    let mut output = format!("# Bookmarked Papers ({})\n\n", bookmarks.len());
    for record in bookmarks {
        let year = record.year.map_or_else(|| "N/A".to_string(), |y| y.to_string());
        output.push_str(&format!("- **{}** ({year})\n", record.title_or_default()));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceKind;
    use crate::processor::paginate;

    fn record(title: &str) -> PaperRecord {
        PaperRecord {
            title: title.into(),
            authors: vec!["Ada".into(), "Grace".into()],
            year: Some(2021),
            citation_count: 7,
            r#abstract: Some("x".repeat(700)),
            ..Default::default()
        }
    }

    #[test]
    fn test_preview_char_boundary() {
        assert_eq!(preview("héllo", 2), "hé...");
        assert_eq!(preview("short", 10), "short");
    }

    #[test]
    fn test_page_numbering_continues_across_pages() {
        let records: Vec<_> = (0..12).map(|i| record(&format!("P{i}"))).collect();
        let page = paginate(&records, 2, 10);
        let out = format_page(&page, records.len());
        assert!(out.contains("page 2 of 2"));
        assert!(out.contains("## 11. P10"));
        assert!(out.contains("## 12. P11"));
    }

    #[test]
    fn test_list_truncates_abstract() {
        let out = format_record_markdown(&record("T"), 1);
        assert!(out.contains(&format!("{}...", "x".repeat(600))));
        assert!(!out.contains(&"x".repeat(601)));
        assert!(out.contains("**Authors**: Ada, Grace"));
    }

    #[test]
    fn test_enrichment_distinguishes_unconfigured() {
        let enrichment = Enrichment {
            keywords: "graph".into(),
            sources: vec![
                (SourceKind::Zenodo, Lookup::Found(vec![])),
                (SourceKind::Kaggle, Lookup::Unavailable),
            ],
        };
        let out = format_enrichment(&record("T"), &enrichment);
        assert!(out.contains("### Zenodo\n\nNo results found."));
        assert!(out.contains("### Kaggle\n\n_Not configured._"));
    }

    #[test]
    fn test_bookmarks() {
        assert_eq!(format_bookmarks(&[]), "No bookmarks yet.");
        assert!(format_bookmarks(&[record("Saved")]).contains("- **Saved** (2021)"));
    }
}
