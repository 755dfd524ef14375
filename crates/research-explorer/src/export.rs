//! Export of the current view: CSV and JSON.

use std::path::Path;

use crate::error::ExplorerResult;
use crate::formatters;
use crate::models::{ExportFormat, PaperRecord};

/// CSV header row.
pub const CSV_HEADER: &str = "Title,Authors,Year,Citations,Venue,Abstract,URL";

/// Render records in the requested format.
pub fn render(records: &[PaperRecord], format: ExportFormat) -> ExplorerResult<String> {
    match format {
        ExportFormat::Csv => Ok(format_csv(records)),
        ExportFormat::Json => {
            let compact: Vec<_> = records.iter().map(formatters::compact_record).collect();
            Ok(serde_json::to_string_pretty(&compact)?)
        }
    }
}

/// Write records to `path`, returning the number written.
pub fn write(records: &[PaperRecord], format: ExportFormat, path: &Path) -> ExplorerResult<usize> {
    let output = render(records, format)?;
    std::fs::write(path, output)?;
    tracing::info!(path = %path.display(), count = records.len(), ?format, "Exported records");
    Ok(records.len())
}

/// Format records as CSV, one row per record in order.
#[must_use]
pub fn format_csv(records: &[PaperRecord]) -> String {
    let mut output = String::from(CSV_HEADER);
    output.push('\n');

    for record in records {
        let title = csv_escape(&record.title);
        let authors = csv_escape(&record.author_names());
        let year = record.year.map_or(String::new(), |y| y.to_string());
        let citations = record.citation_count;
        let venue = csv_escape(record.venue.as_deref().unwrap_or(""));
        let abs = csv_escape(record.r#abstract.as_deref().unwrap_or(""));
        let url = csv_escape(record.url.as_deref().unwrap_or(""));

        output.push_str(&format!("{title},{authors},{year},{citations},{venue},{abs},{url}\n"));
    }

    output
}

/// Escape a string for CSV output.
fn csv_escape(s: &str) -> String {
    let guarded = if s.starts_with(['=', '+', '-', '@']) {
        // Prevent formula injection in spreadsheets
        format!("'{s}")
    } else {
        s.to_string()
    };

    if guarded.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", guarded.replace('"', "\"\""))
    } else {
        guarded
    }
}
