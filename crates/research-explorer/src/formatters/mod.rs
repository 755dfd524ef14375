//! Output formatters for records, pages, and enrichment panels.

mod json;
mod markdown;

pub use json::compact_record;
pub use markdown::{
    format_bookmarks, format_enrichment, format_page, format_record_detail, format_record_markdown,
    preview,
};
