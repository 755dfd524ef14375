//! Data models for upstream hits and the canonical paper record.
//!
//! Upstream hit structs use `#[serde(rename_all = "camelCase")]` to match API naming
//! and the [`lenient`] helpers so a malformed field never fails a whole response.

pub mod lenient;
mod paper;
mod query;
mod record;
mod secondary;

pub use paper::{AuthorRef, Paper, PublicationVenue, SearchResult};
pub use query::{ExportFormat, QueryKind, SearchQuery, SortKey};
pub use record::{Lookup, PaperRecord, ResourceLink, SourceKind};
pub use secondary::{
    CodeHit, CodeSearchResponse, DatasetHit, DatasetLinks, DatasetMetadata, KaggleDataset,
    RepoHit, RepoSearchResponse, ZenodoHits, ZenodoResponse,
};
