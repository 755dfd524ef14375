//! Per-record code and dataset discovery.
//!
//! Sources are queried one after another with the same keyword string. Each result
//! stands alone: one source being empty or unconfigured says nothing about the others.

use crate::client::SecondarySource;
use crate::keywords::extract_keywords;
use crate::models::{Lookup, PaperRecord, ResourceLink, SourceKind};

/// Secondary lookups for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrichment {
    /// Query derived from the record's title.
    pub keywords: String,

    /// Result per source, in the order the sources were queried.
    pub sources: Vec<(SourceKind, Lookup<ResourceLink>)>,
}

impl Enrichment {
    /// Result for one source, if it was queried.
    #[must_use]
    pub fn get(&self, kind: SourceKind) -> Option<&Lookup<ResourceLink>> {
        self.sources.iter().find(|(k, _)| *k == kind).map(|(_, lookup)| lookup)
    }

    /// Returns true if no configured source returned anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.iter().all(|(_, lookup)| lookup.items().is_empty())
    }
}

/// Query every source for links related to `record`.
pub async fn enrich(record: &PaperRecord, sources: &[Box<dyn SecondarySource>]) -> Enrichment {
    let keywords = extract_keywords(&record.title);
    tracing::info!(title = %record.title, %keywords, "Enriching record");

    let mut results = Vec::with_capacity(sources.len());
    for source in sources {
        let lookup = source.lookup(&keywords).await;
        tracing::debug!(
            source = source.kind().label(),
            found = lookup.items().len(),
            unavailable = lookup.is_unavailable(),
            "Secondary lookup"
        );
        results.push((source.kind(), lookup));
    }

    Enrichment { keywords, sources: results }
}
