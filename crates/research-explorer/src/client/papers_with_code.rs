//! Papers with Code search client.

use crate::config::{Config, api};
use crate::error::ClientResult;
use crate::models::{CodeHit, CodeSearchResponse, Lookup, ResourceLink, SourceKind};
use crate::normalize::normalize_code_hit;

use super::{HttpClient, SecondarySource, degrade};

const SOURCE: &str = "papers_with_code";

/// Papers with Code client.
#[derive(Debug, Clone)]
pub struct PapersWithCodeClient {
    http: HttpClient,
    base_url: String,
}

impl PapersWithCodeClient {
    /// Create a new client.
    #[must_use]
    pub fn new(http: HttpClient, config: &Config) -> Self {
        Self { http, base_url: config.papers_with_code_url.clone() }
    }

    /// Search for papers with code, at most [`api::SECONDARY_LIMIT`] hits.
    pub async fn search(&self, query: &str) -> Vec<CodeHit> {
        let mut hits = degrade(SOURCE, self.try_search(query).await).results;
        hits.truncate(api::SECONDARY_LIMIT);
        hits
    }

    async fn try_search(&self, query: &str) -> ClientResult<CodeSearchResponse> {
        let url = format!("{}/search/", self.base_url);
        let params = [
            ("q", query.to_string()),
            ("items_per_page", api::SECONDARY_LIMIT.to_string()),
        ];
        self.http.send_json(self.http.get(&url).query(&params)).await
    }
}

#[async_trait::async_trait]
impl SecondarySource for PapersWithCodeClient {
    fn kind(&self) -> SourceKind {
        SourceKind::PapersWithCode
    }

    async fn lookup(&self, keywords: &str) -> Lookup<ResourceLink> {
        if keywords.is_empty() {
            return Lookup::Found(Vec::new());
        }
        Lookup::Found(self.search(keywords).await.into_iter().map(normalize_code_hit).collect())
    }
}
