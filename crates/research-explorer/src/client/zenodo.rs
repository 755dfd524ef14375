//! Zenodo dataset archive client.

use crate::config::{Config, api};
use crate::error::ClientResult;
use crate::models::{DatasetHit, Lookup, ResourceLink, SourceKind, ZenodoResponse};
use crate::normalize::normalize_dataset_hit;

use super::{HttpClient, SecondarySource, degrade};

const SOURCE: &str = "zenodo";

/// Zenodo records client. Free, no key required.
#[derive(Debug, Clone)]
pub struct ZenodoClient {
    http: HttpClient,
    base_url: String,
}

impl ZenodoClient {
    /// Create a new client.
    #[must_use]
    pub fn new(http: HttpClient, config: &Config) -> Self {
        Self { http, base_url: config.zenodo_api_url.clone() }
    }

    /// Search records, at most [`api::SECONDARY_LIMIT`] hits.
    pub async fn search(&self, query: &str) -> Vec<DatasetHit> {
        let mut hits = degrade(SOURCE, self.try_search(query).await).hits.hits;
        hits.truncate(api::SECONDARY_LIMIT);
        hits
    }

    async fn try_search(&self, query: &str) -> ClientResult<ZenodoResponse> {
        let url = format!("{}/records", self.base_url);
        let params = [("q", query.to_string()), ("size", api::SECONDARY_LIMIT.to_string())];
        self.http.send_json(self.http.get(&url).query(&params)).await
    }
}

#[async_trait::async_trait]
impl SecondarySource for ZenodoClient {
    fn kind(&self) -> SourceKind {
        SourceKind::Zenodo
    }

    async fn lookup(&self, keywords: &str) -> Lookup<ResourceLink> {
        if keywords.is_empty() {
            return Lookup::Found(Vec::new());
        }
        Lookup::Found(self.search(keywords).await.into_iter().map(normalize_dataset_hit).collect())
    }
}
