//! GitHub repository search client, most-starred first.

use crate::config::{Config, api};
use crate::error::ClientResult;
use crate::models::{Lookup, RepoHit, RepoSearchResponse, ResourceLink, SourceKind};
use crate::normalize::normalize_repo_hit;

use super::{HttpClient, SecondarySource, degrade};

const SOURCE: &str = "github";

/// GitHub search client. Unauthenticated.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: HttpClient,
    base_url: String,
}

impl GitHubClient {
    /// Create a new client.
    #[must_use]
    pub fn new(http: HttpClient, config: &Config) -> Self {
        Self { http, base_url: config.github_api_url.clone() }
    }

    /// Search repositories sorted by stars, at most [`api::SECONDARY_LIMIT`] hits.
    pub async fn search_repositories(&self, query: &str) -> Vec<RepoHit> {
        let mut hits = degrade(SOURCE, self.try_search(query).await).items;
        hits.truncate(api::SECONDARY_LIMIT);
        hits
    }

    async fn try_search(&self, query: &str) -> ClientResult<RepoSearchResponse> {
        let url = format!("{}/search/repositories", self.base_url);
        let params = [
            ("q", query.to_string()),
            ("sort", "stars".to_string()),
            ("order", "desc".to_string()),
            ("per_page", api::SECONDARY_LIMIT.to_string()),
        ];
        let request = self
            .http
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .query(&params);
        self.http.send_json(request).await
    }
}

#[async_trait::async_trait]
impl SecondarySource for GitHubClient {
    fn kind(&self) -> SourceKind {
        SourceKind::GitHub
    }

    async fn lookup(&self, keywords: &str) -> Lookup<ResourceLink> {
        if keywords.is_empty() {
            return Lookup::Found(Vec::new());
        }
        Lookup::Found(
            self.search_repositories(keywords).await.into_iter().map(normalize_repo_hit).collect(),
        )
    }
}
