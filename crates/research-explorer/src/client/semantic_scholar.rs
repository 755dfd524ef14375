//! Semantic Scholar Graph API client (primary metadata source).

use crate::config::{Config, api, fields};
use crate::error::ClientResult;
use crate::models::{Paper, SearchResult};

use super::{HttpClient, degrade};

const SOURCE: &str = "semantic_scholar";

/// Semantic Scholar API client.
#[derive(Clone)]
pub struct SemanticScholarClient {
    /// HTTP client with middleware.
    http: HttpClient,

    /// API key (optional).
    api_key: Option<String>,

    /// Graph API base URL.
    graph_api_url: String,
}

impl SemanticScholarClient {
    /// Create a new client.
    #[must_use]
    pub fn new(http: HttpClient, config: &Config) -> Self {
        Self {
            http,
            api_key: config.api_key.clone(),
            graph_api_url: config.graph_api_url.clone(),
        }
    }

    /// Check if an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Search papers by topic.
    ///
    /// `limit` is capped at [`api::PRIMARY_LIMIT`]. Failures yield an empty list.
    pub async fn search_papers(&self, query: &str, limit: usize) -> Vec<Paper> {
        let limit = limit.min(api::PRIMARY_LIMIT);
        let result = degrade(SOURCE, self.try_search_papers(query, limit).await);
        tracing::debug!(query, total = result.total, returned = result.data.len(), "Paper search");

        let mut papers = result.data;
        papers.truncate(limit);
        papers
    }

    /// Fetch one paper by its Semantic Scholar ID.
    pub async fn get_paper(&self, paper_id: &str) -> Option<Paper> {
        degrade(SOURCE, self.try_get_paper(paper_id).await.map(Some))
    }

    /// Fetch one paper by DOI.
    pub async fn get_paper_by_doi(&self, doi: &str) -> Option<Paper> {
        self.get_paper(&format!("DOI:{doi}")).await
    }

    async fn try_search_papers(&self, query: &str, limit: usize) -> ClientResult<SearchResult> {
        let url = format!("{}/paper/search", self.graph_api_url);

        let params = vec![
            ("query".to_string(), query.to_string()),
            ("limit".to_string(), limit.to_string()),
            ("fields".to_string(), fields::PAPER.join(",")),
        ];

        self.http.send_json(self.authorized(self.http.get(&url).query(&params))).await
    }

    async fn try_get_paper(&self, paper_id: &str) -> ClientResult<Paper> {
        let url = format!("{}/paper/{}", self.graph_api_url, paper_id);
        let params = vec![("fields".to_string(), fields::PAPER.join(","))];

        self.http.send_json(self.authorized(self.http.get(&url).query(&params))).await
    }

    fn authorized(
        &self,
        request: reqwest_middleware::RequestBuilder,
    ) -> reqwest_middleware::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("x-api-key", key),
            None => request,
        }
    }
}

impl std::fmt::Debug for SemanticScholarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticScholarClient").field("has_api_key", &self.has_api_key()).finish()
    }
}
