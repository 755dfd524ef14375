//! Kaggle dataset catalog client. Needs a username and key.

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::models::{KaggleDataset, Lookup, ResourceLink, SourceKind};
use crate::normalize::normalize_kaggle_dataset;

use super::{HttpClient, SecondarySource, degrade};

const SOURCE: &str = "kaggle";

/// Kaggle client.
#[derive(Clone)]
pub struct KaggleClient {
    http: HttpClient,
    base_url: String,
    credentials: Option<(String, String)>,
}

impl KaggleClient {
    /// Create a new client. Without both credentials every lookup is unavailable.
    #[must_use]
    pub fn new(http: HttpClient, config: &Config) -> Self {
        let credentials =
            config.kaggle_credentials().map(|(user, key)| (user.to_string(), key.to_string()));
        Self { http, base_url: config.kaggle_api_url.clone(), credentials }
    }

    /// Returns true if both credentials are present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    /// Search datasets, at most [`api::SECONDARY_LIMIT`] hits.
    pub async fn search_datasets(&self, query: &str) -> Lookup<KaggleDataset> {
        let Some((user, key)) = &self.credentials else {
            tracing::debug!("Kaggle credentials missing, skipping dataset search");
            return Lookup::Unavailable;
        };

        let mut hits = degrade(SOURCE, self.try_search(query, user, key).await);
        hits.truncate(api::SECONDARY_LIMIT);
        Lookup::Found(hits)
    }

    async fn try_search(
        &self,
        query: &str,
        user: &str,
        key: &str,
    ) -> ClientResult<Vec<KaggleDataset>> {
        let url = format!("{}/datasets/list", self.base_url);
        let params = [("search", query)];
        let request = self.http.get(&url).basic_auth(user, Some(key)).query(&params);

        let value: serde_json::Value = self.http.send_json(request).await?;
        let serde_json::Value::Array(items) = value else {
            return Err(ClientError::EmptyResponse(SOURCE));
        };
        Ok(items.into_iter().filter_map(|item| serde_json::from_value(item).ok()).collect())
    }
}

impl std::fmt::Debug for KaggleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KaggleClient").field("configured", &self.is_configured()).finish()
    }
}

#[async_trait::async_trait]
impl SecondarySource for KaggleClient {
    fn kind(&self) -> SourceKind {
        SourceKind::Kaggle
    }

    async fn lookup(&self, keywords: &str) -> Lookup<ResourceLink> {
        if !self.is_configured() {
            return Lookup::Unavailable;
        }
        if keywords.is_empty() {
            return Lookup::Found(Vec::new());
        }
        self.search_datasets(keywords).await.map(normalize_kaggle_dataset)
    }
}
