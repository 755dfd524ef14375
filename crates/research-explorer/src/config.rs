//! Configuration for the research explorer.

use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Semantic Scholar Graph API endpoint (primary metadata source).
    pub const GRAPH_API: &str = "https://api.semanticscholar.org/graph/v1";

    /// Papers with Code API endpoint (code search).
    pub const PAPERS_WITH_CODE_API: &str = "https://paperswithcode.com/api/v1";

    /// GitHub REST API endpoint (repository search by stars).
    pub const GITHUB_API: &str = "https://api.github.com";

    /// Zenodo API endpoint (dataset archive).
    pub const ZENODO_API: &str = "https://zenodo.org/api";

    /// Kaggle API endpoint (credentialed dataset catalog).
    pub const KAGGLE_API: &str = "https://www.kaggle.com/api/v1";

    /// Gemini API endpoint (text generation for critiques).
    pub const GEMINI_API: &str = "https://generativelanguage.googleapis.com/v1beta";

    /// Default text-generation model.
    pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

    /// Per-request timeout. A slow upstream blocks the interaction at most this long.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Results requested from the primary search per query.
    pub const PRIMARY_LIMIT: usize = 20;

    /// Results kept from each secondary source.
    pub const SECONDARY_LIMIT: usize = 2;

    /// Records per page in the result view.
    pub const PAGE_SIZE: usize = 10;

    /// Abstract characters shown in list views.
    pub const ABSTRACT_PREVIEW_CHARS: usize = 600;
}

/// Paper field sets for API requests.
pub mod fields {
    /// Fields requested for every primary lookup.
    pub const PAPER: &[&str] = &[
        "title",
        "authors",
        "year",
        "abstract",
        "url",
        "citationCount",
        "venue",
        "publicationVenue",
        "externalIds",
    ];
}

/// Environment variable names for credentials.
pub mod env {
    /// Semantic Scholar API key (optional, raises rate limits).
    pub const SEMANTIC_SCHOLAR_API_KEY: &str = "SEMANTIC_SCHOLAR_API_KEY";

    /// Language-model API key.
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";

    /// Language-model identifier override.
    pub const GEMINI_MODEL: &str = "GEMINI_MODEL";

    /// Dataset-catalog username.
    pub const KAGGLE_USERNAME: &str = "KAGGLE_USERNAME";

    /// Dataset-catalog key.
    pub const KAGGLE_KEY: &str = "KAGGLE_KEY";
}

/// Explorer configuration.
#[derive(Clone)]
pub struct Config {
    /// Semantic Scholar API key (optional).
    pub api_key: Option<String>,

    /// Language-model API key. Without it summaries return an advisory.
    pub llm_api_key: Option<String>,

    /// Language-model identifier.
    pub llm_model: String,

    /// Dataset-catalog username.
    pub kaggle_username: Option<String>,

    /// Dataset-catalog key.
    pub kaggle_key: Option<String>,

    /// Base URL for the Graph API (for testing with mock servers).
    pub graph_api_url: String,

    /// Base URL for code search.
    pub papers_with_code_url: String,

    /// Base URL for repository search.
    pub github_api_url: String,

    /// Base URL for the dataset archive.
    pub zenodo_api_url: String,

    /// Base URL for the dataset catalog.
    pub kaggle_api_url: String,

    /// Base URL for text generation.
    pub llm_api_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,
}

impl Config {
    /// Create a configuration with production endpoints and no credentials.
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            llm_api_key: None,
            llm_model: api::DEFAULT_MODEL.to_string(),
            kaggle_username: None,
            kaggle_key: None,
            graph_api_url: api::GRAPH_API.to_string(),
            papers_with_code_url: api::PAPERS_WITH_CODE_API.to_string(),
            github_api_url: api::GITHUB_API.to_string(),
            zenodo_api_url: api::ZENODO_API.to_string(),
            kaggle_api_url: api::KAGGLE_API.to_string(),
            llm_api_url: api::GEMINI_API.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
        }
    }

    /// Create a test configuration pointing every source at one mock server.
    ///
    /// Each source gets its own path prefix so mocks can tell them apart.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            api_key: None,
            llm_api_key: None,
            llm_model: "test-model".to_string(),
            kaggle_username: None,
            kaggle_key: None,
            graph_api_url: format!("{base_url}/graph/v1"),
            papers_with_code_url: format!("{base_url}/pwc/api/v1"),
            github_api_url: format!("{base_url}/github"),
            zenodo_api_url: format!("{base_url}/zenodo/api"),
            kaggle_api_url: format!("{base_url}/kaggle/api/v1"),
            llm_api_url: format!("{base_url}/llm/v1beta"),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
        }
    }

    /// Create configuration from the secrets file and environment variables.
    ///
    /// Each credential is looked up in `.env` in the working directory first and
    /// falls back to the process environment.
    ///
    /// # Errors
    ///
    /// Returns error if the secrets file exists but cannot be parsed.
    pub fn from_env() -> anyhow::Result<Self> {
        let secrets = Secrets::load()?;
        Ok(Self::from_secrets(&secrets))
    }

    fn from_secrets(secrets: &Secrets) -> Self {
        let mut config = Self::new(secrets.get(env::SEMANTIC_SCHOLAR_API_KEY));
        config.llm_api_key = secrets.get(env::GEMINI_API_KEY);
        config.kaggle_username = secrets.get(env::KAGGLE_USERNAME);
        config.kaggle_key = secrets.get(env::KAGGLE_KEY);
        if let Some(model) = secrets.get(env::GEMINI_MODEL) {
            config.llm_model = model;
        }
        config
    }

    /// Check if a Semantic Scholar API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Check if the language model can be called.
    #[must_use]
    pub const fn has_llm_key(&self) -> bool {
        self.llm_api_key.is_some()
    }

    /// Dataset-catalog credentials, only when both halves are present.
    #[must_use]
    pub fn kaggle_credentials(&self) -> Option<(&str, &str)> {
        Some((self.kaggle_username.as_deref()?, self.kaggle_key.as_deref()?))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("has_api_key", &self.has_api_key())
            .field("has_llm_key", &self.has_llm_key())
            .field("has_kaggle_credentials", &self.kaggle_credentials().is_some())
            .field("llm_model", &self.llm_model)
            .field("graph_api_url", &self.graph_api_url)
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

/// Key/value pairs read from the secrets file, with environment fallback.
#[derive(Default)]
struct Secrets {
    entries: Vec<(String, String)>,
}

impl Secrets {
    /// Read `.env` without touching the process environment.
    fn load() -> anyhow::Result<Self> {
        let Ok(iter) = dotenv::dotenv_iter() else {
            return Ok(Self::default());
        };

        let mut entries = Vec::new();
        for item in iter {
            entries.push(item?);
        }
        tracing::debug!(count = entries.len(), "Loaded secrets file");
        Ok(Self { entries })
    }

    fn get(&self, name: &str) -> Option<String> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
            .or_else(|| std::env::var(name).ok())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secrets(pairs: &[(&str, &str)]) -> Secrets {
        Secrets {
            entries: pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect(),
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.api_key.is_none());
        assert!(!config.has_api_key());
        assert!(!config.has_llm_key());
        assert!(config.kaggle_credentials().is_none());
        assert_eq!(config.request_timeout, api::REQUEST_TIMEOUT);
    }

    #[test]
    fn test_secrets_take_precedence_and_blank_is_absent() {
        let s = secrets(&[
            ("GEMINI_API_KEY", "from-file"),
            ("KAGGLE_USERNAME", "   "),
            ("GEMINI_MODEL", "gemini-pro"),
        ]);
        let config = Config::from_secrets(&s);
        assert_eq!(config.llm_api_key.as_deref(), Some("from-file"));
        assert_eq!(config.llm_model, "gemini-pro");
        assert!(config.kaggle_username.is_none());
    }

    #[test]
    fn test_kaggle_requires_both_halves() {
        let mut config = Config::default();
        config.kaggle_username = Some("user".to_string());
        assert!(config.kaggle_credentials().is_none());

        config.kaggle_key = Some("key".to_string());
        assert_eq!(config.kaggle_credentials(), Some(("user", "key")));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let mut config = Config::new(Some("s2-secret".to_string()));
        config.llm_api_key = Some("llm-secret".to_string());
        let debug = format!("{config:?}");
        assert!(!debug.contains("s2-secret"));
        assert!(!debug.contains("llm-secret"));
        assert!(debug.contains("has_api_key"));
    }

    #[test]
    fn test_fields() {
        assert!(fields::PAPER.contains(&"publicationVenue"));
        assert!(fields::PAPER.contains(&"citationCount"));
    }
}
