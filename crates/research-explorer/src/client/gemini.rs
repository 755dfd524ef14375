//! Gemini `generateContent` client used for abstract critiques.

use serde::Deserialize;
use serde_json::json;

use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::models::lenient;
use crate::summary::TextGenerator;

use super::HttpClient;

const SOURCE: &str = "gemini";

/// Gemini text-generation client.
#[derive(Clone)]
pub struct GeminiClient {
    http: HttpClient,
    base_url: String,
    api_key: Option<String>,
}

impl GeminiClient {
    /// Create a new client.
    #[must_use]
    pub fn new(http: HttpClient, config: &Config) -> Self {
        Self { http, base_url: config.llm_api_url.clone(), api_key: config.llm_api_key.clone() }
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient").field("configured", &self.is_configured()).finish()
    }
}

#[async_trait::async_trait]
impl TextGenerator for GeminiClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, model: &str, prompt: &str) -> ClientResult<String> {
        let key = self.api_key.as_deref().ok_or(ClientError::NotConfigured("Gemini API key"))?;

        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let body = json!({
            "contents": [{
                "parts": [{"text": prompt}]
            }]
        });

        let request = self.http.post_json(&url, &body)?.header("x-goog-api-key", key);
        let response: GenerateContentResponse = self.http.send_json(request).await?;

        let text = response.text();
        if text.trim().is_empty() {
            return Err(ClientError::EmptyResponse(SOURCE));
        }
        Ok(text)
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default, deserialize_with = "lenient::skip_invalid")]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts concatenated.
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .map(|c| c.content.parts.into_iter().filter_map(|p| p.text).collect::<String>())
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default, deserialize_with = "lenient::or_default")]
    content: Content,
}

#[derive(Debug, Default, Deserialize)]
struct Content {
    #[serde(default, deserialize_with = "lenient::skip_invalid")]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
struct Part {
    #[serde(default, deserialize_with = "lenient::or_default")]
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_text_joins_parts() {
        let json = r#"{"candidates": [
            {"content": {"parts": [{"text": "Methods: "}, {"text": "X"}]}}
        ]}"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), "Methods: X");
    }

    #[test]
    fn test_response_without_candidates() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.text(), "");
    }
}
