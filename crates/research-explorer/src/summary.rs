//! AI critique of a paper's abstract.

use crate::error::ClientResult;
use crate::models::PaperRecord;

/// Returned when a record has no abstract to critique.
pub const NO_ABSTRACT_ADVISORY: &str =
    "No abstract is available for this paper, so an AI summary cannot be generated.";

/// Returned when no language-model key is configured.
pub const NOT_CONFIGURED_ADVISORY: &str = concat!(
    "AI summaries are not configured. ",
    "Set GEMINI_API_KEY in .env or the environment to enable them."
);

/// Prefix of the advisory returned when the model call fails.
pub const FAILURE_ADVISORY: &str = "AI summary failed";

/// A single-prompt text-generation backend.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns true if the backend has the credentials it needs.
    fn is_configured(&self) -> bool;

    /// Generate text for `prompt` with the given model.
    async fn generate(&self, model: &str, prompt: &str) -> ClientResult<String>;
}

/// Build the critique prompt. Only the abstract is included.
#[must_use]
pub fn build_prompt(abstract_text: &str) -> String {
    format!(
        "You are reviewing a research paper. Using ONLY the abstract below, and without \
         inventing any facts that are not stated in it, write a short critique with \
         exactly these sections:\n\
         \n\
         Methods: what approach the paper takes.\n\
         Strengths: what the paper does well.\n\
         Weaknesses: limitations or gaps visible from the abstract.\n\
         Open Problems: questions left for future work.\n\
         \n\
         If the abstract does not support a section, say so instead of guessing.\n\
         \n\
         Abstract:\n\
         {abstract_text}"
    )
}

/// Critique a record's abstract.
///
/// Returns a fixed advisory without calling the model when the abstract is missing or
/// the generator is not configured; otherwise the model output verbatim, or a failure
/// advisory if the call fails.
pub async fn summarize(record: &PaperRecord, generator: &dyn TextGenerator, model: &str) -> String {
    let Some(abstract_text) = record.r#abstract.as_deref().filter(|a| !a.trim().is_empty()) else {
        return NO_ABSTRACT_ADVISORY.to_string();
    };

    if !generator.is_configured() {
        return NOT_CONFIGURED_ADVISORY.to_string();
    }

    match generator.generate(model, &build_prompt(abstract_text)).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, title = %record.title, "AI summary failed");
            format!("{FAILURE_ADVISORY}: {e}")
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::ClientError;

    struct Stub {
        configured: bool,
        reply: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl Stub {
        fn new(configured: bool, reply: Option<&'static str>) -> Self {
            Self { configured, reply, calls: AtomicUsize::new(0) }
        }
    }

    #[async_trait::async_trait]
    impl TextGenerator for Stub {
        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn generate(&self, _model: &str, prompt: &str) -> ClientResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert!(prompt.contains("Open Problems"));
            self.reply.map(str::to_string).ok_or(ClientError::status(500, "boom"))
        }
    }

    fn with_abstract(text: Option<&str>) -> PaperRecord {
        PaperRecord { r#abstract: text.map(str::to_string), ..Default::default() }
    }

    #[tokio::test]
    async fn test_missing_abstract_skips_model() {
        let stub = Stub::new(true, Some("ok"));
        let out = summarize(&with_abstract(None), &stub, "m").await;
        assert_eq!(out, NO_ABSTRACT_ADVISORY);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unconfigured_skips_model() {
        let stub = Stub::new(false, Some("ok"));
        let out = summarize(&with_abstract(Some("We study X.")), &stub, "m").await;
        assert_eq!(out, NOT_CONFIGURED_ADVISORY);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_model_output_verbatim() {
        let stub = Stub::new(true, Some("Methods: survey\nStrengths: broad"));
        let out = summarize(&with_abstract(Some("We study X.")), &stub, "m").await;
        assert_eq!(out, "Methods: survey\nStrengths: broad");
    }

    #[tokio::test]
    async fn test_model_failure_is_advisory() {
        let stub = Stub::new(true, None);
        let out = summarize(&with_abstract(Some("We study X.")), &stub, "m").await;
        assert!(out.starts_with(FAILURE_ADVISORY));
    }

    #[test]
    fn test_prompt_contains_only_abstract() {
        let prompt = build_prompt("We measure soil moisture.");
        assert!(prompt.ends_with("We measure soil moisture."));
        assert!(prompt.contains("Methods:"));
        assert!(prompt.contains("Weaknesses:"));
    }
}
