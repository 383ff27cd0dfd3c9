//! Sentiment analysis orchestration
//!
//! Two-stage flow against the hosted model:
//! - A URL input is first resolved to raw post text (search-grounded request)
//! - The resolved or original text is analyzed under a JSON response schema
//!
//! Every invocation is independent: no caching, no retries, no state shared
//! between calls. The two requests are strictly ordered, never parallel.

mod requester;
mod resolver;
mod schema;

pub use schema::response_schema;

use std::sync::Arc;

use tracing::error;

use crate::client::{GeminiClient, GenerativeModel};
use crate::config::{Config, ModelConfig};
use crate::error::Result;
use crate::types::SentimentAnalysis;

/// Returns true only for well-formed absolute http(s) URLs.
///
/// Anything that fails to parse (prose, relative paths, other schemes) is
/// simply not a URL; this never fails.
pub fn is_url(text: &str) -> bool {
    match reqwest::Url::parse(text.trim()) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Orchestrates content resolution and sentiment analysis
pub struct SentimentEngine {
    model: Arc<dyn GenerativeModel>,
    models: ModelConfig,
}

impl std::fmt::Debug for SentimentEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentEngine")
            .field("models", &self.models)
            .finish_non_exhaustive()
    }
}

impl SentimentEngine {
    /// Create an engine backed by the live Gemini API.
    ///
    /// Fails with a configuration error when no credential is present; no
    /// request is attempted in that case.
    pub fn new(config: &Config) -> Result<Self> {
        let client = GeminiClient::from_config(&config.api)?;
        Ok(Self::with_model(Arc::new(client), config.models.clone()))
    }

    /// Create an engine over any model implementation (used by tests).
    pub fn with_model(model: Arc<dyn GenerativeModel>, models: ModelConfig) -> Self {
        Self { model, models }
    }

    /// Analyze the sentiment of a post, or of the post behind a URL, with
    /// respect to a topic.
    ///
    /// Inputs are expected pre-trimmed and non-blank; the caller enforces
    /// that before invoking. Either stage failing fails the whole analysis;
    /// no partial results are returned.
    pub async fn analyze(&self, post_text_or_url: &str, topic: &str) -> Result<SentimentAnalysis> {
        let result = self.run(post_text_or_url, topic).await;

        if let Err(e) = &result {
            error!("Error in sentiment analysis process: {}", e);
        }

        result
    }

    /// Resolve the raw text behind a post URL without analyzing it.
    pub async fn resolve(&self, url: &str) -> Result<String> {
        resolver::resolve_url_content(self.model.as_ref(), &self.models, url).await
    }

    async fn run(&self, post: &str, topic: &str) -> Result<SentimentAnalysis> {
        let content = if is_url(post) {
            resolver::resolve_url_content(self.model.as_ref(), &self.models, post).await?
        } else {
            post.to_string()
        };

        requester::request_analysis(self.model.as_ref(), &self.models, &content, topic).await
    }
}
