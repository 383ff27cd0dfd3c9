//! Gemini API client
//!
//! This module provides the outbound surface to the hosted generative
//! model:
//! - Search-grounded text generation: used to retrieve post content from a URL
//! - Schema-constrained JSON generation: used for the structured sentiment analysis

mod gemini;
pub mod mock;

pub use gemini::GeminiClient;

use async_trait::async_trait;

use crate::error::Result;

/// Operations the analyzer needs from a generative model.
///
/// Implemented by [`GeminiClient`] for the live API and by
/// [`mock::MockModel`] for scripted tests.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Free-text generation with the model's web search tool enabled.
    async fn generate_with_search(
        &self,
        model: &str,
        prompt: &str,
        system_instruction: &str,
    ) -> Result<String>;

    /// Generation constrained to a JSON schema; returns the raw JSON text.
    async fn generate_structured(
        &self,
        model: &str,
        prompt: &str,
        schema: serde_json::Value,
        temperature: f32,
    ) -> Result<String>;
}
