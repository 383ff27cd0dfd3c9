//! URL content resolution through the model's search tool
//!
//! No HTTP fetch happens here; retrieval is delegated to the model, and
//! failure detection works by pattern-matching its reply.

use tracing::info;

use crate::client::GenerativeModel;
use crate::config::ModelConfig;
use crate::error::{AnalyzerError, Result};

const FETCH_SYSTEM_INSTRUCTION: &str = "You are an AI assistant that extracts the main text content from a social media post at a given URL. You must use your search tool to access the URL. Return ONLY the raw text content of the post. Do not include any explanations, apologies, or conversational filler like 'Here is the content:' or 'I am unable to access...'. If you cannot access the URL, return an empty string.";

/// Reply substrings meaning the model could not reach the page.
///
/// Matching the model's natural-language refusal is a brittle heuristic: a
/// wording change on the model side lets bad content pass through.
const REFUSAL_MARKERS: [&str; 2] = ["unable to access", "cannot access"];

const UNAVAILABLE_GUIDANCE: &str = "Failed to retrieve content from the URL. The AI couldn't access the link, which might be private, broken, or require a login. Please try a different public URL, or copy and paste the post's text directly.";

/// Fetch the raw text of the post behind `url` via the model.
///
/// Fails with [`AnalyzerError::ContentUnavailable`] when the reply is empty
/// or matches a refusal marker.
pub async fn resolve_url_content(
    model: &dyn GenerativeModel,
    models: &ModelConfig,
    url: &str,
) -> Result<String> {
    info!("URL detected. Fetching content...");

    let prompt = format!("URL: {}", url);
    let fetched = model
        .generate_with_search(&models.resolver_model, &prompt, FETCH_SYSTEM_INSTRUCTION)
        .await?;

    let fetched = fetched.trim();
    let lowercased = fetched.to_lowercase();

    if fetched.is_empty() || REFUSAL_MARKERS.iter().any(|m| lowercased.contains(m)) {
        return Err(AnalyzerError::ContentUnavailable(
            UNAVAILABLE_GUIDANCE.to_string(),
        ));
    }

    info!("Content fetched successfully.");
    Ok(fetched.to_string())
}
