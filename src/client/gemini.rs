//! REST bindings for the Gemini `generateContent` endpoint

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::GenerativeModel;
use crate::config::ApiConfig;
use crate::error::{AnalyzerError, Result};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// HTTP client for the Gemini generative language API
pub struct GeminiClient {
    http: Client,
    api_key: String,
    base_url: String,
}

// ============ Request/Response types ============

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn user(text: &str) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part { text: text.to_string() }],
        }
    }

    fn system(text: &str) -> Self {
        Self {
            role: None,
            parts: vec![Part { text: text.to_string() }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
            base_url: GEMINI_API_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Create from config; fails if no credential is configured.
    pub fn from_config(api: &ApiConfig) -> Result<Self> {
        if api.api_key.trim().is_empty() {
            return Err(AnalyzerError::Config(
                "GEMINI_API_KEY environment variable not set".to_string(),
            ));
        }

        let mut client = Self::new(api.api_key.clone());
        if let Some(url) = &api.base_url {
            client = client.with_base_url(url);
        }
        Ok(client)
    }

    async fn generate(&self, model: &str, request: &GenerateContentRequest) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        let resp = self
            .http
            .post(&url)
            .header("x-goog-api-key", self.api_key.as_str())
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await?;
            return Err(AnalyzerError::Api(format!(
                "Gemini API error ({}): {}",
                status, error_text
            )));
        }

        let text = resp.text().await?;
        let snippet: String = text.chars().take(500).collect();
        tracing::debug!("Gemini raw response: {}", snippet);

        let response: GenerateContentResponse = serde_json::from_str(&text).map_err(|e| {
            AnalyzerError::Api(format!("Unexpected Gemini response body: {}", e))
        })?;

        // Grounded responses may split the text across several parts
        response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().map(|p| p.text).collect::<String>())
            .ok_or_else(|| AnalyzerError::Api("No candidates in Gemini response".to_string()))
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate_with_search(
        &self,
        model: &str,
        prompt: &str,
        system_instruction: &str,
    ) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content::user(prompt)],
            system_instruction: Some(Content::system(system_instruction)),
            tools: Some(vec![Tool {
                google_search: GoogleSearch {},
            }]),
            generation_config: None,
        };

        self.generate(model, &request).await
    }

    async fn generate_structured(
        &self,
        model: &str,
        prompt: &str,
        schema: serde_json::Value,
        temperature: f32,
    ) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content::user(prompt)],
            system_instruction: None,
            tools: None,
            generation_config: Some(GenerationConfig {
                temperature: Some(temperature),
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(schema),
            }),
        };

        self.generate(model, &request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content::user("URL: https://example.com/post/1")],
            system_instruction: Some(Content::system("extract the post text")),
            tools: Some(vec![Tool {
                google_search: GoogleSearch {},
            }]),
            generation_config: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "extract the post text");
        assert!(json["tools"][0]["google_search"].is_object());
        assert!(json.get("generationConfig").is_none());
    }

    #[test]
    fn test_structured_request_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content::user("analyze this")],
            system_instruction: None,
            tools: None,
            generation_config: Some(GenerationConfig {
                temperature: Some(0.2),
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(serde_json::json!({"type": "OBJECT"})),
            }),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("tools").is_none());
        assert!(json.get("systemInstruction").is_none());
        assert_eq!(json["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(json["generationConfig"]["responseSchema"]["type"], "OBJECT");
    }

    #[test]
    fn test_response_text_extraction() {
        let body = r#"{
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "Hello "}, {"text": "world"}]}}
            ]
        }"#;

        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        let text: String = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap();
        assert_eq!(text, "Hello world");
    }

    #[test]
    fn test_response_without_candidates() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(response.candidates.is_empty());
    }

    #[test]
    fn test_from_config_requires_key() {
        let api = ApiConfig::default();
        assert!(GeminiClient::from_config(&api).is_err());
    }

    #[test]
    fn test_with_base_url_strips_trailing_slash() {
        let client = GeminiClient::new("k".to_string()).with_base_url("http://localhost:9999/");
        assert_eq!(client.base_url, "http://localhost:9999");
    }
}
