//! Mock model client for testing
//!
//! Scripted responses standing in for the Gemini API:
//! - Unit tests without network calls
//! - Two-stage orchestration tests with controlled outcomes
//! - Call counting to verify which stages actually ran

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::GenerativeModel;
use crate::error::{AnalyzerError, Result};

/// Scripted [`GenerativeModel`] implementation.
///
/// Responses are consumed in push order, one per call. A call with no
/// remaining scripted response fails with an API error, so a test that
/// under-scripts fails loudly instead of hanging on a default.
pub struct MockModel {
    search_responses: Mutex<VecDeque<Result<String>>>,
    structured_responses: Mutex<VecDeque<Result<String>>>,
    search_calls: Mutex<u32>,
    structured_calls: Mutex<u32>,
    last_prompt: Mutex<Option<String>>,
}

impl MockModel {
    pub fn new() -> Self {
        Self {
            search_responses: Mutex::new(VecDeque::new()),
            structured_responses: Mutex::new(VecDeque::new()),
            search_calls: Mutex::new(0),
            structured_calls: Mutex::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn with_search_response(self, text: &str) -> Self {
        self.search_responses
            .lock()
            .unwrap()
            .push_back(Ok(text.to_string()));
        self
    }

    pub fn with_search_error(self, err: AnalyzerError) -> Self {
        self.search_responses.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn with_structured_response(self, text: &str) -> Self {
        self.structured_responses
            .lock()
            .unwrap()
            .push_back(Ok(text.to_string()));
        self
    }

    pub fn with_structured_error(self, err: AnalyzerError) -> Self {
        self.structured_responses.lock().unwrap().push_back(Err(err));
        self
    }

    /// Number of search-grounded requests issued so far
    pub fn search_calls(&self) -> u32 {
        *self.search_calls.lock().unwrap()
    }

    /// Number of schema-constrained requests issued so far
    pub fn structured_calls(&self) -> u32 {
        *self.structured_calls.lock().unwrap()
    }

    /// Prompt of the most recent request of either kind
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

impl Default for MockModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerativeModel for MockModel {
    async fn generate_with_search(
        &self,
        _model: &str,
        prompt: &str,
        _system_instruction: &str,
    ) -> Result<String> {
        *self.search_calls.lock().unwrap() += 1;
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());

        self.search_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AnalyzerError::Api("mock: no scripted search response".to_string())))
    }

    async fn generate_structured(
        &self,
        _model: &str,
        prompt: &str,
        _schema: serde_json::Value,
        _temperature: f32,
    ) -> Result<String> {
        *self.structured_calls.lock().unwrap() += 1;
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());

        self.structured_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(AnalyzerError::Api("mock: no scripted structured response".to_string()))
            })
    }
}
