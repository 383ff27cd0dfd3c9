//! Core data types for sentiment analysis results

use serde::{Deserialize, Serialize};

use crate::error::{AnalyzerError, Result};

/// Aggregate emotional valence of a post with respect to a topic.
///
/// Closed set: the response schema constrains the model to these four
/// values, and deserialization rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    Mixed,
}

impl Sentiment {
    /// Every value accepted by the response schema, in schema order.
    pub const ALL: [Sentiment; 4] = [
        Sentiment::Positive,
        Sentiment::Negative,
        Sentiment::Neutral,
        Sentiment::Mixed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
            Sentiment::Mixed => "Mixed",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A verbatim excerpt from the analyzed content that contributes to the
/// sentiment judgment, tagged with its own local sentiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyPhrase {
    pub phrase: String,
    pub sentiment: Sentiment,
}

/// Structured result of one analysis request.
///
/// Constructed whole from a single parsed model response and owned by the
/// caller; there is no partial or incremental construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentAnalysis {
    pub overall_sentiment: Sentiment,
    /// -1.0 (most negative) to 1.0 (most positive)
    pub sentiment_score: f64,
    pub explanation: String,
    /// Key phrases in model output order; may be empty
    pub key_phrases: Vec<KeyPhrase>,
}

impl SentimentAnalysis {
    /// Check the invariants parsing alone does not enforce.
    ///
    /// The schema-constrained model is not contractually guaranteed to
    /// comply exactly, so the score range and phrase contents are verified
    /// here after deserialization.
    pub fn validate(&self) -> Result<()> {
        if !(-1.0..=1.0).contains(&self.sentiment_score) {
            return Err(AnalyzerError::MalformedResponse(format!(
                "sentimentScore {} is outside [-1.0, 1.0]",
                self.sentiment_score
            )));
        }

        if self.key_phrases.iter().any(|kp| kp.phrase.trim().is_empty()) {
            return Err(AnalyzerError::MalformedResponse(
                "key phrase with empty text".to_string(),
            ));
        }

        Ok(())
    }
}
