//! Schema-constrained sentiment analysis request

use tracing::debug;

use super::schema::response_schema;
use crate::client::GenerativeModel;
use crate::config::ModelConfig;
use crate::error::{AnalyzerError, Result};
use crate::types::SentimentAnalysis;

fn build_prompt(content: &str, topic: &str) -> String {
    format!(
        r#"Analyze the sentiment of the following social media post specifically about the topic: "{topic}".
If the topic is not mentioned or clearly implied, state that in the explanation.

Post:
"""
{content}
"""

Provide a detailed analysis based on the schema."#
    )
}

/// Run the structured analysis of `content` with respect to `topic`.
///
/// One request, no retries. An empty reply is [`AnalyzerError::EmptyResponse`];
/// anything that fails to parse or violates the data-model invariants is
/// [`AnalyzerError::MalformedResponse`].
pub async fn request_analysis(
    model: &dyn GenerativeModel,
    models: &ModelConfig,
    content: &str,
    topic: &str,
) -> Result<SentimentAnalysis> {
    let prompt = build_prompt(content, topic);

    let response = model
        .generate_structured(
            &models.analysis_model,
            &prompt,
            response_schema(),
            models.temperature,
        )
        .await?;

    let json_text = response.trim();
    if json_text.is_empty() {
        return Err(AnalyzerError::EmptyResponse);
    }

    debug!("analysis response: {} bytes", json_text.len());

    let analysis: SentimentAnalysis = serde_json::from_str(json_text).map_err(|e| {
        AnalyzerError::MalformedResponse(format!("failed to parse analysis response: {}", e))
    })?;

    analysis.validate()?;
    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockModel;
    use crate::types::Sentiment;

    const VALID_RESPONSE: &str = r#"{
        "overallSentiment": "Negative",
        "sentimentScore": -0.7,
        "explanation": "The post is sharply critical of the battery life.",
        "keyPhrases": [
            {"phrase": "dies before lunch", "sentiment": "Negative"}
        ]
    }"#;

    #[tokio::test]
    async fn test_parses_valid_response() {
        let mock = MockModel::new().with_structured_response(VALID_RESPONSE);

        let analysis = request_analysis(
            &mock,
            &ModelConfig::default(),
            "The battery dies before lunch.",
            "battery life",
        )
        .await
        .unwrap();

        assert_eq!(analysis.overall_sentiment, Sentiment::Negative);
        assert_eq!(analysis.key_phrases[0].phrase, "dies before lunch");
    }

    #[tokio::test]
    async fn test_prompt_embeds_topic_and_content() {
        let mock = MockModel::new().with_structured_response(VALID_RESPONSE);

        request_analysis(&mock, &ModelConfig::default(), "some post text", "battery life")
            .await
            .unwrap();

        let prompt = mock.last_prompt().unwrap();
        assert!(prompt.contains("the topic: \"battery life\""));
        assert!(prompt.contains("some post text"));
        assert!(prompt.contains("If the topic is not mentioned or clearly implied"));
    }

    #[tokio::test]
    async fn test_empty_reply_is_empty_response() {
        let mock = MockModel::new().with_structured_response("  \n ");

        let err = request_analysis(&mock, &ModelConfig::default(), "post", "topic")
            .await
            .unwrap_err();

        assert!(matches!(err, AnalyzerError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_invalid_json_is_malformed_response() {
        let mock = MockModel::new().with_structured_response("not json at all");

        let err = request_analysis(&mock, &ModelConfig::default(), "post", "topic")
            .await
            .unwrap_err();

        assert!(matches!(err, AnalyzerError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_out_of_range_score_is_malformed_response() {
        let mock = MockModel::new().with_structured_response(
            r#"{"overallSentiment": "Positive", "sentimentScore": 1.5,
                "explanation": "x", "keyPhrases": []}"#,
        );

        let err = request_analysis(&mock, &ModelConfig::default(), "post", "topic")
            .await
            .unwrap_err();

        assert!(matches!(err, AnalyzerError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_unknown_sentiment_value_is_malformed_response() {
        let mock = MockModel::new().with_structured_response(
            r#"{"overallSentiment": "Ecstatic", "sentimentScore": 0.9,
                "explanation": "x", "keyPhrases": []}"#,
        );

        let err = request_analysis(&mock, &ModelConfig::default(), "post", "topic")
            .await
            .unwrap_err();

        assert!(matches!(err, AnalyzerError::MalformedResponse(_)));
    }
}
