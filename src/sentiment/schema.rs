//! Response schema for the structured analysis request

use serde_json::{json, Value};

use crate::types::Sentiment;

/// JSON schema the model's analysis output is constrained to.
///
/// Field-for-field mirror of the [`crate::types::SentimentAnalysis`] wire
/// shape. Uses the Gemini schema dialect (uppercase type names).
pub fn response_schema() -> Value {
    let sentiment_values: Vec<&str> = Sentiment::ALL.iter().map(|s| s.as_str()).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "overallSentiment": {
                "type": "STRING",
                "enum": sentiment_values,
                "description": "The overall sentiment of the post regarding the topic."
            },
            "sentimentScore": {
                "type": "NUMBER",
                "description": "A score from -1.0 (very negative) to 1.0 (very positive) representing the sentiment."
            },
            "explanation": {
                "type": "STRING",
                "description": "A detailed explanation for the sentiment analysis, referencing parts of the post."
            },
            "keyPhrases": {
                "type": "ARRAY",
                "description": "A list of key phrases from the post that contribute to the sentiment.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "phrase": {
                            "type": "STRING",
                            "description": "The specific phrase from the post."
                        },
                        "sentiment": {
                            "type": "STRING",
                            "enum": sentiment_values,
                            "description": "The sentiment of this specific phrase."
                        }
                    },
                    "required": ["phrase", "sentiment"]
                }
            }
        },
        "required": ["overallSentiment", "sentimentScore", "explanation", "keyPhrases"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_requires_all_top_level_fields() {
        let schema = response_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();

        assert_eq!(
            required,
            vec!["overallSentiment", "sentimentScore", "explanation", "keyPhrases"]
        );
    }

    #[test]
    fn test_schema_sentiment_enum_is_closed() {
        let schema = response_schema();
        let values = schema["properties"]["overallSentiment"]["enum"]
            .as_array()
            .unwrap();

        assert_eq!(values.len(), 4);
        assert!(values.contains(&serde_json::json!("Positive")));
        assert!(values.contains(&serde_json::json!("Mixed")));
    }

    #[test]
    fn test_schema_key_phrase_items_require_both_fields() {
        let schema = response_schema();
        let required = schema["properties"]["keyPhrases"]["items"]["required"]
            .as_array()
            .unwrap();

        assert_eq!(required.len(), 2);
    }
}
