//! Output schemas sent to the model and validation of what comes back.
//!
//! The model's reply is untyped JSON. Nothing reaches a caller until it has
//! been deserialized into a draft and checked against the invariants below.

use crate::analysis::Insight;
use crate::error::{Result, TubelensError};
use serde::Deserialize;
use serde_json::{json, Value};

pub const ANALYSIS_SCHEMA_NAME: &str = "video_analysis";
pub const METADATA_SCHEMA_NAME: &str = "video_metadata";

/// Strict JSON schema for the main analysis call.
pub fn analysis_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "topics": {
                "type": "array",
                "description": "Main topics, most important first",
                "items": { "type": "string" }
            },
            "insights": {
                "type": "array",
                "description": "Key takeaways",
                "items": {
                    "type": "object",
                    "properties": {
                        "content": { "type": "string" },
                        "sentiment": {
                            "type": "string",
                            "enum": ["positive", "negative", "neutral"]
                        }
                    },
                    "required": ["content", "sentiment"],
                    "additionalProperties": false
                }
            },
            "key_moments": {
                "type": "array",
                "description": "Notable events with their offset into the video",
                "items": {
                    "type": "object",
                    "properties": {
                        "timestamp_seconds": {
                            "type": "number",
                            "description": "Offset in seconds, taken from the transcript markers"
                        },
                        "description": { "type": "string" }
                    },
                    "required": ["timestamp_seconds", "description"],
                    "additionalProperties": false
                }
            },
            "summary": {
                "type": "string",
                "description": "A comprehensive summary of the whole video"
            }
        },
        "required": ["topics", "insights", "key_moments", "summary"],
        "additionalProperties": false
    })
}

/// Strict JSON schema for the metadata fallback call.
pub fn metadata_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "title": {
                "type": "string",
                "description": "Most suitable title for the video"
            },
            "author": {
                "type": "string",
                "description": "Speaker or channel name"
            }
        },
        "required": ["title", "author"],
        "additionalProperties": false
    })
}

/// Key moment as produced by the model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DraftMoment {
    pub timestamp_seconds: f64,
    pub description: String,
}

/// Validated output of the analysis call.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalysisDraft {
    pub topics: Vec<String>,
    pub insights: Vec<Insight>,
    pub key_moments: Vec<DraftMoment>,
    pub summary: String,
}

/// Validated output of the metadata call.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MetadataDraft {
    pub title: String,
    pub author: String,
}

fn invalid(msg: impl std::fmt::Display) -> TubelensError {
    TubelensError::InferenceFailure(format!("Model output does not match schema: {}", msg))
}

/// Validate the analysis reply.
///
/// Timestamps must be finite and non-negative, and no later than
/// `duration_seconds` when the duration is known.
pub fn validate_analysis(value: Value, duration_seconds: Option<f64>) -> Result<AnalysisDraft> {
    let mut draft: AnalysisDraft = serde_json::from_value(value).map_err(invalid)?;

    draft.summary = draft.summary.trim().to_string();
    if draft.summary.is_empty() {
        return Err(invalid("summary is empty"));
    }

    draft.topics = draft
        .topics
        .into_iter()
        .map(|t| t.trim().to_string())
        .collect();
    if draft.topics.iter().any(String::is_empty) {
        return Err(invalid("topic is empty"));
    }

    for insight in &mut draft.insights {
        insight.content = insight.content.trim().to_string();
        if insight.content.is_empty() {
            return Err(invalid("insight content is empty"));
        }
    }

    for moment in &mut draft.key_moments {
        let ts = moment.timestamp_seconds;
        if !ts.is_finite() || ts < 0.0 {
            return Err(invalid(format!("key moment timestamp {} is negative or not finite", ts)));
        }
        if let Some(duration) = duration_seconds {
            if ts > duration {
                return Err(invalid(format!(
                    "key moment timestamp {} exceeds video duration {}",
                    ts, duration
                )));
            }
        }
        moment.description = moment.description.trim().to_string();
        if moment.description.is_empty() {
            return Err(invalid("key moment description is empty"));
        }
    }

    Ok(draft)
}

/// Validate the metadata reply.
pub fn validate_metadata(value: Value) -> Result<MetadataDraft> {
    let draft: MetadataDraft = serde_json::from_value(value).map_err(invalid)?;
    let title = draft.title.trim().to_string();
    let author = draft.author.trim().to_string();
    if title.is_empty() || author.is_empty() {
        return Err(invalid("title or author is empty"));
    }
    Ok(MetadataDraft { title, author })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Sentiment;

    fn reply() -> Value {
        json!({
            "topics": [" Ownership ", "Borrowing"],
            "insights": [{"content": "Rust prevents data races", "sentiment": "positive"}],
            "key_moments": [
                {"timestamp_seconds": 95.0, "description": "Borrow checker demo"},
                {"timestamp_seconds": 12.0, "description": "Intro to ownership"}
            ],
            "summary": "An overview of Rust memory safety."
        })
    }

    #[test]
    fn test_valid_reply() {
        let draft = validate_analysis(reply(), Some(120.0)).unwrap();
        assert_eq!(draft.topics, vec!["Ownership", "Borrowing"]);
        assert_eq!(draft.insights[0].sentiment, Sentiment::Positive);
        // moments keep the model's order
        assert_eq!(draft.key_moments[0].timestamp_seconds, 95.0);
    }

    #[test]
    fn test_unknown_duration_skips_upper_bound() {
        let mut value = reply();
        value["key_moments"][0]["timestamp_seconds"] = json!(10_000.0);
        assert!(validate_analysis(value.clone(), None).is_ok());
        assert!(matches!(
            validate_analysis(value, Some(120.0)),
            Err(TubelensError::InferenceFailure(_))
        ));
    }

    #[test]
    fn test_rejects_negative_timestamp() {
        let mut value = reply();
        value["key_moments"][1]["timestamp_seconds"] = json!(-1.0);
        assert!(matches!(
            validate_analysis(value, None),
            Err(TubelensError::InferenceFailure(_))
        ));
    }

    #[test]
    fn test_rejects_missing_fields_and_bad_enums() {
        let mut missing = reply();
        missing.as_object_mut().unwrap().remove("summary");
        assert!(validate_analysis(missing, None).is_err());

        let mut bad_sentiment = reply();
        bad_sentiment["insights"][0]["sentiment"] = json!("ecstatic");
        assert!(validate_analysis(bad_sentiment, None).is_err());

        let mut blank_summary = reply();
        blank_summary["summary"] = json!("   ");
        assert!(validate_analysis(blank_summary, None).is_err());

        assert!(validate_analysis(json!("just text"), None).is_err());
    }

    #[test]
    fn test_metadata_validation() {
        let draft =
            validate_metadata(json!({"title": " Rust Basics ", "author": "Ferris"})).unwrap();
        assert_eq!(draft.title, "Rust Basics");
        assert!(validate_metadata(json!({"title": "", "author": "Ferris"})).is_err());
        assert!(validate_metadata(json!({"title": "x"})).is_err());
    }

    #[test]
    fn test_schemas_are_strict() {
        for schema in [analysis_schema(), metadata_schema()] {
            assert_eq!(schema["additionalProperties"], json!(false));
            let props = schema["properties"].as_object().unwrap().len();
            assert_eq!(schema["required"].as_array().unwrap().len(), props);
        }
    }
}
