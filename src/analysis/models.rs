//! Request and result types for video analysis.

use crate::transcript::TranscriptChunk;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which sections of the analysis the model is asked to fill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisType {
    #[default]
    Full,
    SummaryOnly,
    TopicsOnly,
    InsightsOnly,
}

impl AnalysisType {
    pub fn wants_topics(self) -> bool {
        matches!(self, AnalysisType::Full | AnalysisType::TopicsOnly)
    }

    pub fn wants_insights(self) -> bool {
        matches!(self, AnalysisType::Full | AnalysisType::InsightsOnly)
    }

    pub fn wants_key_moments(self) -> bool {
        self == AnalysisType::Full
    }

    /// Instructions telling the model which sections to produce.
    pub fn instructions(self) -> String {
        let mut steps = Vec::new();
        if self.wants_topics() {
            steps.push("Extract 3-5 main topics.");
        }
        if self.wants_insights() {
            steps.push("Extract the key insights, each tagged positive, negative or neutral.");
        }
        if self.wants_key_moments() {
            steps.push("Identify key moments with timestamps taken from the transcript markers.");
        }
        steps.push("Write a high-quality summary.");

        let mut text = steps
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{}. {}", i + 1, s))
            .collect::<Vec<_>>()
            .join("\n");

        if self != AnalysisType::Full {
            text.push_str("\nReturn empty arrays for every section not listed above.");
        }
        text
    }
}

impl std::fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisType::Full => write!(f, "full"),
            AnalysisType::SummaryOnly => write!(f, "summary_only"),
            AnalysisType::TopicsOnly => write!(f, "topics_only"),
            AnalysisType::InsightsOnly => write!(f, "insights_only"),
        }
    }
}

impl std::str::FromStr for AnalysisType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "full" => Ok(AnalysisType::Full),
            "summary_only" | "summary" => Ok(AnalysisType::SummaryOnly),
            "topics_only" | "topics" => Ok(AnalysisType::TopicsOnly),
            "insights_only" | "insights" => Ok(AnalysisType::InsightsOnly),
            _ => Err(format!("Unknown analysis type: {}", s)),
        }
    }
}

/// Inbound analysis request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// YouTube video URL.
    #[serde(alias = "youtube_url")]
    pub url: String,
    #[serde(default)]
    pub analysis_type: AnalysisType,
}

impl AnalysisRequest {
    pub fn new(url: impl Into<String>, analysis_type: AnalysisType) -> Self {
        Self {
            url: url.into(),
            analysis_type,
        }
    }
}

/// Tone of an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// A takeaway extracted from the video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub content: String,
    pub sentiment: Sentiment,
}

/// A notable point in the video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMoment {
    /// Offset into the video in seconds.
    pub timestamp: f64,
    /// The offset rendered as MM:SS or HH:MM:SS.
    pub label: String,
    pub description: String,
}

/// Title and author of the analyzed video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: String,
    pub author: String,
    pub video_id: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
    /// True when title or author was inferred by the model.
    pub inferred: bool,
}

/// Structured analysis returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub analysis_type: AnalysisType,
    pub topics: Vec<String>,
    pub summary: String,
    pub key_moments: Vec<KeyMoment>,
    pub insights: Vec<Insight>,
    pub metadata: VideoMetadata,
    pub transcript_chunks: Vec<TranscriptChunk>,
    /// Whether the transcript was cut short before inference.
    pub transcript_truncated: bool,
    /// Seconds spent serving the request.
    pub processing_time: f64,
    pub analyzed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accepts_both_field_names() {
        let req: AnalysisRequest =
            serde_json::from_str(r#"{"url": "https://youtu.be/dQw4w9WgXcQ"}"#).unwrap();
        assert_eq!(req.analysis_type, AnalysisType::Full);

        let req: AnalysisRequest = serde_json::from_str(
            r#"{"youtube_url": "https://youtu.be/dQw4w9WgXcQ", "analysis_type": "topics_only"}"#,
        )
        .unwrap();
        assert_eq!(req.url, "https://youtu.be/dQw4w9WgXcQ");
        assert_eq!(req.analysis_type, AnalysisType::TopicsOnly);
    }

    #[test]
    fn test_analysis_type_parsing() {
        assert_eq!("summary".parse::<AnalysisType>(), Ok(AnalysisType::SummaryOnly));
        assert_eq!("insights-only".parse::<AnalysisType>(), Ok(AnalysisType::InsightsOnly));
        assert!("everything".parse::<AnalysisType>().is_err());
        assert_eq!(AnalysisType::TopicsOnly.to_string(), "topics_only");
    }

    #[test]
    fn test_instructions_follow_type() {
        let full = AnalysisType::Full.instructions();
        assert!(full.contains("topics"));
        assert!(full.contains("key moments"));
        assert!(!full.contains("empty arrays"));

        let summary = AnalysisType::SummaryOnly.instructions();
        assert!(summary.starts_with("1. Write a high-quality summary."));
        assert!(summary.contains("empty arrays"));
    }
}
