//! Video analysis: the request/result model and the pipeline producing it.

mod models;
mod service;

pub use models::{
    AnalysisRequest, AnalysisResult, AnalysisType, Insight, KeyMoment, Sentiment, VideoMetadata,
};
pub use service::{Analyzer, AnalyzerOptions};
