//! In-memory test doubles for the transcript and inference capabilities.

use crate::error::{Result, TubelensError};
use crate::inference::schema::METADATA_SCHEMA_NAME;
use crate::inference::{InferenceRequest, StructuredInference};
use crate::transcript::{Transcript, TranscriptSegment};
use crate::video_source::{SourceMetadata, TranscriptSource, VideoRef};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub(crate) const SAMPLE_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

pub(crate) struct FakeSource {
    pub transcript: Option<Transcript>,
    pub metadata: SourceMetadata,
    pub delay: Duration,
    pub metadata_delay: Duration,
    pub calls: AtomicUsize,
}

impl FakeSource {
    pub fn with_captions() -> Self {
        Self {
            transcript: Some(Transcript::new(
                "dQw4w9WgXcQ".to_string(),
                vec![
                    TranscriptSegment::new(0.0, 5.0, "Welcome to the Rust basics.".to_string()),
                    TranscriptSegment::new(60.0, 64.0, "Now ownership.".to_string()),
                    TranscriptSegment::new(150.0, 155.0, "Thanks for watching.".to_string()),
                ],
            )),
            metadata: SourceMetadata {
                title: Some("Rust Basics".to_string()),
                author: Some("Ferris".to_string()),
                duration_seconds: Some(180.0),
            },
            delay: Duration::ZERO,
            metadata_delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    /// A video whose captions are disabled.
    pub fn without_captions() -> Self {
        Self {
            transcript: None,
            ..Self::with_captions()
        }
    }
}

#[async_trait]
impl TranscriptSource for FakeSource {
    async fn fetch_transcript(&self, video: &VideoRef) -> Result<Transcript> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.transcript.clone().ok_or_else(|| {
            TubelensError::TranscriptUnavailable(format!("captions disabled for {}", video))
        })
    }

    async fn fetch_metadata(&self, _video: &VideoRef) -> Result<SourceMetadata> {
        tokio::time::sleep(self.metadata_delay).await;
        Ok(self.metadata.clone())
    }
}

pub(crate) struct FakeInference {
    pub analysis: Value,
    pub metadata: Value,
    pub delay: Duration,
    pub calls: AtomicUsize,
    pub schemas: Mutex<Vec<String>>,
}

impl FakeInference {
    pub fn new() -> Self {
        Self {
            analysis: json!({
                "topics": ["Ownership", "Borrowing"],
                "insights": [{"content": "Ownership removes a class of bugs", "sentiment": "positive"}],
                "key_moments": [
                    {"timestamp_seconds": 60.0, "description": "Ownership explained"},
                    {"timestamp_seconds": 0.0, "description": "Introduction"}
                ],
                "summary": "A short tour of Rust ownership."
            }),
            metadata: json!({"title": "Rust Ownership in Three Minutes", "author": "Ferris"}),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            schemas: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl StructuredInference for FakeInference {
    async fn infer(&self, request: &InferenceRequest) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.schemas.lock().unwrap().push(request.schema_name.clone());
        tokio::time::sleep(self.delay).await;
        if request.schema_name == METADATA_SCHEMA_NAME {
            Ok(self.metadata.clone())
        } else {
            Ok(self.analysis.clone())
        }
    }

    fn model(&self) -> &str {
        "fake-model"
    }
}
