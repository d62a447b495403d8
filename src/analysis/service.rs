//! The analysis pipeline.
//!
//! URL → transcript → structured inference → metadata fallback → result.
//! Every step either succeeds or ends the request; nothing partial is returned.

use super::{AnalysisRequest, AnalysisResult, AnalysisType, KeyMoment, VideoMetadata};
use crate::config::{Prompts, Settings};
use crate::error::{Result, TubelensError};
use crate::inference::schema::{
    analysis_schema, metadata_schema, validate_analysis, validate_metadata, ANALYSIS_SCHEMA_NAME,
    METADATA_SCHEMA_NAME,
};
use crate::inference::{
    AnalysisDraft, InferenceRequest, MetadataDraft, OpenAIInference, StructuredInference,
};
use crate::transcript::{
    format_timestamp, split_into_chunks, truncate_chars, Transcript, TranscriptChunk,
};
use crate::video_source::{SourceMetadata, TranscriptSource, VideoRef, YoutubeTranscriptSource};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Characters of transcript given to the metadata fallback call.
const METADATA_EXCERPT_CHARS: usize = 3_000;

/// Limits applied by the analyzer.
#[derive(Debug, Clone)]
pub struct AnalyzerOptions {
    pub transcript_timeout: Duration,
    pub inference_timeout: Duration,
    pub max_prompt_chars: usize,
    pub chunk_chars: usize,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            transcript_timeout: Duration::from_secs(30),
            inference_timeout: Duration::from_secs(120),
            max_prompt_chars: 12_000,
            chunk_chars: 400,
        }
    }
}

impl AnalyzerOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            transcript_timeout: settings.transcript.timeout(),
            inference_timeout: Duration::from_secs(settings.openai.timeout_seconds),
            max_prompt_chars: settings.transcript.max_prompt_chars,
            chunk_chars: settings.transcript.chunk_chars,
        }
    }
}

/// Turns a video URL into a structured analysis.
pub struct Analyzer {
    source: Arc<dyn TranscriptSource>,
    inference: Arc<dyn StructuredInference>,
    prompts: Prompts,
    options: AnalyzerOptions,
}

impl Analyzer {
    /// Create an analyzer with custom components.
    pub fn new(
        source: Arc<dyn TranscriptSource>,
        inference: Arc<dyn StructuredInference>,
        prompts: Prompts,
        options: AnalyzerOptions,
    ) -> Self {
        Self {
            source,
            inference,
            prompts,
            options,
        }
    }

    /// Create the production analyzer.
    ///
    /// Fails with a configuration error when no API key is available.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let inference_config = settings.inference_config()?;

        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let source = Arc::new(YoutubeTranscriptSource::new(&settings.transcript)?);
        let inference = Arc::new(OpenAIInference::new(&inference_config)?);

        info!(
            "Analyzer ready (model {}, languages {:?})",
            inference_config.model, settings.transcript.languages
        );

        Ok(Self::new(
            source,
            inference,
            prompts,
            AnalyzerOptions::from_settings(settings),
        ))
    }

    pub fn model(&self) -> &str {
        self.inference.model()
    }

    /// Run the full pipeline for one request.
    #[instrument(skip(self, request), fields(url = %request.url, analysis_type = %request.analysis_type))]
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let started = Instant::now();

        let video = VideoRef::parse(&request.url)?;
        info!("Analyzing video {}", video);

        let (transcript, source_metadata) = self.fetch_sources(&video).await?;
        let duration = source_metadata.known_duration();

        let (draft, truncated) = self
            .run_analysis(&transcript, request.analysis_type, duration)
            .await?;

        let metadata = self
            .resolve_metadata(&video, &source_metadata, &transcript)
            .await?;

        let chunks = split_into_chunks(&transcript.full_text, self.options.chunk_chars);

        let result = Self::assemble(
            request.analysis_type,
            draft,
            metadata,
            chunks,
            truncated,
            started.elapsed(),
        );

        info!(
            "Analysis of {} complete: {} topics, {} moments, {} insights in {:.2}s",
            video,
            result.topics.len(),
            result.key_moments.len(),
            result.insights.len(),
            result.processing_time
        );

        Ok(result)
    }

    /// Fetch transcript and source metadata concurrently.
    ///
    /// A failed transcript ends the request without waiting on metadata.
    async fn fetch_sources(&self, video: &VideoRef) -> Result<(Transcript, SourceMetadata)> {
        futures::future::try_join(self.fetch_transcript(video), self.fetch_metadata(video)).await
    }

    async fn fetch_transcript(&self, video: &VideoRef) -> Result<Transcript> {
        let timeout = self.options.transcript_timeout;

        let transcript = match tokio::time::timeout(timeout, self.source.fetch_transcript(video))
            .await
        {
            Ok(Ok(t)) => t,
            Ok(Err(TubelensError::TranscriptUnavailable(msg))) => {
                return Err(TubelensError::TranscriptUnavailable(msg))
            }
            Ok(Err(e)) => {
                return Err(TubelensError::TranscriptUnavailable(format!(
                    "Transcript fetch for {} failed: {}",
                    video, e
                )))
            }
            Err(_) => {
                return Err(TubelensError::TranscriptUnavailable(format!(
                    "Transcript fetch for {} timed out after {}s",
                    video,
                    timeout.as_secs_f64()
                )))
            }
        };

        if transcript.is_empty() {
            return Err(TubelensError::TranscriptUnavailable(format!(
                "Transcript for {} is empty",
                video
            )));
        }

        Ok(transcript)
    }

    /// Never fails; missing metadata is filled in by inference later.
    async fn fetch_metadata(&self, video: &VideoRef) -> Result<SourceMetadata> {
        let timeout = self.options.transcript_timeout;

        let metadata = match tokio::time::timeout(timeout, self.source.fetch_metadata(video)).await
        {
            Ok(Ok(m)) => m,
            Ok(Err(e)) => {
                warn!("Could not fetch metadata for {}: {}", video, e);
                SourceMetadata::default()
            }
            Err(_) => {
                warn!("Metadata fetch for {} timed out", video);
                SourceMetadata::default()
            }
        };

        Ok(metadata)
    }

    /// Issue one inference call bounded by the configured timeout.
    async fn infer(&self, request: &InferenceRequest) -> Result<serde_json::Value> {
        let timeout = self.options.inference_timeout;
        match tokio::time::timeout(timeout, self.inference.infer(request)).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(TubelensError::InferenceFailure(msg))) => {
                Err(TubelensError::InferenceFailure(msg))
            }
            Ok(Err(e)) => Err(TubelensError::InferenceFailure(e.to_string())),
            Err(_) => Err(TubelensError::InferenceFailure(format!(
                "{} call timed out after {}s",
                request.schema_name,
                timeout.as_secs_f64()
            ))),
        }
    }

    async fn run_analysis(
        &self,
        transcript: &Transcript,
        analysis_type: AnalysisType,
        duration: Option<f64>,
    ) -> Result<(AnalysisDraft, bool)> {
        let (text, truncated) = transcript.prompt_text(self.options.max_prompt_chars);
        if truncated {
            debug!(
                "Transcript truncated to {} characters for inference",
                self.options.max_prompt_chars
            );
        }

        let mut vars = HashMap::new();
        vars.insert("transcript".to_string(), text);
        vars.insert("sections".to_string(), analysis_type.instructions());
        vars.insert(
            "duration".to_string(),
            duration
                .map(format_timestamp)
                .unwrap_or_else(|| "unknown".to_string()),
        );

        let request = InferenceRequest {
            schema_name: ANALYSIS_SCHEMA_NAME.to_string(),
            schema: analysis_schema(),
            system: self
                .prompts
                .render_with_custom(&self.prompts.analysis.system, &vars),
            user: self.prompts.render_with_custom(&self.prompts.analysis.user, &vars),
        };

        debug!("Analysis prompt is {} characters", request.user.len());

        let value = self.infer(&request).await?;
        let value = drop_unrequested(value, analysis_type);
        Ok((validate_analysis(value, duration)?, truncated))
    }

    /// Combine source metadata with a model suggestion when the source is lacking.
    async fn resolve_metadata(
        &self,
        video: &VideoRef,
        source: &SourceMetadata,
        transcript: &Transcript,
    ) -> Result<VideoMetadata> {
        let title = source.usable_title(video.id()).map(str::to_string);
        let author = source.usable_author().map(str::to_string);

        let (title, author, inferred) = if source.is_insufficient(video.id()) {
            info!("Source metadata for {} is insufficient, inferring", video);
            let suggested = self.infer_metadata(source, transcript).await?;
            (
                title.unwrap_or(suggested.title),
                author.unwrap_or(suggested.author),
                true,
            )
        } else {
            (title.unwrap_or_default(), author.unwrap_or_default(), false)
        };

        Ok(VideoMetadata {
            title,
            author,
            video_id: video.id().to_string(),
            url: video.canonical_url(),
            duration_seconds: source.known_duration(),
            inferred,
        })
    }

    async fn infer_metadata(
        &self,
        source: &SourceMetadata,
        transcript: &Transcript,
    ) -> Result<MetadataDraft> {
        let mut vars = HashMap::new();
        vars.insert(
            "transcript".to_string(),
            truncate_chars(&transcript.full_text, METADATA_EXCERPT_CHARS).to_string(),
        );
        vars.insert(
            "title".to_string(),
            source.title.clone().unwrap_or_else(|| "Unknown".to_string()),
        );
        vars.insert(
            "author".to_string(),
            source.author.clone().unwrap_or_else(|| "Unknown".to_string()),
        );

        let request = InferenceRequest {
            schema_name: METADATA_SCHEMA_NAME.to_string(),
            schema: metadata_schema(),
            system: self
                .prompts
                .render_with_custom(&self.prompts.metadata.system, &vars),
            user: self.prompts.render_with_custom(&self.prompts.metadata.user, &vars),
        };

        let value = self.infer(&request).await?;
        validate_metadata(value)
    }

    fn assemble(
        analysis_type: AnalysisType,
        draft: AnalysisDraft,
        metadata: VideoMetadata,
        transcript_chunks: Vec<TranscriptChunk>,
        transcript_truncated: bool,
        elapsed: Duration,
    ) -> AnalysisResult {
        let key_moments = draft
            .key_moments
            .into_iter()
            .map(|m| KeyMoment {
                label: format_timestamp(m.timestamp_seconds),
                timestamp: m.timestamp_seconds,
                description: m.description,
            })
            .collect();

        AnalysisResult {
            analysis_type,
            topics: draft.topics,
            summary: draft.summary,
            key_moments,
            insights: draft.insights,
            metadata,
            transcript_chunks,
            transcript_truncated,
            processing_time: elapsed.as_secs_f64(),
            analyzed_at: chrono::Utc::now(),
        }
    }
}

/// Empty the sections the analysis type did not ask for, so they are
/// neither validated nor returned.
fn drop_unrequested(mut value: serde_json::Value, analysis_type: AnalysisType) -> serde_json::Value {
    if let Some(sections) = value.as_object_mut() {
        let wanted = [
            ("topics", analysis_type.wants_topics()),
            ("insights", analysis_type.wants_insights()),
            ("key_moments", analysis_type.wants_key_moments()),
        ];
        for (key, wanted) in wanted {
            if !wanted {
                sections.insert(key.to_string(), serde_json::Value::Array(Vec::new()));
            }
        }
    }
    value
}
