//! YouTube transcript source built on `yt-transcript-rs`.

use super::{SourceMetadata, TranscriptSource, VideoRef};
use crate::config::TranscriptSettings;
use crate::error::{Result, TubelensError};
use crate::transcript::{Transcript, TranscriptSegment};
use async_trait::async_trait;
use tracing::{debug, info, instrument};
use yt_transcript_rs::api::YouTubeTranscriptApi;

/// Fetches captions and video details straight from YouTube.
pub struct YoutubeTranscriptSource {
    api: YouTubeTranscriptApi,
    languages: Vec<String>,
}

impl YoutubeTranscriptSource {
    pub fn new(settings: &TranscriptSettings) -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None).map_err(|e| {
            TubelensError::Config(format!("Failed to create YouTube transcript client: {}", e))
        })?;

        let languages = if settings.languages.is_empty() {
            vec!["en".to_string()]
        } else {
            settings.languages.clone()
        };

        Ok(Self { api, languages })
    }
}

#[async_trait]
impl TranscriptSource for YoutubeTranscriptSource {
    #[instrument(skip(self), fields(video_id = %video.id()))]
    async fn fetch_transcript(&self, video: &VideoRef) -> Result<Transcript> {
        let languages: Vec<&str> = self.languages.iter().map(String::as_str).collect();

        let fetched = self
            .api
            .fetch_transcript(video.id(), &languages, false)
            .await
            .map_err(|e| {
                TubelensError::TranscriptUnavailable(format!(
                    "No transcript for video {}: {}",
                    video.id(),
                    e
                ))
            })?;

        let language = fetched.language_code.clone();
        let segments: Vec<TranscriptSegment> = fetched
            .snippets
            .into_iter()
            .map(|snippet| {
                TranscriptSegment::new(
                    snippet.start,
                    snippet.start + snippet.duration,
                    snippet.text,
                )
            })
            .collect();

        info!(
            "Fetched {} caption segments ({}) for {}",
            segments.len(),
            language,
            video.id()
        );

        Ok(Transcript::new(video.id().to_string(), segments))
    }

    #[instrument(skip(self), fields(video_id = %video.id()))]
    async fn fetch_metadata(&self, video: &VideoRef) -> Result<SourceMetadata> {
        let details = self
            .api
            .fetch_video_details(video.id())
            .await
            .map_err(|e| {
                TubelensError::TranscriptUnavailable(format!(
                    "No details for video {}: {}",
                    video.id(),
                    e
                ))
            })?;

        debug!("Video details: title={:?} author={:?}", details.title, details.author);

        let duration = details.length_seconds as f64;
        Ok(SourceMetadata {
            title: Some(details.title),
            author: Some(details.author),
            duration_seconds: (duration > 0.0).then_some(duration),
        })
    }
}
