//! Video source abstraction for Tubelens.
//!
//! Provides URL validation and a trait-based interface for fetching
//! transcripts and source metadata.

mod reference;
mod youtube;

pub use reference::VideoRef;
pub use youtube::YoutubeTranscriptSource;

use crate::error::Result;
use crate::transcript::Transcript;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Title and author reported by the video platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// Title (if available).
    pub title: Option<String>,
    /// Channel or author name (if available).
    pub author: Option<String>,
    /// Duration in seconds (if known).
    pub duration_seconds: Option<f64>,
}

impl SourceMetadata {
    /// Title if it is present and meaningful for the given video.
    pub fn usable_title(&self, video_id: &str) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| is_meaningful(t) && *t != video_id)
    }

    /// Author if it is present and meaningful.
    pub fn usable_author(&self) -> Option<&str> {
        self.author.as_deref().map(str::trim).filter(|a| is_meaningful(a))
    }

    /// Whether either title or author needs to be inferred.
    pub fn is_insufficient(&self, video_id: &str) -> bool {
        self.usable_title(video_id).is_none() || self.usable_author().is_none()
    }

    /// Duration if it is a positive, finite number of seconds.
    pub fn known_duration(&self) -> Option<f64> {
        self.duration_seconds.filter(|d| d.is_finite() && *d > 0.0)
    }
}

fn is_meaningful(value: &str) -> bool {
    !value.is_empty() && !value.eq_ignore_ascii_case("unknown")
}

/// Transcript-fetch capability.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the full transcript for a video.
    ///
    /// Fails with `TranscriptUnavailable` when captions are disabled or the
    /// video is private, deleted or restricted.
    async fn fetch_transcript(&self, video: &VideoRef) -> Result<Transcript>;

    /// Fetch title, author and duration for a video.
    async fn fetch_metadata(&self, video: &VideoRef) -> Result<SourceMetadata>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_metadata() {
        let complete = SourceMetadata {
            title: Some("Rust in 100 Seconds".to_string()),
            author: Some("Fireship".to_string()),
            duration_seconds: Some(140.0),
        };
        assert!(!complete.is_insufficient("abcdefghijk"));

        let unknown_author = SourceMetadata {
            author: Some("Unknown".to_string()),
            ..complete.clone()
        };
        assert!(unknown_author.is_insufficient("abcdefghijk"));
        assert_eq!(unknown_author.usable_title("abcdefghijk"), Some("Rust in 100 Seconds"));

        let id_as_title = SourceMetadata {
            title: Some("abcdefghijk".to_string()),
            ..complete.clone()
        };
        assert!(id_as_title.is_insufficient("abcdefghijk"));

        assert!(SourceMetadata::default().is_insufficient("abcdefghijk"));
    }

    #[test]
    fn test_known_duration() {
        let mut meta = SourceMetadata::default();
        assert_eq!(meta.known_duration(), None);
        meta.duration_seconds = Some(0.0);
        assert_eq!(meta.known_duration(), None);
        meta.duration_seconds = Some(212.0);
        assert_eq!(meta.known_duration(), Some(212.0));
    }
}
