//! Data models for fetched transcripts.

use serde::{Deserialize, Serialize};

/// A complete transcript with timed segments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Video ID this transcript belongs to.
    pub video_id: String,
    /// Individual caption segments with timestamps.
    pub segments: Vec<TranscriptSegment>,
    /// Full transcript text (concatenated segments).
    pub full_text: String,
}

impl Transcript {
    /// Create a new transcript from segments.
    pub fn new(video_id: String, segments: Vec<TranscriptSegment>) -> Self {
        let full_text = segments
            .iter()
            .map(|s| s.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            video_id,
            segments,
            full_text,
        }
    }

    /// True when there is no spoken text at all.
    pub fn is_empty(&self) -> bool {
        self.full_text.trim().is_empty()
    }

    /// Format the transcript with a start marker per line, as fed to the model.
    pub fn format_with_timestamps(&self) -> String {
        self.segments
            .iter()
            .filter(|s| !s.text.trim().is_empty())
            .map(|s| format!("[{}] {}", format_timestamp(s.start_seconds), s.text.trim()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Timestamped text limited to `max_chars` characters.
    ///
    /// Returns the text and whether it was cut short. Cuts happen on a line
    /// boundary when one exists within the limit.
    pub fn prompt_text(&self, max_chars: usize) -> (String, bool) {
        let formatted = self.format_with_timestamps();
        if formatted.chars().count() <= max_chars {
            return (formatted, false);
        }

        let cut = truncate_chars(&formatted, max_chars);
        let cut = match cut.rfind('\n') {
            Some(pos) if pos > 0 => &cut[..pos],
            _ => cut,
        };
        (cut.to_string(), true)
    }
}

/// A single caption segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Start time in seconds.
    pub start_seconds: f64,
    /// End time in seconds.
    pub end_seconds: f64,
    /// Caption text.
    pub text: String,
}

impl TranscriptSegment {
    pub fn new(start_seconds: f64, end_seconds: f64, text: String) -> Self {
        Self {
            start_seconds,
            end_seconds,
            text,
        }
    }
}

/// Format seconds as MM:SS or HH:MM:SS.
pub fn format_timestamp(seconds: f64) -> String {
    let total_seconds = seconds.max(0.0) as u32;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// Longest prefix of `text` holding at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transcript {
        Transcript::new(
            "abc".to_string(),
            vec![
                TranscriptSegment::new(0.0, 4.5, "Hello world.".to_string()),
                TranscriptSegment::new(4.5, 9.0, "  ".to_string()),
                TranscriptSegment::new(65.0, 70.0, "This is a test.".to_string()),
            ],
        )
    }

    #[test]
    fn test_transcript_creation() {
        let transcript = sample();
        assert_eq!(transcript.full_text, "Hello world. This is a test.");
        assert!(!transcript.is_empty());
        assert!(Transcript::new("x".into(), Vec::new()).is_empty());
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "00:00");
        assert_eq!(format_timestamp(65.0), "01:05");
        assert_eq!(format_timestamp(3665.0), "01:01:05");
        assert_eq!(format_timestamp(-3.0), "00:00");
    }

    #[test]
    fn test_format_with_timestamps_skips_blank_lines() {
        assert_eq!(
            sample().format_with_timestamps(),
            "[00:00] Hello world.\n[01:05] This is a test."
        );
    }

    #[test]
    fn test_prompt_text_truncates_on_line_boundary() {
        let transcript = sample();
        let (full, truncated) = transcript.prompt_text(1_000);
        assert!(!truncated);
        assert_eq!(full, transcript.format_with_timestamps());

        let (cut, truncated) = transcript.prompt_text(30);
        assert!(truncated);
        assert_eq!(cut, "[00:00] Hello world.");
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }
}
