//! YouTube URL parsing and normalization.

use crate::error::{Result, TubelensError};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

const YOUTUBE_HOSTS: &[&str] = &[
    "youtube.com",
    "www.youtube.com",
    "m.youtube.com",
    "music.youtube.com",
];

/// Path prefixes that carry the video ID as the next path segment.
const ID_PATH_PREFIXES: &[&str] = &["embed", "v", "shorts", "live"];

fn video_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("valid video id regex"))
}

/// A validated reference to a single YouTube video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRef {
    id: String,
}

impl VideoRef {
    /// Parse a YouTube video URL.
    ///
    /// Accepts `watch?v=`, `youtu.be/`, `/embed/`, `/v/`, `/shorts/` and
    /// `/live/` forms, with or without a scheme.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(TubelensError::InvalidInput("URL is empty".to_string()));
        }

        let with_scheme = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("https://{}", trimmed)
        };

        let url = Url::parse(&with_scheme)
            .map_err(|e| TubelensError::InvalidInput(format!("Not a valid URL '{}': {}", trimmed, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(TubelensError::InvalidInput(format!(
                "Unsupported URL scheme: {}",
                url.scheme()
            )));
        }

        let host = url
            .host_str()
            .map(|h| h.to_ascii_lowercase())
            .ok_or_else(|| TubelensError::InvalidInput(format!("URL has no host: {}", trimmed)))?;

        let candidate = if host == "youtu.be" {
            url.path_segments().and_then(|mut s| s.next()).map(str::to_string)
        } else if YOUTUBE_HOSTS.contains(&host.as_str()) {
            Self::id_from_youtube_url(&url)
        } else {
            return Err(TubelensError::InvalidInput(format!(
                "Not a YouTube URL: {}",
                trimmed
            )));
        };

        match candidate {
            Some(id) if video_id_regex().is_match(&id) => Ok(Self { id }),
            _ => Err(TubelensError::InvalidInput(format!(
                "URL does not reference a YouTube video: {}",
                trimmed
            ))),
        }
    }

    fn id_from_youtube_url(url: &Url) -> Option<String> {
        let mut segments = url.path_segments()?;
        match segments.next()? {
            "watch" => url
                .query_pairs()
                .find(|(k, _)| k == "v")
                .map(|(_, v)| v.into_owned()),
            prefix if ID_PATH_PREFIXES.contains(&prefix) => segments.next().map(str::to_string),
            _ => None,
        }
    }

    /// The 11-character video ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Canonical watch URL.
    pub fn canonical_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.id)
    }
}

impl std::fmt::Display for VideoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(input: &str) -> Option<String> {
        VideoRef::parse(input).ok().map(|v| v.id().to_string())
    }

    #[test]
    fn test_parse_url_forms() {
        let expected = Some("dQw4w9WgXcQ".to_string());
        assert_eq!(id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), expected);
        assert_eq!(id("https://youtube.com/watch?feature=share&v=dQw4w9WgXcQ"), expected);
        assert_eq!(id("https://youtu.be/dQw4w9WgXcQ?si=wgHCePrBGGrP0XuJ"), expected);
        assert_eq!(id("https://www.youtube.com/embed/dQw4w9WgXcQ"), expected);
        assert_eq!(id("https://youtube.com/v/dQw4w9WgXcQ"), expected);
        assert_eq!(id("https://www.youtube.com/shorts/dQw4w9WgXcQ"), expected);
        assert_eq!(id("https://m.youtube.com/watch?v=dQw4w9WgXcQ&t=42s"), expected);
        assert_eq!(id("www.youtube.com/watch?v=dQw4w9WgXcQ"), expected);
        assert_eq!(id("  youtu.be/dQw4w9WgXcQ  "), expected);
        assert_eq!(id("https://youtu.be/-Yj1At289rw"), Some("-Yj1At289rw".to_string()));
    }

    #[test]
    fn test_rejects_invalid_input() {
        for input in [
            "",
            "not a url",
            "dQw4w9WgXcQ",
            "https://vimeo.com/123456",
            "https://www.youtube.com/",
            "https://www.youtube.com/watch?v=short",
            "https://www.youtube.com/playlist?list=PLtest",
            "https://www.youtube.com/@channel",
            "ftp://youtube.com/watch?v=dQw4w9WgXcQ",
            "https://notyoutube.com/watch?v=dQw4w9WgXcQ",
        ] {
            let err = VideoRef::parse(input).unwrap_err();
            assert!(
                matches!(err, TubelensError::InvalidInput(_)),
                "expected InvalidInput for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_canonical_urls() {
        let video = VideoRef::parse("https://youtu.be/dQw4w9WgXcQ").unwrap();
        assert_eq!(video.canonical_url(), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    }
}
