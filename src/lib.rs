//! Tubelens - structured insights from YouTube transcripts
//!
//! Takes a YouTube URL, fetches the video's captions, and asks a language
//! model for a schema-constrained analysis: topics, insights with
//! sentiment, timestamped key moments and a summary.
//!
//! # Architecture
//!
//! - `video_source` - URL validation and the transcript source abstraction
//! - `transcript` - Transcript model, timestamp formatting, chunking
//! - `inference` - Structured inference against a JSON schema
//! - `analysis` - The analysis pipeline and its result types
//! - `api` - HTTP routes
//! - `config` - Settings and prompt templates
//!
//! # Example
//!
//! ```rust,no_run
//! use tubelens::analysis::{AnalysisRequest, AnalysisType, Analyzer};
//! use tubelens::config::Settings;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let analyzer = Analyzer::from_settings(&settings)?;
//!
//!     let request = AnalysisRequest::new(
//!         "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
//!         AnalysisType::Full,
//!     );
//!     let result = analyzer.analyze(&request).await?;
//!     println!("{}", result.summary);
//!
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod inference;
pub mod openai;
pub mod transcript;
pub mod video_source;

#[cfg(test)]
mod testing;

pub use error::{Result, TubelensError};
