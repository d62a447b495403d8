//! Transcript model and preparation.
//!
//! Holds fetched captions, renders them for the model and splits them into
//! readable chunks for clients.

mod chunks;
mod models;

pub use chunks::{split_into_chunks, TranscriptChunk};
pub use models::{format_timestamp, truncate_chars, Transcript, TranscriptSegment};
