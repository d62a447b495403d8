//! Configuration module for Tubelens.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{AnalysisPrompts, MetadataPrompts, Prompts};
pub use settings::{
    InferenceConfig, OpenAISettings, PromptSettings, ServerSettings, Settings,
    TranscriptSettings, API_KEY_ENV,
};
