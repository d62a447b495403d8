//! Prompt templates for Tubelens.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub analysis: AnalysisPrompts,
    pub metadata: MetadataPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompts for the main transcript analysis call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisPrompts {
    pub system: String,
    pub user: String,
}

impl Default for AnalysisPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a professional video content analyst. You receive the transcript of a YouTube video where each line starts with a [MM:SS] or [HH:MM:SS] marker giving the time the line is spoken.

Guidelines:
- Use only the transcript; never add outside knowledge
- Topics are short noun phrases (2-6 words), most important first
- Insights are concrete takeaways, each tagged positive, negative or neutral
- Key moments point at notable events; take timestamp_seconds from the nearest marker
- Never invent a timestamp later than the last marker in the transcript
- The summary is a few clear sentences covering the whole video

Respond only with JSON matching the provided schema."#
                .to_string(),

            user: r#"Analyze the following YouTube transcript.

{{sections}}

Video duration: {{duration}}

Transcript:
{{transcript}}"#
                .to_string(),
        }
    }
}

/// Prompts for the metadata fallback call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataPrompts {
    pub system: String,
    pub user: String,
}

impl Default for MetadataPrompts {
    fn default() -> Self {
        Self {
            system: r#"You suggest metadata for YouTube videos whose title or channel information is missing.

Guidelines:
- The title is clear and specific, at most 100 characters
- The author is the speaker or channel name if the transcript reveals it
- If the author cannot be identified, answer "Unknown Speaker"

Respond only with JSON matching the provided schema."#
                .to_string(),

            user: r#"Suggest a title and identify the speaker or channel for this video.

Known title: {{title}}
Known author: {{author}}

Transcript excerpt:
{{transcript}}"#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let analysis_path = custom_path.join("analysis.toml");
            if analysis_path.exists() {
                let content = std::fs::read_to_string(&analysis_path)?;
                prompts.analysis = toml::from_str(&content)?;
            }

            let metadata_path = custom_path.join("metadata.toml");
            if metadata_path.exists() {
                let content = std::fs::read_to_string(&metadata_path)?;
                prompts.metadata = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}
