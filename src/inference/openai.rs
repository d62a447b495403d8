//! OpenAI structured-output implementation.

use super::{InferenceRequest, StructuredInference};
use crate::config::InferenceConfig;
use crate::error::{Result, TubelensError};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ResponseFormat,
    ResponseFormatJsonSchema,
};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};

/// Chat-completions client requesting strict JSON-schema output.
pub struct OpenAIInference {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl OpenAIInference {
    pub fn new(config: &InferenceConfig) -> Result<Self> {
        Ok(Self {
            client: create_client(config)?,
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    /// Parse the assistant message content as JSON.
    fn parse_content(content: &str) -> Result<Value> {
        serde_json::from_str(content.trim()).map_err(|e| {
            TubelensError::InferenceFailure(format!(
                "Model returned invalid JSON: {}. Response was: {}",
                e,
                crate::transcript::truncate_chars(content, 300)
            ))
        })
    }
}

fn build_error(e: impl std::fmt::Display) -> TubelensError {
    TubelensError::InferenceFailure(format!("Failed to build request: {}", e))
}

#[async_trait]
impl StructuredInference for OpenAIInference {
    #[instrument(skip(self, request), fields(model = %self.model, schema = %request.schema_name))]
    async fn infer(&self, request: &InferenceRequest) -> Result<Value> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(request.system.clone())
                .build()
                .map_err(build_error)?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(request.user.clone())
                .build()
                .map_err(build_error)?
                .into(),
        ];

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .response_format(ResponseFormat::JsonSchema {
                json_schema: ResponseFormatJsonSchema {
                    description: None,
                    name: request.schema_name.clone(),
                    schema: Some(request.schema.clone()),
                    strict: Some(true),
                },
            })
            .build()
            .map_err(build_error)?;

        let response = self.client.chat().create(chat_request).await.map_err(|e| {
            TubelensError::InferenceFailure(format!("OpenAI API error: {}", e))
        })?;

        let message = response
            .choices
            .first()
            .map(|c| &c.message)
            .ok_or_else(|| TubelensError::InferenceFailure("Empty response from LLM".to_string()))?;

        if let Some(refusal) = &message.refusal {
            return Err(TubelensError::InferenceFailure(format!(
                "Model refused the request: {}",
                refusal
            )));
        }

        let content = message
            .content
            .as_ref()
            .ok_or_else(|| TubelensError::InferenceFailure("Empty response from LLM".to_string()))?;

        debug!(
            "Structured response: {}",
            crate::transcript::truncate_chars(content, 500)
        );

        Self::parse_content(content)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_content() {
        let value = OpenAIInference::parse_content(" {\"title\": \"x\"}\n").unwrap();
        assert_eq!(value["title"], "x");

        let err = OpenAIInference::parse_content("Sure! Here is the JSON").unwrap_err();
        assert!(matches!(err, TubelensError::InferenceFailure(_)));
    }

    #[test]
    fn test_new_requires_no_network() {
        let config = InferenceConfig {
            api_key: "sk-test".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.0,
            timeout: std::time::Duration::from_secs(5),
            base_url: Some("http://localhost:9".to_string()),
        };
        let inference = OpenAIInference::new(&config).unwrap();
        assert_eq!(inference.model(), "gpt-4o-mini");
    }
}
