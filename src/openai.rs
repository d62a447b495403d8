//! OpenAI client construction from an explicit inference configuration.

use crate::config::InferenceConfig;
use crate::error::Result;
use async_openai::{config::OpenAIConfig, Client};

/// Create an OpenAI client with the configured key, base URL and timeout.
pub fn create_client(config: &InferenceConfig) -> Result<Client<OpenAIConfig>> {
    let http_client = reqwest::Client::builder().timeout(config.timeout).build()?;

    let mut openai_config = OpenAIConfig::new().with_api_key(config.api_key.clone());
    if let Some(base) = &config.base_url {
        openai_config = openai_config.with_api_base(base.clone());
    }

    Ok(Client::with_config(openai_config).with_http_client(http_client))
}
