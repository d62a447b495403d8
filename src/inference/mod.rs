//! Structured inference against a hosted language model.
//!
//! A request carries prompts plus the JSON schema the reply must follow.
//! Implementations return the raw JSON; `schema` turns it into typed drafts.

mod openai;
pub mod schema;

pub use openai::OpenAIInference;
pub use schema::{AnalysisDraft, DraftMoment, MetadataDraft};

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// A single structured-output call.
#[derive(Debug, Clone)]
pub struct InferenceRequest {
    /// Schema name reported to the provider.
    pub schema_name: String,
    /// JSON schema the reply must conform to.
    pub schema: Value,
    pub system: String,
    pub user: String,
}

/// Structured-inference capability.
#[async_trait]
pub trait StructuredInference: Send + Sync {
    /// Run the request and return the model's JSON reply.
    ///
    /// Provider errors, refusals and non-JSON replies fail with
    /// `InferenceFailure`.
    async fn infer(&self, request: &InferenceRequest) -> Result<Value>;

    /// Model identifier, for logging.
    fn model(&self) -> &str;
}
