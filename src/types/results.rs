//! Results returned by model calls.

use crate::error::LlmError;
use crate::types::{
    LanguageModelV3FinishReason, LanguageModelV3ResponseMetadata, LanguageModelV3StreamPart,
    LanguageModelV3ToolCall, LanguageModelV3Usage, SharedV3ProviderMetadata, SharedV3Warning,
};
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::pin::Pin;

/// Response headers flattened to string pairs.
pub type ResponseHeaders = HashMap<String, String>;

/// Stream of normalized parts produced by `do_stream`.
pub type LanguageModelV3PartStream =
    Pin<Box<dyn Stream<Item = Result<LanguageModelV3StreamPart, LlmError>> + Send>>;

/// Generated content, in emission order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum LanguageModelV3Content {
    Text { text: String },
    Reasoning { text: String },
    ToolCall(LanguageModelV3ToolCall),
}

/// What was sent to the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LanguageModelV3RequestInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

/// What came back from the API (non-streaming).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LanguageModelV3ResponseInfo {
    #[serde(flatten)]
    pub metadata: LanguageModelV3ResponseMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<ResponseHeaders>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LanguageModelV3GenerateResult {
    pub content: Vec<LanguageModelV3Content>,
    pub finish_reason: LanguageModelV3FinishReason,
    pub usage: LanguageModelV3Usage,
    pub request: LanguageModelV3RequestInfo,
    pub response: LanguageModelV3ResponseInfo,
    pub warnings: Vec<SharedV3Warning>,
    pub provider_metadata: Option<SharedV3ProviderMetadata>,
}

impl LanguageModelV3GenerateResult {
    /// Concatenated text content.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|c| match c {
                LanguageModelV3Content::Text { text } => Some(text.as_str()),
                LanguageModelV3Content::Reasoning { .. } | LanguageModelV3Content::ToolCall(_) => {
                    None
                }
            })
            .collect()
    }
}

/// Side-channel metadata of a streaming call, available once per call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LanguageModelV3StreamResponseInfo {
    pub headers: Option<ResponseHeaders>,
}

pub struct LanguageModelV3StreamResult {
    pub stream: LanguageModelV3PartStream,
    pub request: LanguageModelV3RequestInfo,
    pub response: LanguageModelV3StreamResponseInfo,
}

impl std::fmt::Debug for LanguageModelV3StreamResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageModelV3StreamResult")
            .field("request", &self.request)
            .field("response", &self.response)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmbeddingModelV3Usage {
    pub tokens: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbeddingModelV3ResponseInfo {
    pub headers: Option<ResponseHeaders>,
    pub body: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingModelV3Result {
    pub embeddings: Vec<Vec<f64>>,
    pub usage: Option<EmbeddingModelV3Usage>,
    pub warnings: Vec<SharedV3Warning>,
    pub response: EmbeddingModelV3ResponseInfo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageModelV3ResponseInfo {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub model_id: String,
    pub headers: Option<ResponseHeaders>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageModelV3Result {
    /// Decoded image bytes, one entry per generated image.
    pub images: Vec<Vec<u8>>,
    pub warnings: Vec<SharedV3Warning>,
    pub response: ImageModelV3ResponseInfo,
}
