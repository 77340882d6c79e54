//! Per-call options for language, embedding and image models.

use crate::types::{LanguageModelV3Prompt, LanguageModelV3Tool, LanguageModelV3ToolChoice};
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;

/// Provider-specific options keyed by provider name (e.g. `"qwen"`).
pub type SharedV3ProviderOptions = serde_json::Map<String, serde_json::Value>;

/// Desired output format.
#[derive(Debug, Clone, PartialEq)]
pub enum LanguageModelV3ResponseFormat {
    Text,
    Json {
        schema: Option<serde_json::Value>,
        name: Option<String>,
        description: Option<String>,
    },
}

/// Options for `do_generate` / `do_stream`.
#[derive(Debug, Clone, Default)]
pub struct LanguageModelV3CallOptions {
    pub prompt: LanguageModelV3Prompt,
    pub max_output_tokens: Option<u32>,
    pub temperature: Option<f64>,
    pub stop_sequences: Option<Vec<String>>,
    pub top_p: Option<f64>,
    pub top_k: Option<u32>,
    pub presence_penalty: Option<f64>,
    pub frequency_penalty: Option<f64>,
    pub response_format: Option<LanguageModelV3ResponseFormat>,
    pub seed: Option<u64>,
    pub tools: Option<Vec<LanguageModelV3Tool>>,
    pub tool_choice: Option<LanguageModelV3ToolChoice>,
    /// Re-emit every decoded chunk as a `raw` stream part.
    pub include_raw_chunks: bool,
    /// Extra headers merged over the provider headers.
    pub headers: Option<HashMap<String, String>>,
    /// Cancelling the token aborts the request or ends the stream early.
    pub abort_signal: Option<CancellationToken>,
    pub provider_options: Option<SharedV3ProviderOptions>,
}

impl LanguageModelV3CallOptions {
    pub fn new(prompt: LanguageModelV3Prompt) -> Self {
        Self {
            prompt,
            ..Default::default()
        }
    }

    pub fn with_tools(mut self, tools: Vec<LanguageModelV3Tool>) -> Self {
        self.tools = Some(tools);
        self
    }

    pub fn with_tool_choice(mut self, choice: LanguageModelV3ToolChoice) -> Self {
        self.tool_choice = Some(choice);
        self
    }

    pub fn with_include_raw_chunks(mut self, include: bool) -> Self {
        self.include_raw_chunks = include;
        self
    }

    pub fn with_abort_signal(mut self, token: CancellationToken) -> Self {
        self.abort_signal = Some(token);
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Options for `EmbeddingModelV3::do_embed`.
#[derive(Debug, Clone, Default)]
pub struct EmbeddingModelV3CallOptions {
    pub values: Vec<String>,
    pub headers: Option<HashMap<String, String>>,
    pub abort_signal: Option<CancellationToken>,
    pub provider_options: Option<SharedV3ProviderOptions>,
}

impl EmbeddingModelV3CallOptions {
    pub fn new(values: Vec<String>) -> Self {
        Self {
            values,
            ..Default::default()
        }
    }
}

/// Options for `ImageModelV3::do_generate`.
#[derive(Debug, Clone)]
pub struct ImageModelV3CallOptions {
    pub prompt: Option<String>,
    pub n: u32,
    /// `{width}x{height}`.
    pub size: Option<String>,
    /// `{width}:{height}`.
    pub aspect_ratio: Option<String>,
    pub seed: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
    pub abort_signal: Option<CancellationToken>,
    pub provider_options: Option<SharedV3ProviderOptions>,
}

impl ImageModelV3CallOptions {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
            n: 1,
            size: None,
            aspect_ratio: None,
            seed: None,
            headers: None,
            abort_signal: None,
            provider_options: None,
        }
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }
}
