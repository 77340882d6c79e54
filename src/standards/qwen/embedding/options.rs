//! `providerOptions.qwen` for embedding calls.

use crate::error::LlmError;
use crate::types::SharedV3ProviderOptions;
use serde::Deserialize;

/// Provider key under which Qwen-specific options are read.
pub const PROVIDER_OPTIONS_KEY: &str = "qwen";

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QwenEmbeddingProviderOptions {
    /// Number of dimensions of the output embeddings.
    #[serde(default)]
    pub dimensions: Option<u32>,
}

impl QwenEmbeddingProviderOptions {
    /// Read the `qwen` entry; a missing entry yields the defaults.
    pub fn parse(provider_options: Option<&SharedV3ProviderOptions>) -> Result<Self, LlmError> {
        match provider_options.and_then(|o| o.get(PROVIDER_OPTIONS_KEY)) {
            None => Ok(Self::default()),
            Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
                LlmError::InvalidParameter(format!("invalid qwen provider options: {e}"))
            }),
        }
    }
}
