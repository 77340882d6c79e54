//! Language model trait

use crate::error::LlmError;
use crate::types::{
    LanguageModelV3CallOptions, LanguageModelV3GenerateResult, LanguageModelV3StreamResult,
};
use async_trait::async_trait;
use std::collections::HashMap;

/// A text generation model (chat or legacy completion).
#[async_trait]
pub trait LanguageModelV3: Send + Sync {
    fn specification_version(&self) -> &'static str {
        "v3"
    }

    /// Provider id, e.g. `qwen.chat`.
    fn provider(&self) -> &str;

    fn model_id(&self) -> &str;

    /// URL patterns (regex source) per media type glob that the model can fetch itself.
    ///
    /// Files matching a pattern are passed through as URLs instead of being downloaded.
    fn supported_urls(&self) -> HashMap<String, Vec<String>> {
        HashMap::new()
    }

    async fn do_generate(
        &self,
        options: LanguageModelV3CallOptions,
    ) -> Result<LanguageModelV3GenerateResult, LlmError>;

    async fn do_stream(
        &self,
        options: LanguageModelV3CallOptions,
    ) -> Result<LanguageModelV3StreamResult, LlmError>;
}
