//! Embedding model trait

use crate::error::LlmError;
use crate::types::{EmbeddingModelV3CallOptions, EmbeddingModelV3Result};
use async_trait::async_trait;

#[async_trait]
pub trait EmbeddingModelV3: Send + Sync {
    fn specification_version(&self) -> &'static str {
        "v3"
    }

    fn provider(&self) -> &str;

    fn model_id(&self) -> &str;

    /// Upper bound on values per `do_embed` call; `None` means unlimited.
    fn max_embeddings_per_call(&self) -> Option<usize>;

    fn supports_parallel_calls(&self) -> bool;

    async fn do_embed(
        &self,
        options: EmbeddingModelV3CallOptions,
    ) -> Result<EmbeddingModelV3Result, LlmError>;
}
