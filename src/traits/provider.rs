//! Provider trait: model factory by id

use crate::error::LlmError;
use crate::traits::{EmbeddingModelV3, ImageModelV3, LanguageModelV3};
use std::sync::Arc;

pub trait ProviderV3: Send + Sync {
    fn specification_version(&self) -> &'static str {
        "v3"
    }

    fn language_model(&self, model_id: &str) -> Result<Arc<dyn LanguageModelV3>, LlmError>;

    fn embedding_model(&self, model_id: &str) -> Result<Arc<dyn EmbeddingModelV3>, LlmError>;

    fn image_model(&self, model_id: &str) -> Result<Arc<dyn ImageModelV3>, LlmError>;
}
