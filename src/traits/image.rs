//! Image generation model trait

use crate::error::LlmError;
use crate::types::{ImageModelV3CallOptions, ImageModelV3Result};
use async_trait::async_trait;

#[async_trait]
pub trait ImageModelV3: Send + Sync {
    fn specification_version(&self) -> &'static str {
        "v3"
    }

    fn provider(&self) -> &str;

    fn model_id(&self) -> &str;

    /// Upper bound on images per `do_generate` call.
    fn max_images_per_call(&self) -> Option<u32>;

    async fn do_generate(
        &self,
        options: ImageModelV3CallOptions,
    ) -> Result<ImageModelV3Result, LlmError>;
}
