//! Qwen text embedding model (`/embeddings`).

use super::api::{QwenEmbeddingRequest, QwenEmbeddingResponse, QwenEncodingFormat};
use super::options::QwenEmbeddingProviderOptions;
use crate::error::LlmError;
use crate::execution::http::post::{ApiResponse, post_json_to_api};
use crate::providers::qwen::QwenConfig;
use crate::standards::qwen::error::qwen_failed_response;
use crate::traits::EmbeddingModelV3;
use crate::types::{
    EmbeddingModelV3CallOptions, EmbeddingModelV3ResponseInfo, EmbeddingModelV3Result,
    EmbeddingModelV3Usage,
};
use async_trait::async_trait;

const EMBEDDINGS_PATH: &str = "/embeddings";
const MAX_EMBEDDINGS_PER_CALL: usize = 2048;

#[derive(Debug, Clone)]
pub struct QwenEmbeddingModel {
    model_id: String,
    config: QwenConfig,
}

impl QwenEmbeddingModel {
    pub fn new(model_id: impl Into<String>, config: QwenConfig) -> Self {
        Self {
            model_id: model_id.into(),
            config,
        }
    }
}

#[async_trait]
impl EmbeddingModelV3 for QwenEmbeddingModel {
    fn provider(&self) -> &str {
        &self.config.provider
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn max_embeddings_per_call(&self) -> Option<usize> {
        Some(MAX_EMBEDDINGS_PER_CALL)
    }

    fn supports_parallel_calls(&self) -> bool {
        true
    }

    async fn do_embed(
        &self,
        options: EmbeddingModelV3CallOptions,
    ) -> Result<EmbeddingModelV3Result, LlmError> {
        if options.values.len() > MAX_EMBEDDINGS_PER_CALL {
            return Err(LlmError::TooManyEmbeddingValues {
                provider: self.config.provider.clone(),
                model_id: self.model_id.clone(),
                max_embeddings_per_call: MAX_EMBEDDINGS_PER_CALL,
                values: options.values.len(),
            });
        }

        let qwen_options = QwenEmbeddingProviderOptions::parse(options.provider_options.as_ref())?;
        let request = QwenEmbeddingRequest {
            model: self.model_id.clone(),
            input: options.values,
            encoding_format: QwenEncodingFormat::Float,
            dimensions: qwen_options.dimensions,
        };
        let body = serde_json::to_value(&request)?;
        let headers = self.config.headers(options.headers.as_ref())?;

        tracing::debug!(model = %self.model_id, values = request.input.len(), "qwen embed");
        let ApiResponse {
            headers: response_headers,
            value: response,
            raw_value,
        } = post_json_to_api::<QwenEmbeddingResponse>(
            &self.config.http_client,
            &self.config.url(EMBEDDINGS_PATH),
            headers,
            &body,
            qwen_failed_response,
            options.abort_signal.as_ref(),
        )
        .await?;

        Ok(EmbeddingModelV3Result {
            embeddings: response.data.into_iter().map(|d| d.embedding).collect(),
            usage: response.usage.map(|u| EmbeddingModelV3Usage {
                tokens: u.prompt_tokens,
            }),
            warnings: Vec::new(),
            response: EmbeddingModelV3ResponseInfo {
                headers: Some(response_headers),
                body: Some(raw_value),
            },
        })
    }
}
