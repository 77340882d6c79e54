//! Qwen image generation through the native DashScope API.

use super::api::{
    QwenImageContent, QwenImageInput, QwenImageMessage, QwenImageParameters, QwenImageRequest,
    QwenImageResponse, QwenImageRole, QwenImageSize, qwen_image_failed_response,
};
use crate::error::LlmError;
use crate::execution::http::post::{ApiResponse, get_bytes, post_json_to_api};
use crate::providers::qwen::QwenConfig;
use crate::traits::ImageModelV3;
use crate::types::{
    ImageModelV3CallOptions, ImageModelV3ResponseInfo, ImageModelV3Result, SharedV3Warning,
};
use async_trait::async_trait;

const GENERATION_PATH: &str = "/services/aigc/multimodal-generation/generation";

#[derive(Debug, Clone)]
pub struct QwenImageModel {
    model_id: String,
    config: QwenConfig,
}

impl QwenImageModel {
    /// `config.base_url` must point at the native API prefix, not the compatible-mode one.
    pub fn new(model_id: impl Into<String>, config: QwenConfig) -> Self {
        Self {
            model_id: model_id.into(),
            config,
        }
    }

    pub fn get_args(
        &self,
        options: &ImageModelV3CallOptions,
    ) -> (QwenImageRequest, Vec<SharedV3Warning>) {
        let mut warnings = Vec::new();
        if options.aspect_ratio.is_some() {
            warnings.push(SharedV3Warning::unsupported_with_details(
                "aspectRatio",
                "This model does not support aspect ratio. Use `size` instead.",
            ));
        }
        if options.seed.is_some() {
            warnings.push(SharedV3Warning::unsupported("seed"));
        }

        let request = QwenImageRequest {
            model: self.model_id.clone(),
            input: QwenImageInput {
                messages: vec![QwenImageMessage {
                    role: QwenImageRole::User,
                    content: vec![QwenImageContent::Text {
                        text: options.prompt.clone().unwrap_or_default(),
                    }],
                }],
            },
            parameters: Some(QwenImageParameters {
                size: options.size.as_deref().map(QwenImageSize::from_size),
                n: Some(options.n),
                watermark: Some(false),
                seed: options.seed,
                ..Default::default()
            }),
        };
        (request, warnings)
    }
}

#[async_trait]
impl ImageModelV3 for QwenImageModel {
    fn provider(&self) -> &str {
        &self.config.provider
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn max_images_per_call(&self) -> Option<u32> {
        Some(1)
    }

    async fn do_generate(
        &self,
        options: ImageModelV3CallOptions,
    ) -> Result<ImageModelV3Result, LlmError> {
        let (request, warnings) = self.get_args(&options);
        let body = serde_json::to_value(&request)?;
        let headers = self.config.headers(options.headers.as_ref())?;

        tracing::debug!(model = %self.model_id, "qwen image generate");
        let ApiResponse {
            headers: response_headers,
            value: response,
            ..
        } = post_json_to_api::<QwenImageResponse>(
            &self.config.http_client,
            &self.config.url(GENERATION_PATH),
            headers,
            &body,
            qwen_image_failed_response,
            options.abort_signal.as_ref(),
        )
        .await?;

        let mut images = Vec::new();
        for url in response
            .output
            .choices
            .iter()
            .flat_map(|c| c.message.content.iter())
            .filter_map(|c| c.image.as_deref())
        {
            images.push(get_bytes(&self.config.http_client, url, options.abort_signal.as_ref()).await?);
        }

        Ok(ImageModelV3Result {
            images,
            warnings,
            response: ImageModelV3ResponseInfo {
                timestamp: chrono::Utc::now(),
                model_id: self.model_id.clone(),
                headers: Some(response_headers),
            },
        })
    }
}
