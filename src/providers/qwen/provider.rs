//! Qwen provider: model factory over shared settings.

use super::config::QwenConfig;
use super::settings::{
    DEFAULT_BASE_URL, DEFAULT_IMAGE_BASE_URL, QwenProviderSettings, without_trailing_slash,
};
use crate::error::LlmError;
use crate::standards::qwen::{
    QwenChatLanguageModel, QwenCompletionLanguageModel, QwenEmbeddingModel, QwenImageModel,
};
use crate::streaming::{IdGenerator, default_id_generator};
use crate::traits::{EmbeddingModelV3, ImageModelV3, LanguageModelV3, ProviderV3};
use secrecy::SecretString;
use std::collections::HashMap;
use std::sync::Arc;

/// Creates Qwen models that share one HTTP client and one set of credentials.
#[derive(Clone)]
pub struct QwenProvider {
    base_url: String,
    image_base_url: String,
    api_key: Option<SecretString>,
    headers: HashMap<String, String>,
    http_client: reqwest::Client,
    generate_id: IdGenerator,
}

/// Build a provider from settings.
///
/// Fails only when no client is supplied and the default HTTP client
/// cannot be built; a missing API key surfaces on the first request.
pub fn create_qwen(settings: QwenProviderSettings) -> Result<QwenProvider, LlmError> {
    let http_client = match settings.http_client {
        Some(client) => client,
        None => reqwest::Client::builder()
            .build()
            .map_err(|e| LlmError::ConfigurationError(format!("failed to build HTTP client: {e}")))?,
    };

    let base_url = without_trailing_slash(settings.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL));
    let image_base_url = without_trailing_slash(
        settings
            .image_base_url
            .as_deref()
            .unwrap_or(DEFAULT_IMAGE_BASE_URL),
    );
    tracing::debug!(%base_url, %image_base_url, "creating qwen provider");

    Ok(QwenProvider {
        base_url,
        image_base_url,
        api_key: settings.api_key,
        headers: settings.headers,
        http_client,
        generate_id: settings.id_generator.unwrap_or_else(default_id_generator),
    })
}

impl QwenProvider {
    fn config(&self, provider: &str, base_url: &str) -> QwenConfig {
        QwenConfig {
            provider: provider.to_string(),
            base_url: base_url.to_string(),
            api_key: self.api_key.clone(),
            headers: self.headers.clone(),
            http_client: self.http_client.clone(),
            generate_id: self.generate_id.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn image_base_url(&self) -> &str {
        &self.image_base_url
    }

    /// Chat model (`qwen.chat`).
    pub fn chat(&self, model_id: &str) -> QwenChatLanguageModel {
        QwenChatLanguageModel::new(model_id, self.config("qwen.chat", &self.base_url))
    }

    /// Same as [`chat`](Self::chat).
    pub fn language_model(&self, model_id: &str) -> QwenChatLanguageModel {
        self.chat(model_id)
    }

    /// Legacy completion model (`qwen.completion`).
    pub fn completion(&self, model_id: &str) -> QwenCompletionLanguageModel {
        QwenCompletionLanguageModel::new(model_id, self.config("qwen.completion", &self.base_url))
    }

    /// Text embedding model (`qwen.embedding`).
    pub fn embedding(&self, model_id: &str) -> QwenEmbeddingModel {
        QwenEmbeddingModel::new(model_id, self.config("qwen.embedding", &self.base_url))
    }

    /// Same as [`embedding`](Self::embedding).
    pub fn text_embedding(&self, model_id: &str) -> QwenEmbeddingModel {
        self.embedding(model_id)
    }

    /// Image model (`qwen.image`), served from the native API prefix.
    pub fn image(&self, model_id: &str) -> QwenImageModel {
        QwenImageModel::new(model_id, self.config("qwen.image", &self.image_base_url))
    }
}

impl ProviderV3 for QwenProvider {
    fn language_model(&self, model_id: &str) -> Result<Arc<dyn LanguageModelV3>, LlmError> {
        Ok(Arc::new(self.chat(model_id)))
    }

    fn embedding_model(&self, model_id: &str) -> Result<Arc<dyn EmbeddingModelV3>, LlmError> {
        Ok(Arc::new(self.embedding(model_id)))
    }

    fn image_model(&self, model_id: &str) -> Result<Arc<dyn ImageModelV3>, LlmError> {
        Ok(Arc::new(self.image(model_id)))
    }
}

impl std::fmt::Debug for QwenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QwenProvider")
            .field("base_url", &self.base_url)
            .field("image_base_url", &self.image_base_url)
            .field("has_api_key", &self.api_key.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> QwenProvider {
        create_qwen(
            QwenProviderSettings::new()
                .api_key("sk-test")
                .base_url("https://proxy.example.com/v1//")
                .image_base_url("https://proxy.example.com/api/v1/"),
        )
        .unwrap()
    }

    #[test]
    fn strips_trailing_slashes() {
        let p = provider();
        assert_eq!(p.base_url(), "https://proxy.example.com/v1");
        assert_eq!(p.image_base_url(), "https://proxy.example.com/api/v1");
    }

    #[test]
    fn defaults_urls() {
        let p = create_qwen(QwenProviderSettings::new()).unwrap();
        assert_eq!(p.base_url(), DEFAULT_BASE_URL);
        assert_eq!(p.image_base_url(), DEFAULT_IMAGE_BASE_URL);
    }

    #[test]
    fn models_carry_provider_ids() {
        let p = provider();
        assert_eq!(LanguageModelV3::provider(&p.chat("qwen-plus")), "qwen.chat");
        assert_eq!(
            LanguageModelV3::provider(&p.language_model("qwen-plus")),
            "qwen.chat"
        );
        assert_eq!(
            LanguageModelV3::provider(&p.completion("qwen-coder-turbo")),
            "qwen.completion"
        );
        assert_eq!(
            EmbeddingModelV3::provider(&p.text_embedding("text-embedding-v4")),
            "qwen.embedding"
        );
        assert_eq!(ImageModelV3::provider(&p.image("qwen-image")), "qwen.image");
    }

    #[test]
    fn provider_trait_returns_shared_models() {
        let p = provider();
        let lm = ProviderV3::language_model(&p, "qwen-max").unwrap();
        assert_eq!(lm.model_id(), "qwen-max");
        let em = p.embedding_model("text-embedding-v3").unwrap();
        assert_eq!(em.max_embeddings_per_call(), Some(2048));
        let im = p.image_model("qwen-image-plus").unwrap();
        assert_eq!(im.max_images_per_call(), Some(1));
        assert_eq!(p.specification_version(), "v3");
    }

    #[test]
    fn debug_hides_api_key() {
        assert!(!format!("{:?}", provider()).contains("sk-test"));
    }
}
