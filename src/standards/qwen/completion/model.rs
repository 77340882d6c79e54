//! Qwen legacy completion language model (`/completions`).

use super::api::{QwenCompletionChunk, QwenCompletionRequest, QwenCompletionResponse};
use super::prompt::convert_to_qwen_completion_prompt;
use super::stream::CompletionStreamState;
use super::usage::convert_qwen_completion_usage;
use crate::error::LlmError;
use crate::execution::http::post::{
    ApiResponse, EventStreamResponse, post_json_to_api, post_json_to_event_stream,
};
use crate::providers::qwen::QwenConfig;
use crate::standards::qwen::chat::api::QwenChatStreamOptions;
use crate::standards::qwen::error::qwen_failed_response;
use crate::standards::qwen::finish_reason::qwen_finish_reason;
use crate::standards::qwen::response_metadata::get_response_metadata;
use crate::streaming::{decode_event_stream, transform_stream};
use crate::traits::LanguageModelV3;
use crate::types::{
    LanguageModelV3CallOptions, LanguageModelV3Content, LanguageModelV3GenerateResult,
    LanguageModelV3RequestInfo, LanguageModelV3ResponseFormat, LanguageModelV3ResponseInfo,
    LanguageModelV3StreamResponseInfo, LanguageModelV3StreamResult, SharedV3Warning,
    qwen_provider_metadata,
};
use async_trait::async_trait;

const COMPLETIONS_PATH: &str = "/completions";

#[derive(Debug, Clone)]
pub struct QwenCompletionLanguageModel {
    model_id: String,
    config: QwenConfig,
}

impl QwenCompletionLanguageModel {
    pub fn new(model_id: impl Into<String>, config: QwenConfig) -> Self {
        Self {
            model_id: model_id.into(),
            config,
        }
    }

    pub fn get_args(
        &self,
        options: &LanguageModelV3CallOptions,
    ) -> Result<(QwenCompletionRequest, Vec<SharedV3Warning>), LlmError> {
        let mut warnings = Vec::new();

        if options.top_k.is_some() {
            warnings.push(SharedV3Warning::unsupported("topK"));
        }
        if options.tools.as_ref().is_some_and(|t| !t.is_empty()) {
            warnings.push(SharedV3Warning::unsupported("tools"));
        }
        if options.tool_choice.is_some() {
            warnings.push(SharedV3Warning::unsupported("toolChoice"));
        }
        if matches!(
            options.response_format,
            Some(LanguageModelV3ResponseFormat::Json { .. })
        ) {
            warnings.push(SharedV3Warning::unsupported_with_details(
                "responseFormat",
                "JSON response format is not supported.",
            ));
        }

        let converted = convert_to_qwen_completion_prompt(&options.prompt)?;
        let stop: Vec<String> = converted
            .stop_sequences
            .into_iter()
            .chain(options.stop_sequences.iter().flatten().cloned())
            .collect();

        let request = QwenCompletionRequest {
            model: self.model_id.clone(),
            prompt: converted.prompt,
            stream: None,
            stream_options: None,
            max_tokens: options.max_output_tokens,
            temperature: options.temperature,
            stop: (!stop.is_empty()).then_some(stop),
            top_p: options.top_p,
            presence_penalty: options.presence_penalty,
            seed: options.seed,
        };

        Ok((request, warnings))
    }
}

#[async_trait]
impl LanguageModelV3 for QwenCompletionLanguageModel {
    fn provider(&self) -> &str {
        &self.config.provider
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn do_generate(
        &self,
        options: LanguageModelV3CallOptions,
    ) -> Result<LanguageModelV3GenerateResult, LlmError> {
        let (request, warnings) = self.get_args(&options)?;
        let body = serde_json::to_value(&request)?;
        let headers = self.config.headers(options.headers.as_ref())?;

        tracing::debug!(model = %self.model_id, "qwen completion generate");
        let ApiResponse {
            headers: response_headers,
            value: response,
            raw_value,
        } = post_json_to_api::<QwenCompletionResponse>(
            &self.config.http_client,
            &self.config.url(COMPLETIONS_PATH),
            headers,
            &body,
            qwen_failed_response,
            options.abort_signal.as_ref(),
        )
        .await?;

        let metadata = get_response_metadata(
            response.id.as_deref(),
            response.created,
            response.model.as_deref(),
        );
        let usage = convert_qwen_completion_usage(response.usage.as_ref());
        let Some(choice) = response.choices.into_iter().next() else {
            return Err(LlmError::invalid_response_data(
                "Expected at least one choice.",
                raw_value,
            ));
        };

        Ok(LanguageModelV3GenerateResult {
            content: vec![LanguageModelV3Content::Text { text: choice.text }],
            finish_reason: qwen_finish_reason(choice.finish_reason.as_deref()),
            usage,
            request: LanguageModelV3RequestInfo { body: Some(body) },
            response: LanguageModelV3ResponseInfo {
                metadata,
                headers: Some(response_headers),
                body: Some(raw_value),
            },
            warnings,
            provider_metadata: Some(qwen_provider_metadata()),
        })
    }

    async fn do_stream(
        &self,
        options: LanguageModelV3CallOptions,
    ) -> Result<LanguageModelV3StreamResult, LlmError> {
        let (mut request, warnings) = self.get_args(&options)?;
        request.stream = Some(true);
        request.stream_options = Some(QwenChatStreamOptions {
            include_usage: true,
        });
        let body = serde_json::to_value(&request)?;
        let headers = self.config.headers(options.headers.as_ref())?;

        tracing::debug!(model = %self.model_id, "qwen completion stream");
        let EventStreamResponse {
            headers: response_headers,
            response,
        } = post_json_to_event_stream(
            &self.config.http_client,
            &self.config.url(COMPLETIONS_PATH),
            headers,
            &body,
            qwen_failed_response,
            options.abort_signal.as_ref(),
        )
        .await?;

        let chunks = decode_event_stream::<QwenCompletionChunk, _, _, _>(
            response.bytes_stream(),
            options.abort_signal.clone(),
        );

        Ok(LanguageModelV3StreamResult {
            stream: transform_stream(
                chunks,
                warnings,
                CompletionStreamState::new(options.include_raw_chunks),
            ),
            request: LanguageModelV3RequestInfo { body: Some(body) },
            response: LanguageModelV3StreamResponseInfo {
                headers: Some(response_headers),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streaming::default_id_generator;
    use crate::types::{LanguageModelV3Message, LanguageModelV3Tool, LanguageModelV3ToolChoice};
    use secrecy::SecretString;
    use serde_json::json;
    use std::collections::HashMap;

    fn model() -> QwenCompletionLanguageModel {
        QwenCompletionLanguageModel::new(
            "qwen-coder-turbo",
            QwenConfig {
                provider: "qwen.completion".to_string(),
                base_url: "http://localhost".to_string(),
                api_key: Some(SecretString::from("k".to_string())),
                headers: HashMap::new(),
                http_client: reqwest::Client::new(),
                generate_id: default_id_generator(),
            },
        )
    }

    #[test]
    fn warns_on_unsupported_settings() {
        let mut options = LanguageModelV3CallOptions::new(vec![LanguageModelV3Message::user("hi")])
            .with_tools(vec![LanguageModelV3Tool::function("t", "d", json!({}))])
            .with_tool_choice(LanguageModelV3ToolChoice::Auto);
        options.top_k = Some(3);
        options.response_format = Some(LanguageModelV3ResponseFormat::Json {
            schema: None,
            name: None,
            description: None,
        });

        let (_, warnings) = model().get_args(&options).unwrap();
        assert_eq!(
            warnings,
            vec![
                SharedV3Warning::unsupported("topK"),
                SharedV3Warning::unsupported("tools"),
                SharedV3Warning::unsupported("toolChoice"),
                SharedV3Warning::unsupported_with_details(
                    "responseFormat",
                    "JSON response format is not supported."
                ),
            ]
        );
    }

    #[test]
    fn merges_stop_sequences() {
        let mut options = LanguageModelV3CallOptions::new(vec![LanguageModelV3Message::user("hi")]);
        options.stop_sequences = Some(vec!["###".to_string()]);
        options.max_output_tokens = Some(64);

        let (request, warnings) = model().get_args(&options).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({
                "model": "qwen-coder-turbo",
                "prompt": "user:\nhi\n\nassistant:\n",
                "max_tokens": 64,
                "stop": ["\nuser:", "###"]
            })
        );
    }
}
