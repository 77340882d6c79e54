//! Qwen chat language model (`/chat/completions`).

use super::api::{
    QwenChatChunk, QwenChatRequest, QwenChatResponse, QwenChatResponseFormat,
    QwenChatStreamOptions, QwenJsonSchema,
};
use super::messages::convert_to_qwen_chat_messages;
use super::stream::ChatStreamState;
use super::tools::prepare_chat_tools;
use super::usage::convert_qwen_chat_usage;
use crate::error::LlmError;
use crate::execution::http::post::{
    ApiResponse, EventStreamResponse, post_json_to_api, post_json_to_event_stream,
};
use crate::providers::qwen::QwenConfig;
use crate::standards::qwen::error::qwen_failed_response;
use crate::standards::qwen::finish_reason::qwen_finish_reason;
use crate::standards::qwen::response_metadata::get_response_metadata;
use crate::streaming::{decode_event_stream, transform_stream};
use crate::traits::LanguageModelV3;
use crate::types::{
    LanguageModelV3CallOptions, LanguageModelV3Content, LanguageModelV3GenerateResult,
    LanguageModelV3RequestInfo, LanguageModelV3ResponseFormat, LanguageModelV3ResponseInfo,
    LanguageModelV3StreamResponseInfo, LanguageModelV3StreamResult, LanguageModelV3ToolCall,
    SharedV3Warning, qwen_provider_metadata,
};
use async_trait::async_trait;
use std::collections::HashMap;

const CHAT_PATH: &str = "/chat/completions";

#[derive(Debug, Clone)]
pub struct QwenChatLanguageModel {
    model_id: String,
    config: QwenConfig,
}

impl QwenChatLanguageModel {
    pub fn new(model_id: impl Into<String>, config: QwenConfig) -> Self {
        Self {
            model_id: model_id.into(),
            config,
        }
    }

    /// Build the request body and collect call warnings.
    pub fn get_args(
        &self,
        options: &LanguageModelV3CallOptions,
    ) -> Result<(QwenChatRequest, Vec<SharedV3Warning>), LlmError> {
        let converted = convert_to_qwen_chat_messages(&options.prompt)?;
        let mut warnings = converted.warnings;

        let response_format = match &options.response_format {
            Some(LanguageModelV3ResponseFormat::Json {
                schema: Some(schema),
                name,
                description,
            }) => Some(QwenChatResponseFormat::JsonSchema {
                json_schema: QwenJsonSchema {
                    name: Some(name.clone().unwrap_or_else(|| "response".to_string())),
                    description: description.clone(),
                    schema: Some(schema.clone()),
                },
            }),
            Some(LanguageModelV3ResponseFormat::Json { schema: None, .. }) => {
                Some(QwenChatResponseFormat::JsonObject)
            }
            Some(LanguageModelV3ResponseFormat::Text) | None => None,
        };

        let prepared = prepare_chat_tools(options.tools.as_deref(), options.tool_choice.as_ref());
        warnings.extend(prepared.tool_warnings);

        let request = QwenChatRequest {
            model: self.model_id.clone(),
            messages: converted.messages,
            stream: None,
            stream_options: None,
            max_tokens: options.max_output_tokens,
            temperature: options.temperature,
            stop: options.stop_sequences.clone(),
            top_p: options.top_p,
            top_k: options.top_k,
            presence_penalty: options.presence_penalty,
            frequency_penalty: options.frequency_penalty,
            response_format,
            seed: options.seed,
            tools: prepared.tools,
            tool_choice: prepared.tool_choice,
        };

        Ok((request, warnings))
    }
}

#[async_trait]
impl LanguageModelV3 for QwenChatLanguageModel {
    fn provider(&self) -> &str {
        &self.config.provider
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn supported_urls(&self) -> HashMap<String, Vec<String>> {
        HashMap::from([("image/*".to_string(), vec!["^https?://.*$".to_string()])])
    }

    async fn do_generate(
        &self,
        options: LanguageModelV3CallOptions,
    ) -> Result<LanguageModelV3GenerateResult, LlmError> {
        let (request, warnings) = self.get_args(&options)?;
        let body = serde_json::to_value(&request)?;
        let headers = self.config.headers(options.headers.as_ref())?;

        tracing::debug!(model = %self.model_id, "qwen chat generate");
        let ApiResponse {
            headers: response_headers,
            value: response,
            raw_value,
        } = post_json_to_api::<QwenChatResponse>(
            &self.config.http_client,
            &self.config.url(CHAT_PATH),
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
        let usage = convert_qwen_chat_usage(response.usage.as_ref());

        let Some(choice) = response.choices.into_iter().next() else {
            return Err(LlmError::invalid_response_data(
                "Expected at least one choice.",
                raw_value,
            ));
        };

        let mut content = Vec::new();
        if let Some(reasoning) = choice.message.reasoning_content.filter(|s| !s.is_empty()) {
            content.push(LanguageModelV3Content::Reasoning { text: reasoning });
        }
        if let Some(text) = choice.message.content.filter(|s| !s.is_empty()) {
            content.push(LanguageModelV3Content::Text { text });
        }
        for tool_call in choice.message.tool_calls.unwrap_or_default() {
            content.push(LanguageModelV3Content::ToolCall(LanguageModelV3ToolCall {
                tool_call_id: tool_call
                    .id
                    .unwrap_or_else(|| (self.config.generate_id)()),
                tool_name: tool_call.function.name,
                input: tool_call.function.arguments,
            }));
        }

        Ok(LanguageModelV3GenerateResult {
            content,
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

        tracing::debug!(model = %self.model_id, "qwen chat stream");
        let EventStreamResponse {
            headers: response_headers,
            response,
        } = post_json_to_event_stream(
            &self.config.http_client,
            &self.config.url(CHAT_PATH),
            headers,
            &body,
            qwen_failed_response,
            options.abort_signal.as_ref(),
        )
        .await?;

        let chunks = decode_event_stream::<QwenChatChunk, _, _, _>(
            response.bytes_stream(),
            options.abort_signal.clone(),
        );
        let state = ChatStreamState::new(
            options.include_raw_chunks,
            self.config.generate_id.clone(),
        );

        Ok(LanguageModelV3StreamResult {
            stream: transform_stream(chunks, warnings, state),
            request: LanguageModelV3RequestInfo { body: Some(body) },
            response: LanguageModelV3StreamResponseInfo {
                headers: Some(response_headers),
            },
        })
    }
}
