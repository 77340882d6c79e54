//! Streaming completion state: a single text block with id `"0"`.

use super::api::{QwenCompletionChunk, QwenCompletionUsage};
use super::usage::convert_qwen_completion_usage;
use crate::error::LlmError;
use crate::standards::qwen::finish_reason::qwen_finish_reason;
use crate::standards::qwen::response_metadata::get_response_metadata;
use crate::streaming::{ParseResult, StreamTransformer};
use crate::types::{
    LanguageModelV3FinishReason, LanguageModelV3StreamPart, qwen_provider_metadata,
};

type Part = LanguageModelV3StreamPart;

const TEXT_ID: &str = "0";

pub struct CompletionStreamState {
    finish_reason: LanguageModelV3FinishReason,
    usage: Option<QwenCompletionUsage>,
    is_first_chunk: bool,
    include_raw_chunks: bool,
}

impl CompletionStreamState {
    pub fn new(include_raw_chunks: bool) -> Self {
        Self {
            finish_reason: LanguageModelV3FinishReason::default(),
            usage: None,
            is_first_chunk: true,
            include_raw_chunks,
        }
    }

    fn record_error(&mut self, error: serde_json::Value, out: &mut Vec<Part>) {
        self.finish_reason = LanguageModelV3FinishReason::error();
        out.push(Part::Error { error });
    }
}

impl StreamTransformer for CompletionStreamState {
    type Chunk = QwenCompletionChunk;

    fn process_chunk(
        &mut self,
        chunk: ParseResult<QwenCompletionChunk>,
        out: &mut Vec<Part>,
    ) -> Result<(), LlmError> {
        if self.include_raw_chunks {
            out.push(Part::Raw {
                raw_value: chunk.raw_value().clone(),
            });
        }

        let value = match chunk {
            ParseResult::Failure { error, .. } => {
                tracing::warn!(error = %error, "failed to parse Qwen completion chunk");
                self.record_error(serde_json::Value::String(error.to_string()), out);
                return Ok(());
            }
            ParseResult::Success {
                value: QwenCompletionChunk::Error(data),
                ..
            } => {
                tracing::warn!(message = %data.error.message, "Qwen completion stream reported an error");
                self.record_error(serde_json::Value::String(data.error.message), out);
                return Ok(());
            }
            ParseResult::Success {
                value: QwenCompletionChunk::Data(value),
                ..
            } => value,
        };

        if self.is_first_chunk {
            self.is_first_chunk = false;
            out.push(Part::ResponseMetadata(get_response_metadata(
                value.id.as_deref(),
                value.created,
                value.model.as_deref(),
            )));
            out.push(Part::TextStart {
                id: TEXT_ID.to_string(),
            });
        }

        if value.usage.is_some() {
            self.usage = value.usage;
        }

        if let Some(choice) = value.choices.into_iter().next() {
            if let Some(reason) = choice.finish_reason.as_deref() {
                self.finish_reason = qwen_finish_reason(Some(reason));
            }
            if !choice.text.is_empty() {
                out.push(Part::TextDelta {
                    id: TEXT_ID.to_string(),
                    delta: choice.text,
                });
            }
        }

        Ok(())
    }

    fn flush(self, out: &mut Vec<Part>) {
        if !self.is_first_chunk {
            out.push(Part::TextEnd {
                id: TEXT_ID.to_string(),
            });
        }

        tracing::debug!(finish_reason = %self.finish_reason.unified, "Qwen completion stream finished");
        out.push(Part::Finish {
            usage: convert_qwen_completion_usage(self.usage.as_ref()),
            finish_reason: self.finish_reason,
            provider_metadata: Some(qwen_provider_metadata()),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streaming::decode_event;
    use crate::types::FinishReason;
    use serde_json::json;

    fn run(chunks: Vec<serde_json::Value>, raw: bool) -> Vec<Part> {
        let mut state = CompletionStreamState::new(raw);
        let mut out = Vec::new();
        for c in chunks {
            state
                .process_chunk(decode_event(&c.to_string()), &mut out)
                .unwrap();
        }
        state.flush(&mut out);
        out
    }

    #[test]
    fn text_block_opens_on_first_chunk_and_closes_on_flush() {
        let parts = run(
            vec![
                json!({ "id": "cmpl-1", "model": "qwen-coder-turbo", "choices": [{ "text": "", "index": 0 }] }),
                json!({ "choices": [{ "text": "fn main", "index": 0 }] }),
                json!({
                    "choices": [{ "text": "() {}", "index": 0, "finish_reason": "stop" }],
                    "usage": { "prompt_tokens": 4, "completion_tokens": 3, "total_tokens": 7 }
                }),
            ],
            false,
        );
        let types: Vec<_> = parts.iter().map(|p| p.type_name()).collect();
        assert_eq!(
            types,
            vec![
                "response-metadata",
                "text-start",
                "text-delta",
                "text-delta",
                "text-end",
                "finish"
            ]
        );
        assert!(parts.iter().all(|p| p.block_id().is_none_or(|id| id == "0")));
        match parts.last() {
            Some(Part::Finish {
                finish_reason,
                usage,
                ..
            }) => {
                assert_eq!(finish_reason.unified, FinishReason::Stop);
                assert_eq!(usage.output_tokens.text, Some(3));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn error_chunk_without_data_emits_no_text_block() {
        let parts = run(
            vec![json!({ "error": { "message": "bad model", "type": "invalid_request_error" } })],
            true,
        );
        let types: Vec<_> = parts.iter().map(|p| p.type_name()).collect();
        assert_eq!(types, vec!["raw", "error", "finish"]);
        assert_eq!(parts[1], Part::Error { error: json!("bad model") });
        match parts.last() {
            Some(Part::Finish { finish_reason, .. }) => {
                assert_eq!(finish_reason.unified, FinishReason::Error)
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
