//! Streaming chat state machine.
//!
//! Turns decoded `/chat/completions` SSE chunks into ordered
//! [`LanguageModelV3StreamPart`]s. Reasoning, text and tool-input parts are
//! bracketed by `*-start` / `*-end` for their block id, and the stream always
//! ends with exactly one `finish` part unless the input is cut short.

use super::api::{QwenChatChunk, QwenChatChunkData, QwenChatDelta, QwenChatToolCallDelta, QwenChatUsage};
use super::usage::convert_qwen_chat_usage;
use crate::error::LlmError;
use crate::standards::qwen::finish_reason::qwen_finish_reason;
use crate::standards::qwen::response_metadata::get_response_metadata;
use crate::streaming::{IdGenerator, ParseResult, StreamTransformer, is_parsable_json};
use crate::types::{
    LanguageModelV3FinishReason, LanguageModelV3StreamPart, LanguageModelV3ToolCall,
    qwen_provider_metadata,
};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

type Part = LanguageModelV3StreamPart;

/// A tool call being assembled from deltas.
#[derive(Debug, Clone)]
struct ToolCallEntry {
    id: String,
    name: String,
    arguments: String,
    finished: bool,
}

impl ToolCallEntry {
    /// Emit `tool-input-end` + `tool-call` and mark finished.
    fn finalize(&mut self, out: &mut Vec<Part>) {
        out.push(Part::ToolInputEnd {
            id: self.id.clone(),
        });
        out.push(Part::ToolCall(LanguageModelV3ToolCall {
            tool_call_id: self.id.clone(),
            tool_name: self.name.clone(),
            input: self.arguments.clone(),
        }));
        self.finished = true;
    }

    fn finalize_if_complete(&mut self, out: &mut Vec<Part>) {
        if is_parsable_json(&self.arguments) {
            self.finalize(out);
        }
    }
}

/// Per-call accumulator state for a streaming chat response.
pub struct ChatStreamState {
    finish_reason: LanguageModelV3FinishReason,
    usage: Option<QwenChatUsage>,
    is_first_chunk: bool,
    reasoning_id: Option<String>,
    text_id: Option<String>,
    /// Keyed by the vendor's positional index; indices may be sparse.
    tool_calls: BTreeMap<u64, ToolCallEntry>,
    include_raw_chunks: bool,
    generate_id: IdGenerator,
}

impl ChatStreamState {
    pub fn new(include_raw_chunks: bool, generate_id: IdGenerator) -> Self {
        Self {
            finish_reason: LanguageModelV3FinishReason::default(),
            usage: None,
            is_first_chunk: true,
            reasoning_id: None,
            text_id: None,
            tool_calls: BTreeMap::new(),
            include_raw_chunks,
            generate_id,
        }
    }

    fn process_data(&mut self, value: QwenChatChunkData, out: &mut Vec<Part>) -> Result<(), LlmError> {
        if self.is_first_chunk {
            self.is_first_chunk = false;
            out.push(Part::ResponseMetadata(get_response_metadata(
                value.id.as_deref(),
                value.created,
                value.model.as_deref(),
            )));
        }

        if value.usage.is_some() {
            self.usage = value.usage;
        }

        let Some(choice) = value.choices.into_iter().next() else {
            return Ok(());
        };

        if let Some(reason) = choice.finish_reason.as_deref() {
            self.finish_reason = qwen_finish_reason(Some(reason));
        }

        let Some(delta) = choice.delta else {
            return Ok(());
        };

        self.process_delta(delta, out)
    }

    fn process_delta(&mut self, delta: QwenChatDelta, out: &mut Vec<Part>) -> Result<(), LlmError> {
        if let Some(reasoning) = delta.reasoning_content.filter(|s| !s.is_empty()) {
            let id = match &self.reasoning_id {
                Some(id) => id.clone(),
                None => {
                    let id = (self.generate_id)();
                    out.push(Part::ReasoningStart { id: id.clone() });
                    self.reasoning_id = Some(id.clone());
                    id
                }
            };
            out.push(Part::ReasoningDelta {
                id,
                delta: reasoning,
            });
        }

        if let Some(text) = delta.content.filter(|s| !s.is_empty()) {
            self.close_reasoning(out);
            let id = match &self.text_id {
                Some(id) => id.clone(),
                None => {
                    let id = (self.generate_id)();
                    out.push(Part::TextStart { id: id.clone() });
                    self.text_id = Some(id.clone());
                    id
                }
            };
            out.push(Part::TextDelta { id, delta: text });
        }

        if let Some(tool_calls) = delta.tool_calls.filter(|calls| !calls.is_empty()) {
            self.close_reasoning(out);
            for tool_call in tool_calls {
                self.process_tool_call_delta(tool_call, out)?;
            }
        }

        Ok(())
    }

    fn process_tool_call_delta(
        &mut self,
        delta: QwenChatToolCallDelta,
        out: &mut Vec<Part>,
    ) -> Result<(), LlmError> {
        let (name, arguments) = match delta.function.clone() {
            Some(f) => (f.name, f.arguments),
            None => (None, None),
        };

        let slot = match self.tool_calls.entry(delta.index) {
            Entry::Occupied(slot) => slot.into_mut(),
            Entry::Vacant(slot) => {
                let data = serde_json::to_value(&delta).unwrap_or_default();
                let Some(id) = delta.id else {
                    return Err(LlmError::invalid_response_data(
                        "Expected 'id' to be a string.",
                        data,
                    ));
                };
                let Some(name) = name else {
                    return Err(LlmError::invalid_response_data(
                        "Expected 'function.name' to be a string.",
                        data,
                    ));
                };

                out.push(Part::ToolInputStart {
                    id: id.clone(),
                    tool_name: name.clone(),
                });

                let entry = slot.insert(ToolCallEntry {
                    id,
                    name,
                    arguments: arguments.unwrap_or_default(),
                    finished: false,
                });
                if !entry.arguments.is_empty() {
                    out.push(Part::ToolInputDelta {
                        id: entry.id.clone(),
                        delta: entry.arguments.clone(),
                    });
                }
                entry.finalize_if_complete(out);
                return Ok(());
            }
        };

        if slot.finished {
            return Ok(());
        }

        let fragment = arguments.unwrap_or_default();
        slot.arguments.push_str(&fragment);
        out.push(Part::ToolInputDelta {
            id: slot.id.clone(),
            delta: fragment,
        });
        slot.finalize_if_complete(out);
        Ok(())
    }

    fn close_reasoning(&mut self, out: &mut Vec<Part>) {
        if let Some(id) = self.reasoning_id.take() {
            out.push(Part::ReasoningEnd { id });
        }
    }

    fn record_error(&mut self, error: serde_json::Value, out: &mut Vec<Part>) {
        self.finish_reason = LanguageModelV3FinishReason::error();
        out.push(Part::Error { error });
    }
}

impl StreamTransformer for ChatStreamState {
    type Chunk = QwenChatChunk;

    fn process_chunk(
        &mut self,
        chunk: ParseResult<QwenChatChunk>,
        out: &mut Vec<Part>,
    ) -> Result<(), LlmError> {
        if self.include_raw_chunks {
            out.push(Part::Raw {
                raw_value: chunk.raw_value().clone(),
            });
        }

        match chunk {
            ParseResult::Failure { error, .. } => {
                tracing::warn!(error = %error, "failed to parse Qwen chat chunk");
                self.record_error(serde_json::Value::String(error.to_string()), out);
                Ok(())
            }
            ParseResult::Success {
                value: QwenChatChunk::Error(data),
                ..
            } => {
                tracing::warn!(message = %data.error.message, "Qwen chat stream reported an error");
                self.record_error(serde_json::Value::String(data.error.message), out);
                Ok(())
            }
            ParseResult::Success {
                value: QwenChatChunk::Data(value),
                ..
            } => self.process_data(value, out),
        }
    }

    fn flush(mut self, out: &mut Vec<Part>) {
        self.close_reasoning(out);
        if let Some(id) = self.text_id.take() {
            out.push(Part::TextEnd { id });
        }

        for entry in self.tool_calls.values_mut().filter(|e| !e.finished) {
            entry.finalize(out);
        }

        tracing::debug!(finish_reason = %self.finish_reason.unified, "Qwen chat stream finished");
        out.push(Part::Finish {
            usage: convert_qwen_chat_usage(self.usage.as_ref()),
            finish_reason: self.finish_reason,
            provider_metadata: Some(qwen_provider_metadata()),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streaming::{decode_event, transform_stream};
    use crate::types::{FinishReason, SharedV3Warning};
    use futures::StreamExt;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sequential_ids() -> IdGenerator {
        let counter = Arc::new(AtomicUsize::new(0));
        Arc::new(move || format!("id-{}", counter.fetch_add(1, Ordering::SeqCst)))
    }

    fn chunk(v: Value) -> ParseResult<QwenChatChunk> {
        decode_event(&v.to_string())
    }

    fn delta(d: Value) -> ParseResult<QwenChatChunk> {
        chunk(json!({
            "id": "chatcmpl-1",
            "created": 1_700_000_000,
            "model": "qwen-plus",
            "choices": [{ "index": 0, "delta": d }]
        }))
    }

    fn tool_delta(index: u64, id: Option<&str>, name: Option<&str>, args: Option<&str>) -> ParseResult<QwenChatChunk> {
        let mut call = json!({ "index": index, "function": {} });
        if let Some(id) = id {
            call["id"] = json!(id);
            call["type"] = json!("function");
        }
        if let Some(name) = name {
            call["function"]["name"] = json!(name);
        }
        if let Some(args) = args {
            call["function"]["arguments"] = json!(args);
        }
        delta(json!({ "tool_calls": [call] }))
    }

    /// Process `chunks` then flush; the `stream-start` part is not included.
    fn run(chunks: Vec<ParseResult<QwenChatChunk>>, raw: bool) -> Result<Vec<Part>, (Vec<Part>, LlmError)> {
        let mut state = ChatStreamState::new(raw, sequential_ids());
        let mut out = Vec::new();
        for c in chunks {
            if let Err(e) = state.process_chunk(c, &mut out) {
                return Err((out, e));
            }
        }
        state.flush(&mut out);
        Ok(out)
    }

    fn types(parts: &[Part]) -> Vec<&'static str> {
        parts.iter().map(|p| p.type_name()).collect()
    }

    fn finish_of(parts: &[Part]) -> (&LanguageModelV3FinishReason, &crate::types::LanguageModelV3Usage) {
        match parts.last() {
            Some(Part::Finish {
                finish_reason,
                usage,
                ..
            }) => (finish_reason, usage),
            other => panic!("expected finish, got {other:?}"),
        }
    }

    /// Every `*-start` has one matching `*-end` and deltas sit inside the bracket.
    fn assert_well_bracketed(parts: &[Part]) {
        use std::collections::HashMap;
        let mut open: HashMap<(String, &'static str), bool> = HashMap::new();
        for p in parts {
            let (kind, phase) = match p.type_name().rsplit_once('-') {
                Some((k, ph)) if matches!(ph, "start" | "delta" | "end") && k != "stream" => {
                    (k, ph)
                }
                _ => continue,
            };
            let kind: &'static str = match kind {
                "text" => "text",
                "reasoning" => "reasoning",
                "tool-input" => "tool-input",
                _ => continue,
            };
            let key = (p.block_id().unwrap().to_string(), kind);
            match phase {
                "start" => {
                    assert!(!open.contains_key(&key), "block started twice: {key:?}");
                    open.insert(key, true);
                }
                "delta" => assert_eq!(open.get(&key), Some(&true), "delta outside block: {key:?}"),
                "end" => {
                    assert_eq!(open.get(&key), Some(&true), "end without open block: {key:?}");
                    open.insert(key, false);
                }
                _ => unreachable!(),
            }
        }
        assert!(open.values().all(|v| !v), "unterminated blocks: {open:?}");
    }

    #[test]
    fn empty_deltas_emit_metadata_and_finish_only() {
        let parts = run(
            vec![
                delta(json!({ "role": "assistant" })),
                delta(json!({ "content": "" })),
                chunk(json!({ "choices": [{ "index": 0, "finish_reason": "stop" }] })),
            ],
            false,
        )
        .unwrap();
        assert_eq!(types(&parts), vec!["response-metadata", "finish"]);
        match &parts[0] {
            Part::ResponseMetadata(meta) => {
                assert_eq!(meta.id.as_deref(), Some("chatcmpl-1"));
                assert_eq!(meta.model_id.as_deref(), Some("qwen-plus"));
                assert_eq!(meta.timestamp.map(|t| t.timestamp()), Some(1_700_000_000));
            }
            other => panic!("unexpected: {other:?}"),
        }
        let (reason, usage) = finish_of(&parts);
        assert_eq!(reason.unified, FinishReason::Stop);
        assert_eq!(reason.raw.as_deref(), Some("stop"));
        assert_eq!(usage, &crate::types::LanguageModelV3Usage::default());
    }

    #[test]
    fn text_deltas_share_one_block() {
        let parts = run(
            vec![
                delta(json!({ "content": "Hel" })),
                delta(json!({ "content": "lo" })),
            ],
            false,
        )
        .unwrap();
        assert_eq!(
            parts[1..],
            [
                Part::TextStart { id: "id-0".into() },
                Part::TextDelta { id: "id-0".into(), delta: "Hel".into() },
                Part::TextDelta { id: "id-0".into(), delta: "lo".into() },
                Part::TextEnd { id: "id-0".into() },
                parts.last().unwrap().clone(),
            ]
        );
        assert_eq!(finish_of(&parts).0.unified, FinishReason::Other);
    }

    #[test]
    fn reasoning_closes_before_text_in_same_chunk() {
        let parts = run(
            vec![
                delta(json!({ "reasoning_content": "think" })),
                delta(json!({ "reasoning_content": " more", "content": "answer" })),
            ],
            false,
        )
        .unwrap();
        assert_eq!(
            types(&parts),
            vec![
                "response-metadata",
                "reasoning-start",
                "reasoning-delta",
                "reasoning-delta",
                "reasoning-end",
                "text-start",
                "text-delta",
                "text-end",
                "finish",
            ]
        );
        assert_eq!(parts[4], Part::ReasoningEnd { id: "id-0".into() });
        assert_eq!(parts[5], Part::TextStart { id: "id-1".into() });
        assert_well_bracketed(&parts);
    }

    #[test]
    fn reasoning_after_text_opens_new_block() {
        let parts = run(
            vec![
                delta(json!({ "reasoning_content": "a" })),
                delta(json!({ "content": "b" })),
                delta(json!({ "reasoning_content": "c" })),
            ],
            false,
        )
        .unwrap();
        assert_eq!(
            types(&parts),
            vec![
                "response-metadata",
                "reasoning-start",
                "reasoning-delta",
                "reasoning-end",
                "text-start",
                "text-delta",
                "reasoning-start",
                "reasoning-delta",
                "reasoning-end",
                "text-end",
                "finish",
            ]
        );
        assert_eq!(parts[6], Part::ReasoningStart { id: "id-2".into() });
        assert_well_bracketed(&parts);
    }

    #[test]
    fn open_reasoning_is_closed_on_flush() {
        let parts = run(vec![delta(json!({ "reasoning_content": "hmm" }))], false).unwrap();
        assert_eq!(
            types(&parts),
            vec![
                "response-metadata",
                "reasoning-start",
                "reasoning-delta",
                "reasoning-end",
                "finish"
            ]
        );
    }

    #[test]
    fn tool_call_in_single_delta_finalizes_immediately() {
        let parts = run(
            vec![
                tool_delta(0, Some("call_1"), Some("lookup"), Some(r#"{"q":"x"}"#)),
                tool_delta(0, None, None, Some("ignored")),
            ],
            false,
        )
        .unwrap();
        assert_eq!(
            parts[1..5],
            [
                Part::ToolInputStart {
                    id: "call_1".into(),
                    tool_name: "lookup".into()
                },
                Part::ToolInputDelta {
                    id: "call_1".into(),
                    delta: r#"{"q":"x"}"#.into()
                },
                Part::ToolInputEnd { id: "call_1".into() },
                Part::ToolCall(LanguageModelV3ToolCall {
                    tool_call_id: "call_1".into(),
                    tool_name: "lookup".into(),
                    input: r#"{"q":"x"}"#.into(),
                }),
            ]
        );
        assert_eq!(types(&parts[5..]), vec!["finish"]);
    }

    #[test]
    fn tool_call_split_across_deltas_accumulates_arguments() {
        let parts = run(
            vec![
                tool_delta(0, Some("call_1"), Some("lookup"), None),
                tool_delta(0, None, None, Some(r#"{"q":"#)),
                tool_delta(0, None, None, Some(r#""x"}"#)),
            ],
            false,
        )
        .unwrap();
        assert_eq!(
            parts[1..6],
            [
                Part::ToolInputStart {
                    id: "call_1".into(),
                    tool_name: "lookup".into()
                },
                Part::ToolInputDelta {
                    id: "call_1".into(),
                    delta: r#"{"q":"#.into()
                },
                Part::ToolInputDelta {
                    id: "call_1".into(),
                    delta: r#""x"}"#.into()
                },
                Part::ToolInputEnd { id: "call_1".into() },
                Part::ToolCall(LanguageModelV3ToolCall {
                    tool_call_id: "call_1".into(),
                    tool_name: "lookup".into(),
                    input: r#"{"q":"x"}"#.into(),
                }),
            ]
        );
        assert_well_bracketed(&parts);
    }

    #[test]
    fn delta_without_arguments_still_emits_empty_delta() {
        let parts = run(
            vec![
                tool_delta(0, Some("call_1"), Some("lookup"), Some("{")),
                tool_delta(0, None, None, None),
            ],
            false,
        )
        .unwrap();
        assert_eq!(
            parts[3],
            Part::ToolInputDelta {
                id: "call_1".into(),
                delta: String::new()
            }
        );
    }

    #[test]
    fn incomplete_tool_calls_are_forced_out_on_flush_in_index_order() {
        let parts = run(
            vec![
                tool_delta(5, Some("call_b"), Some("second"), Some(r#"{"a":"#)),
                tool_delta(2, Some("call_a"), Some("first"), Some(r#"{"b"#)),
                delta(json!({ "content": "text" })),
            ],
            false,
        )
        .unwrap();
        let tail: Vec<_> = parts
            .iter()
            .skip_while(|p| !matches!(p, Part::TextEnd { .. }))
            .cloned()
            .collect();
        assert_eq!(
            tail,
            vec![
                Part::TextEnd { id: "id-0".into() },
                Part::ToolInputEnd { id: "call_a".into() },
                Part::ToolCall(LanguageModelV3ToolCall {
                    tool_call_id: "call_a".into(),
                    tool_name: "first".into(),
                    input: r#"{"b"#.into(),
                }),
                Part::ToolInputEnd { id: "call_b".into() },
                Part::ToolCall(LanguageModelV3ToolCall {
                    tool_call_id: "call_b".into(),
                    tool_name: "second".into(),
                    input: r#"{"a":"#.into(),
                }),
                tail.last().unwrap().clone(),
            ]
        );
        assert_well_bracketed(&parts);
    }

    #[test]
    fn tool_calls_close_open_reasoning() {
        let parts = run(
            vec![
                delta(json!({ "reasoning_content": "plan" })),
                tool_delta(0, Some("call_1"), Some("lookup"), Some("{}")),
            ],
            false,
        )
        .unwrap();
        assert_eq!(
            types(&parts),
            vec![
                "response-metadata",
                "reasoning-start",
                "reasoning-delta",
                "reasoning-end",
                "tool-input-start",
                "tool-input-delta",
                "tool-input-end",
                "tool-call",
                "finish",
            ]
        );
    }

    #[test]
    fn empty_tool_call_list_keeps_reasoning_open() {
        let parts = run(
            vec![
                delta(json!({ "reasoning_content": "a", "tool_calls": [] })),
                delta(json!({ "reasoning_content": "b" })),
            ],
            false,
        )
        .unwrap();
        assert_eq!(
            types(&parts),
            vec![
                "response-metadata",
                "reasoning-start",
                "reasoning-delta",
                "reasoning-delta",
                "reasoning-end",
                "finish"
            ]
        );
    }

    #[test]
    fn new_tool_call_without_id_is_fatal() {
        let (parts, err) = run(
            vec![tool_delta(0, None, Some("lookup"), Some("{}"))],
            false,
        )
        .unwrap_err();
        assert_eq!(types(&parts), vec!["response-metadata"]);
        match err {
            LlmError::InvalidResponseData { message, data } => {
                assert_eq!(message, "Expected 'id' to be a string.");
                assert_eq!(data["index"], 0);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn new_tool_call_without_name_is_fatal() {
        let (_, err) = run(vec![tool_delta(0, Some("call_1"), None, None)], false).unwrap_err();
        assert!(matches!(
            err,
            LlmError::InvalidResponseData { ref message, .. } if message == "Expected 'function.name' to be a string."
        ));
    }

    #[test]
    fn parse_failure_is_reported_and_processing_continues() {
        let parts = run(
            vec![
                chunk(json!({ "unexpected": true })),
                delta(json!({ "content": "still here" })),
            ],
            false,
        )
        .unwrap();
        assert_eq!(
            types(&parts),
            vec![
                "error",
                "response-metadata",
                "text-start",
                "text-delta",
                "text-end",
                "finish"
            ]
        );
        assert_eq!(finish_of(&parts).0.unified, FinishReason::Error);
    }

    #[test]
    #[tracing_test::traced_test]
    fn undecodable_chunks_are_logged() {
        run(vec![chunk(json!({ "unexpected": true }))], false).unwrap();
        assert!(logs_contain("failed to parse Qwen chat chunk"));
        assert!(logs_contain("Qwen chat stream finished"));
    }

    #[test]
    fn error_payload_is_reported_with_vendor_message() {
        let parts = run(
            vec![
                delta(json!({ "content": "a" })),
                chunk(json!({ "error": { "message": "quota exceeded", "type": "rate_limit" } })),
            ],
            false,
        )
        .unwrap();
        assert!(parts.contains(&Part::Error {
            error: json!("quota exceeded")
        }));
        assert_eq!(finish_of(&parts).0, &LanguageModelV3FinishReason::error());
    }

    #[test]
    fn interleaved_tool_calls_after_error_keep_text_block_open() {
        let parts = run(
            vec![
                delta(json!({ "content": "t" })),
                chunk(json!({ "error": { "message": "boom", "type": "server_error" } })),
                delta(json!({ "tool_calls": [
                    { "index": 1, "id": "b", "type": "function",
                      "function": { "name": "fb", "arguments": "{\"x\":" } },
                    { "index": 0, "id": "a", "type": "function",
                      "function": { "name": "fa", "arguments": "" } },
                    { "index": 1, "function": { "arguments": "1}" } },
                    { "index": 0, "function": { "arguments": "[]" } },
                ] })),
                delta(json!({ "content": "u" })),
            ],
            false,
        )
        .unwrap();

        assert!(matches!(parts[0], Part::ResponseMetadata(_)));
        assert_eq!(
            parts[1..parts.len() - 1],
            [
                Part::TextStart { id: "id-0".into() },
                Part::TextDelta {
                    id: "id-0".into(),
                    delta: "t".into()
                },
                Part::Error {
                    error: json!("boom")
                },
                Part::ToolInputStart {
                    id: "b".into(),
                    tool_name: "fb".into()
                },
                Part::ToolInputDelta {
                    id: "b".into(),
                    delta: "{\"x\":".into()
                },
                Part::ToolInputStart {
                    id: "a".into(),
                    tool_name: "fa".into()
                },
                Part::ToolInputDelta {
                    id: "b".into(),
                    delta: "1}".into()
                },
                Part::ToolInputEnd { id: "b".into() },
                Part::ToolCall(LanguageModelV3ToolCall {
                    tool_call_id: "b".into(),
                    tool_name: "fb".into(),
                    input: "{\"x\":1}".into(),
                }),
                Part::ToolInputDelta {
                    id: "a".into(),
                    delta: "[]".into()
                },
                Part::ToolInputEnd { id: "a".into() },
                Part::ToolCall(LanguageModelV3ToolCall {
                    tool_call_id: "a".into(),
                    tool_name: "fa".into(),
                    input: "[]".into(),
                }),
                Part::TextDelta {
                    id: "id-0".into(),
                    delta: "u".into()
                },
                Part::TextEnd { id: "id-0".into() },
            ]
        );
        assert_well_bracketed(&parts);
        assert_eq!(finish_of(&parts).0.unified, FinishReason::Error);
    }

    #[test]
    fn later_finish_reason_overwrites_error() {
        let parts = run(
            vec![
                chunk(json!("not an object")),
                chunk(json!({ "choices": [{ "index": 0, "finish_reason": "length" }] })),
            ],
            false,
        )
        .unwrap();
        assert_eq!(finish_of(&parts).0.unified, FinishReason::Length);
    }

    #[test]
    fn raw_chunks_precede_interpretation() {
        let bad = json!({ "nope": 1 });
        let parts = run(
            vec![chunk(bad.clone()), delta(json!({ "content": "x" }))],
            true,
        )
        .unwrap();
        assert_eq!(parts[0], Part::Raw { raw_value: bad });
        assert_eq!(parts[1].type_name(), "error");
        assert_eq!(parts[2].type_name(), "raw");
        assert_eq!(parts[3].type_name(), "response-metadata");
    }

    #[test]
    fn usage_is_last_write_wins() {
        let parts = run(
            vec![
                chunk(json!({ "choices": [], "usage": { "prompt_tokens": 1, "completion_tokens": 1 } })),
                chunk(json!({
                    "choices": [],
                    "usage": {
                        "prompt_tokens": 100,
                        "completion_tokens": 20,
                        "prompt_tokens_details": { "cached_tokens": 30 }
                    }
                })),
                chunk(json!({ "choices": [] })),
            ],
            false,
        )
        .unwrap();
        let (_, usage) = finish_of(&parts);
        assert_eq!(usage.input_tokens.total, Some(100));
        assert_eq!(usage.input_tokens.no_cache, Some(70));
        assert_eq!(usage.input_tokens.cache_read, Some(30));
        assert_eq!(usage.output_tokens.total, Some(20));
    }

    #[test]
    fn finish_carries_provider_metadata() {
        let parts = run(vec![], false).unwrap();
        match parts.as_slice() {
            [Part::Finish { provider_metadata, .. }] => {
                assert_eq!(provider_metadata, &Some(qwen_provider_metadata()));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn driver_emits_stream_start_first_and_finish_last() {
        let chunks = vec![
            Ok(delta(json!({ "content": "hi" }))),
            Ok(chunk(json!({ "choices": [{ "index": 0, "finish_reason": "stop" }] }))),
        ];
        let warnings = vec![SharedV3Warning::unsupported("topK")];
        let parts: Vec<_> = transform_stream(
            futures::stream::iter(chunks),
            warnings.clone(),
            ChatStreamState::new(false, sequential_ids()),
        )
        .collect()
        .await;
        let parts: Vec<Part> = parts.into_iter().map(|p| p.unwrap()).collect();
        assert_eq!(parts[0], Part::StreamStart { warnings });
        assert_eq!(
            types(&parts),
            vec![
                "stream-start",
                "response-metadata",
                "text-start",
                "text-delta",
                "text-end",
                "finish"
            ]
        );
    }

    #[tokio::test]
    async fn driver_stops_without_finish_on_input_error() {
        let chunks = vec![
            Ok(delta(json!({ "content": "hi" }))),
            Err(LlmError::Cancelled),
            Ok(delta(json!({ "content": "never" }))),
        ];
        let parts: Vec<_> = transform_stream(
            futures::stream::iter(chunks),
            vec![],
            ChatStreamState::new(false, sequential_ids()),
        )
        .collect()
        .await;
        assert!(matches!(parts.last(), Some(Err(LlmError::Cancelled))));
        assert!(
            parts
                .iter()
                .filter_map(|p| p.as_ref().ok())
                .all(|p| !matches!(p, Part::Finish { .. }))
        );
    }

    #[tokio::test]
    async fn driver_surfaces_protocol_violation_as_error() {
        let chunks = vec![
            Ok(delta(json!({ "content": "hi" }))),
            Ok(tool_delta(0, None, None, None)),
            Ok(delta(json!({ "content": "never" }))),
        ];
        let parts: Vec<_> = transform_stream(
            futures::stream::iter(chunks),
            vec![],
            ChatStreamState::new(false, sequential_ids()),
        )
        .collect()
        .await;
        assert_eq!(parts.len(), 5);
        assert!(matches!(
            parts.last(),
            Some(Err(LlmError::InvalidResponseData { .. }))
        ));
    }
}
