//! Finish reason mapping for Qwen responses.

use crate::types::{FinishReason, LanguageModelV3FinishReason};

/// Map a Qwen `finish_reason` string to the normalized [`FinishReason`].
///
/// Unknown or absent values map to `Other`.
pub fn map_qwen_finish_reason(finish_reason: Option<&str>) -> FinishReason {
    match finish_reason {
        Some("stop") => FinishReason::Stop,
        Some("length") => FinishReason::Length,
        Some("content_filter") => FinishReason::ContentFilter,
        Some("function_call") | Some("tool_calls") => FinishReason::ToolCalls,
        _ => FinishReason::Other,
    }
}

/// Normalized finish reason with the raw vendor string preserved.
pub fn qwen_finish_reason(finish_reason: Option<&str>) -> LanguageModelV3FinishReason {
    LanguageModelV3FinishReason::new(
        map_qwen_finish_reason(finish_reason),
        finish_reason.map(str::to_string),
    )
}
