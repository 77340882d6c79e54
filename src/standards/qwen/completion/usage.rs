//! Completion usage conversion.

use super::api::QwenCompletionUsage;
use crate::types::{LanguageModelV3InputTokens, LanguageModelV3OutputTokens, LanguageModelV3Usage};

/// Completion endpoints report no cache details: all prompt tokens count as uncached.
pub fn convert_qwen_completion_usage(usage: Option<&QwenCompletionUsage>) -> LanguageModelV3Usage {
    let Some(usage) = usage else {
        return LanguageModelV3Usage::default();
    };

    LanguageModelV3Usage {
        input_tokens: LanguageModelV3InputTokens {
            total: Some(usage.prompt_tokens),
            no_cache: Some(usage.prompt_tokens),
            cache_read: None,
            cache_write: None,
        },
        output_tokens: LanguageModelV3OutputTokens {
            total: Some(usage.completion_tokens),
            text: Some(usage.completion_tokens),
            reasoning: None,
        },
        raw: serde_json::to_value(usage).ok(),
    }
}
