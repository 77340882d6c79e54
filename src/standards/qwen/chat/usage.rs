//! Chat usage conversion.

use super::api::QwenChatUsage;
use crate::types::{LanguageModelV3InputTokens, LanguageModelV3OutputTokens, LanguageModelV3Usage};

/// Convert Qwen chat usage into [`LanguageModelV3Usage`].
///
/// `None` yields a usage with every count unset. Cache writes are never reported.
pub fn convert_qwen_chat_usage(usage: Option<&QwenChatUsage>) -> LanguageModelV3Usage {
    let Some(usage) = usage else {
        return LanguageModelV3Usage::default();
    };

    let prompt_tokens = usage.prompt_tokens.unwrap_or(0);
    let completion_tokens = usage.completion_tokens.unwrap_or(0);
    let cached_tokens = usage
        .prompt_tokens_details
        .as_ref()
        .and_then(|d| d.cached_tokens)
        .unwrap_or(0);

    LanguageModelV3Usage {
        input_tokens: LanguageModelV3InputTokens {
            total: Some(prompt_tokens),
            no_cache: Some(prompt_tokens.saturating_sub(cached_tokens)),
            cache_read: Some(cached_tokens),
            cache_write: None,
        },
        output_tokens: LanguageModelV3OutputTokens {
            total: Some(completion_tokens),
            text: None,
            reasoning: None,
        },
        raw: serde_json::to_value(usage).ok(),
    }
}
