//! Prompt → single completion prompt string.

use crate::error::LlmError;
use crate::types::{AssistantContentPart, LanguageModelV3Message, UserContentPart};

const USER_LABEL: &str = "user";
const ASSISTANT_LABEL: &str = "assistant";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionPrompt {
    pub prompt: String,
    /// Stops generation before the model writes the next user turn.
    pub stop_sequences: Vec<String>,
}

/// Flatten a conversation into a labelled transcript ending in `assistant:\n`.
///
/// A leading system message becomes a plain preamble; any later system message
/// is rejected, as are tool calls and tool messages.
pub fn convert_to_qwen_completion_prompt(
    prompt: &[LanguageModelV3Message],
) -> Result<CompletionPrompt, LlmError> {
    let mut text = String::new();
    let mut messages = prompt;

    if let [LanguageModelV3Message::System { content }, rest @ ..] = prompt {
        text.push_str(content);
        text.push_str("\n\n");
        messages = rest;
    }

    for message in messages {
        match message {
            LanguageModelV3Message::System { content } => {
                return Err(LlmError::InvalidPrompt(format!(
                    "Unexpected system message in prompt: {content}"
                )));
            }
            LanguageModelV3Message::User { content } => {
                let user_text: String = content
                    .iter()
                    .filter_map(|part| match part {
                        UserContentPart::Text { text } => Some(text.as_str()),
                        UserContentPart::File(_) => None,
                    })
                    .collect();
                text.push_str(&format!("{USER_LABEL}:\n{user_text}\n\n"));
            }
            LanguageModelV3Message::Assistant { content } => {
                let mut assistant_text = String::new();
                for part in content {
                    match part {
                        AssistantContentPart::Text { text } => assistant_text.push_str(text),
                        AssistantContentPart::ToolCall(_) => {
                            return Err(LlmError::UnsupportedOperation(
                                "tool-call messages".to_string(),
                            ));
                        }
                        AssistantContentPart::File(_)
                        | AssistantContentPart::Reasoning { .. }
                        | AssistantContentPart::ToolResult(_) => {}
                    }
                }
                text.push_str(&format!("{ASSISTANT_LABEL}:\n{assistant_text}\n\n"));
            }
            LanguageModelV3Message::Tool { .. } => {
                return Err(LlmError::UnsupportedOperation(
                    "tool messages".to_string(),
                ));
            }
        }
    }

    text.push_str(&format!("{ASSISTANT_LABEL}:\n"));

    Ok(CompletionPrompt {
        prompt: text,
        stop_sequences: vec![format!("\n{USER_LABEL}:")],
    })
}
