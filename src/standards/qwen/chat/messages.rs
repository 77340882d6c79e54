//! Prompt → Qwen chat message conversion.

use super::api::{
    AudioFormat, QwenChatAssistantToolCall, QwenChatContentPart, QwenChatImageUrl,
    QwenChatInputAudio, QwenChatMessage, QwenChatUserContent, QwenFunctionCall, QwenFunctionType,
};
use crate::error::LlmError;
use crate::types::{
    AssistantContentPart, LanguageModelV3FileData, LanguageModelV3FilePart,
    LanguageModelV3Message, LanguageModelV3Prompt, LanguageModelV3ToolResultOutput,
    SharedV3Warning, ToolContentPart, UserContentPart,
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Converted messages plus conversion warnings.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedChatMessages {
    pub messages: Vec<QwenChatMessage>,
    pub warnings: Vec<SharedV3Warning>,
}

/// Convert a standardized prompt into Qwen chat messages.
pub fn convert_to_qwen_chat_messages(
    prompt: &LanguageModelV3Prompt,
) -> Result<ConvertedChatMessages, LlmError> {
    let mut messages = Vec::with_capacity(prompt.len());

    for message in prompt {
        match message {
            LanguageModelV3Message::System { content } => {
                messages.push(QwenChatMessage::System {
                    content: content.clone(),
                });
            }
            LanguageModelV3Message::User { content } => {
                messages.push(convert_user_message(content)?);
            }
            LanguageModelV3Message::Assistant { content } => {
                messages.push(convert_assistant_message(content));
            }
            LanguageModelV3Message::Tool { content } => {
                messages.extend(convert_tool_messages(content));
            }
        }
    }

    Ok(ConvertedChatMessages {
        messages,
        warnings: Vec::new(),
    })
}

/// URL form of file data: passthrough for `http…`/`data:`, otherwise a base64 data URL.
fn file_data_url(part: &LanguageModelV3FilePart) -> String {
    let data = match &part.data {
        LanguageModelV3FileData::Url(u) => u.url.clone(),
        LanguageModelV3FileData::Base64(b64) => b64.clone(),
        LanguageModelV3FileData::Bytes(bytes) => STANDARD.encode(bytes),
    };
    if data.starts_with("http") || data.starts_with("data:") {
        data
    } else {
        format!("data:{};base64,{}", part.media_type, data)
    }
}

fn convert_user_message(content: &[UserContentPart]) -> Result<QwenChatMessage, LlmError> {
    if let [UserContentPart::Text { text }] = content {
        return Ok(QwenChatMessage::User {
            content: QwenChatUserContent::Text(text.clone()),
        });
    }

    let mut parts = Vec::with_capacity(content.len());
    for part in content {
        match part {
            UserContentPart::Text { text } => {
                parts.push(QwenChatContentPart::Text { text: text.clone() })
            }
            UserContentPart::File(file) if file.media_type.starts_with("image/") => {
                parts.push(QwenChatContentPart::ImageUrl {
                    image_url: QwenChatImageUrl {
                        url: file_data_url(file),
                    },
                });
            }
            UserContentPart::File(file) if file.media_type.starts_with("audio/") => {
                let format = match file.media_type.as_str() {
                    "audio/wav" => AudioFormat::Wav,
                    "audio/mp3" | "audio/mpeg" => AudioFormat::Mp3,
                    other => {
                        return Err(LlmError::UnsupportedOperation(format!(
                            "audio content parts with media type {other}"
                        )));
                    }
                };
                parts.push(QwenChatContentPart::InputAudio {
                    input_audio: QwenChatInputAudio {
                        data: file_data_url(file),
                        format,
                    },
                });
            }
            UserContentPart::File(file) => {
                return Err(LlmError::UnsupportedOperation(format!(
                    "file part media type {}",
                    file.media_type
                )));
            }
        }
    }

    Ok(QwenChatMessage::User {
        content: QwenChatUserContent::Parts(parts),
    })
}

fn convert_assistant_message(content: &[AssistantContentPart]) -> QwenChatMessage {
    let mut text = String::new();
    let mut tool_calls: Vec<QwenChatAssistantToolCall> = Vec::new();

    for part in content {
        match part {
            AssistantContentPart::Text { text: t } => text.push_str(t),
            AssistantContentPart::ToolCall(call) => {
                let index = tool_calls.len() as u32;
                tool_calls.push(QwenChatAssistantToolCall {
                    id: call.tool_call_id.clone(),
                    r#type: QwenFunctionType::Function,
                    index,
                    function: QwenFunctionCall {
                        name: call.tool_name.clone(),
                        arguments: call.input.to_string(),
                    },
                });
            }
            AssistantContentPart::File(_)
            | AssistantContentPart::Reasoning { .. }
            | AssistantContentPart::ToolResult(_) => {}
        }
    }

    QwenChatMessage::Assistant {
        content: Some(text),
        partial: None,
        tool_calls: (!tool_calls.is_empty()).then_some(tool_calls),
    }
}

fn convert_tool_messages(content: &[ToolContentPart]) -> Vec<QwenChatMessage> {
    content
        .iter()
        .filter_map(|part| match part {
            ToolContentPart::ToolApprovalResponse(_) => None,
            ToolContentPart::ToolResult(result) => {
                let content = match &result.output {
                    LanguageModelV3ToolResultOutput::Text { value }
                    | LanguageModelV3ToolResultOutput::ErrorText { value } => value.clone(),
                    LanguageModelV3ToolResultOutput::ExecutionDenied { reason } => reason
                        .clone()
                        .unwrap_or_else(|| "Tool execution denied.".to_string()),
                    LanguageModelV3ToolResultOutput::Json { value }
                    | LanguageModelV3ToolResultOutput::ErrorJson { value }
                    | LanguageModelV3ToolResultOutput::Content { value } => value.to_string(),
                };
                Some(QwenChatMessage::Tool {
                    content,
                    tool_call_id: result.tool_call_id.clone(),
                })
            }
        })
        .collect()
}
