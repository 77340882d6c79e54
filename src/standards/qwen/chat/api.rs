//! Qwen chat completion wire types (`/chat/completions`).

use crate::standards::qwen::error::QwenErrorData;
use serde::{Deserialize, Serialize};

/// `type: "function"` discriminator used by tool definitions and calls.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum QwenFunctionType {
    #[default]
    Function,
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QwenChatRequest {
    pub model: String,
    pub messages: Vec<QwenChatMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_options: Option<QwenChatStreamOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_format: Option<QwenChatResponseFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<QwenChatTool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<QwenChatToolChoice>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct QwenChatStreamOptions {
    /// Attach token usage to the last chunk.
    pub include_usage: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum QwenChatMessage {
    System {
        content: String,
    },
    User {
        content: QwenChatUserContent,
    },
    Assistant {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        partial: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tool_calls: Option<Vec<QwenChatAssistantToolCall>>,
    },
    Tool {
        content: String,
        tool_call_id: String,
    },
}

/// User content: plain string, or a list of typed parts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum QwenChatUserContent {
    Text(String),
    Parts(Vec<QwenChatContentPart>),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QwenChatContentPart {
    Text { text: String },
    ImageUrl { image_url: QwenChatImageUrl },
    InputAudio { input_audio: QwenChatInputAudio },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QwenChatImageUrl {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QwenChatInputAudio {
    /// Base64-encoded audio.
    pub data: String,
    pub format: AudioFormat,
}

/// Audio container format; unknown formats pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AudioFormat {
    Mp3,
    Wav,
    Other(String),
}

impl AudioFormat {
    pub fn as_str(&self) -> &str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
            AudioFormat::Other(s) => s,
        }
    }
}

impl From<String> for AudioFormat {
    fn from(value: String) -> Self {
        match value.as_str() {
            "mp3" => AudioFormat::Mp3,
            "wav" => AudioFormat::Wav,
            _ => AudioFormat::Other(value),
        }
    }
}

impl From<AudioFormat> for String {
    fn from(value: AudioFormat) -> Self {
        match value {
            AudioFormat::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QwenChatAssistantToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub r#type: QwenFunctionType,
    pub index: u32,
    pub function: QwenFunctionCall,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QwenFunctionCall {
    pub name: String,
    /// Stringified JSON arguments.
    pub arguments: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QwenChatTool {
    #[serde(rename = "type")]
    pub r#type: QwenFunctionType,
    pub function: QwenChatToolFunction,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QwenChatToolFunction {
    pub name: String,
    pub description: String,
    /// JSON schema of the arguments.
    pub parameters: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum QwenChatToolChoice {
    Mode(QwenChatToolChoiceMode),
    Named(QwenChatNamedToolChoice),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QwenChatToolChoiceMode {
    None,
    Auto,
    Required,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QwenChatNamedToolChoice {
    #[serde(rename = "type")]
    pub r#type: QwenFunctionType,
    pub function: QwenFunctionName,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QwenFunctionName {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QwenChatResponseFormat {
    Text,
    JsonObject,
    JsonSchema { json_schema: QwenJsonSchema },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QwenJsonSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// Token usage reported by chat endpoints.
///
/// Unknown fields are kept so the raw usage can be surfaced unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct QwenChatUsage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_tokens_details: Option<QwenPromptTokensDetails>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct QwenPromptTokensDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_tokens: Option<u64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QwenChatResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<QwenChatChoice>,
    #[serde(default)]
    pub usage: Option<QwenChatUsage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QwenChatChoice {
    #[serde(default)]
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub index: u32,
    pub message: QwenChatResponseMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct QwenChatResponseMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub reasoning_content: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<QwenChatResponseToolCall>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QwenChatResponseToolCall {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub r#type: QwenFunctionType,
    pub function: QwenFunctionCall,
}

// ---------------------------------------------------------------------------
// Stream chunks
// ---------------------------------------------------------------------------

/// One SSE chunk: a content delta, or an error payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum QwenChatChunk {
    Data(QwenChatChunkData),
    Error(QwenErrorData),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QwenChatChunkData {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<QwenChatChunkChoice>,
    #[serde(default)]
    pub usage: Option<QwenChatUsage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QwenChatChunkChoice {
    #[serde(default)]
    pub delta: Option<QwenChatDelta>,
    #[serde(default)]
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub index: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct QwenChatDelta {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub reasoning_content: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<QwenChatToolCallDelta>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QwenChatToolCallDelta {
    pub index: u64,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub r#type: Option<QwenFunctionType>,
    #[serde(default)]
    pub function: Option<QwenFunctionDelta>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct QwenFunctionDelta {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub arguments: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn audio_format_keeps_unknown_values() {
        let f: AudioFormat = serde_json::from_value(json!("flac")).unwrap();
        assert_eq!(f, AudioFormat::Other("flac".to_string()));
        assert_eq!(serde_json::to_value(&f).unwrap(), json!("flac"));
        let wav: AudioFormat = serde_json::from_value(json!("wav")).unwrap();
        assert_eq!(wav, AudioFormat::Wav);
        assert_eq!(serde_json::to_value(AudioFormat::Mp3).unwrap(), json!("mp3"));
    }

    #[test]
    fn chunk_distinguishes_error_payload() {
        let err: QwenChatChunk = serde_json::from_value(json!({
            "error": { "message": "boom", "type": "server_error" }
        }))
        .unwrap();
        assert!(matches!(err, QwenChatChunk::Error(e) if e.error.message == "boom"));

        let data: QwenChatChunk = serde_json::from_value(json!({
            "id": "c1",
            "choices": [{ "index": 0, "delta": { "content": "hi" } }]
        }))
        .unwrap();
        assert!(matches!(data, QwenChatChunk::Data(_)));
    }

    #[test]
    fn tool_choice_serializes_as_string_or_object() {
        let auto = QwenChatToolChoice::Mode(QwenChatToolChoiceMode::Auto);
        assert_eq!(serde_json::to_value(&auto).unwrap(), json!("auto"));
        let named = QwenChatToolChoice::Named(QwenChatNamedToolChoice {
            r#type: QwenFunctionType::Function,
            function: QwenFunctionName {
                name: "lookup".to_string(),
            },
        });
        assert_eq!(
            serde_json::to_value(&named).unwrap(),
            json!({ "type": "function", "function": { "name": "lookup" } })
        );
    }

    #[test]
    fn request_omits_unset_fields() {
        let req = QwenChatRequest {
            model: "qwen-plus".to_string(),
            messages: vec![QwenChatMessage::User {
                content: QwenChatUserContent::Text("hi".to_string()),
            }],
            stream: None,
            stream_options: None,
            max_tokens: None,
            temperature: Some(0.5),
            stop: None,
            top_p: None,
            top_k: None,
            presence_penalty: None,
            frequency_penalty: None,
            response_format: Some(QwenChatResponseFormat::JsonObject),
            seed: None,
            tools: None,
            tool_choice: None,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "model": "qwen-plus",
                "messages": [{ "role": "user", "content": "hi" }],
                "temperature": 0.5,
                "response_format": { "type": "json_object" }
            })
        );
    }

    #[test]
    fn usage_keeps_unknown_fields() {
        let usage: QwenChatUsage = serde_json::from_value(json!({
            "prompt_tokens": 3,
            "completion_tokens": 4,
            "total_tokens": 7,
            "prompt_tokens_details": { "cached_tokens": 1 },
            "vendor_extra": true
        }))
        .unwrap();
        assert_eq!(usage.extra.get("vendor_extra"), Some(&json!(true)));
        assert_eq!(serde_json::to_value(&usage).unwrap()["vendor_extra"], json!(true));
    }
}
