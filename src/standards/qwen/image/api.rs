//! DashScope multimodal-generation wire types.

use crate::error::LlmError;
use serde::{Deserialize, Serialize};

/// Output size as `{width}*{height}`; the preset sizes are the ones the
/// `qwen-image` family documents, anything else is passed through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QwenImageSize {
    /// 1664*928 (16:9)
    Landscape16x9,
    /// 1472*1140 (4:3)
    Landscape4x3,
    /// 1328*1328 (1:1)
    Square,
    /// 1140*1472 (3:4)
    Portrait3x4,
    /// 928*1664 (9:16)
    Portrait9x16,
    Other(String),
}

impl QwenImageSize {
    /// Parse a `{width}x{height}` size into the `*`-separated form.
    pub fn from_size(size: &str) -> Self {
        Self::from(size.replacen('x', "*", 1))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Landscape16x9 => "1664*928",
            Self::Landscape4x3 => "1472*1140",
            Self::Square => "1328*1328",
            Self::Portrait3x4 => "1140*1472",
            Self::Portrait9x16 => "928*1664",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for QwenImageSize {
    fn from(value: String) -> Self {
        match value.as_str() {
            "1664*928" => Self::Landscape16x9,
            "1472*1140" => Self::Landscape4x3,
            "1328*1328" => Self::Square,
            "1140*1472" => Self::Portrait3x4,
            "928*1664" => Self::Portrait9x16,
            _ => Self::Other(value),
        }
    }
}

impl From<QwenImageSize> for String {
    fn from(value: QwenImageSize) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QwenImageRequest {
    pub model: String,
    pub input: QwenImageInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<QwenImageParameters>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QwenImageInput {
    pub messages: Vec<QwenImageMessage>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QwenImageRole {
    User,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QwenImageMessage {
    pub role: QwenImageRole,
    pub content: Vec<QwenImageContent>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum QwenImageContent {
    Text { text: String },
    Image { image: String },
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct QwenImageParameters {
    /// Content the image should avoid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<QwenImageSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_extend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watermark: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct QwenImageResponse {
    pub output: QwenImageOutput,
    #[serde(default)]
    pub usage: Option<QwenImageUsage>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct QwenImageOutput {
    pub choices: Vec<QwenImageChoice>,
    #[serde(default)]
    pub finished: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct QwenImageChoice {
    #[serde(default)]
    pub finish_reason: Option<String>,
    pub message: QwenImageResponseMessage,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct QwenImageResponseMessage {
    pub role: String,
    pub content: Vec<QwenImageResponseContent>,
}

/// A content entry; only entries carrying an `image` URL are downloaded.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct QwenImageResponseContent {
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct QwenImageUsage {
    #[serde(default)]
    pub image_count: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// Error body of the native DashScope API.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct QwenImageErrorData {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
}

/// Map a non-2xx image response to `LlmError::ApiError` using the `message` field.
pub fn qwen_image_failed_response(status: u16, body: &str) -> LlmError {
    let details = serde_json::from_str::<serde_json::Value>(body).ok();
    let message = details
        .clone()
        .and_then(|v| serde_json::from_value::<QwenImageErrorData>(v).ok())
        .map(|data| data.message)
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("HTTP {status}")
            } else {
                body.to_string()
            }
        });
    LlmError::ApiError {
        code: status,
        message,
        details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn size_converts_separator_and_recognizes_presets() {
        assert_eq!(QwenImageSize::from_size("1328x1328"), QwenImageSize::Square);
        assert_eq!(
            QwenImageSize::from_size("1024x768"),
            QwenImageSize::Other("1024*768".to_string())
        );
        assert_eq!(
            serde_json::to_value(QwenImageSize::Landscape16x9).unwrap(),
            json!("1664*928")
        );
    }

    #[test]
    fn content_serializes_without_tag() {
        let message = QwenImageMessage {
            role: QwenImageRole::User,
            content: vec![QwenImageContent::Text {
                text: "a cat".into(),
            }],
        };
        assert_eq!(
            serde_json::to_value(message).unwrap(),
            json!({ "role": "user", "content": [{ "text": "a cat" }] })
        );
    }

    #[test]
    fn image_error_uses_message() {
        let body = r#"{"code":"InvalidParameter","message":"size is invalid","request_id":"r"}"#;
        match qwen_image_failed_response(400, body) {
            LlmError::ApiError {
                code,
                message,
                details,
            } => {
                assert_eq!(code, 400);
                assert_eq!(message, "size is invalid");
                assert_eq!(details.unwrap()["code"], "InvalidParameter");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(
            qwen_image_failed_response(502, ""),
            LlmError::ApiError { message, .. } if message == "HTTP 502"
        ));
    }
}
