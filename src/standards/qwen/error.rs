//! Qwen error payloads and failed-response handling.

use crate::error::LlmError;
use serde::{Deserialize, Serialize};

/// Error body returned by the OpenAI-compatible endpoints, also sent as an SSE chunk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QwenErrorData {
    pub error: QwenErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QwenErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub r#type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Map a non-2xx response to `LlmError::ApiError`.
///
/// The vendor message is used when the body matches [`QwenErrorData`];
/// otherwise the body text (or a generic message for an empty body).
pub fn qwen_failed_response(status: u16, body: &str) -> LlmError {
    let details = serde_json::from_str::<serde_json::Value>(body).ok();
    let parsed = details
        .clone()
        .and_then(|v| serde_json::from_value::<QwenErrorData>(v).ok());

    match parsed {
        Some(data) => LlmError::ApiError {
            code: status,
            message: data.error.message,
            details,
        },
        None => LlmError::ApiError {
            code: status,
            message: if body.trim().is_empty() {
                format!("HTTP {status}")
            } else {
                body.to_string()
            },
            details,
        },
    }
}
