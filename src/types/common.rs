//! Shared v3 types: finish reasons, usage, warnings and response metadata.

use serde::{Deserialize, Serialize};

/// Provider metadata object keyed by provider name.
///
/// Kept permissive (`Record<string, JSONObject>`) for forward compatibility.
pub type SharedV3ProviderMetadata = serde_json::Map<String, serde_json::Value>;

/// Build the `{ "qwen": {} }` metadata object attached to results.
pub fn qwen_provider_metadata() -> SharedV3ProviderMetadata {
    let mut map = serde_json::Map::new();
    map.insert(
        "qwen".to_string(),
        serde_json::Value::Object(serde_json::Map::new()),
    );
    map
}

/// Call warning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SharedV3Warning {
    Unsupported {
        feature: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
    Compatibility {
        feature: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
    Other {
        message: String,
    },
}

impl SharedV3Warning {
    pub fn unsupported(feature: impl Into<String>) -> Self {
        Self::Unsupported {
            feature: feature.into(),
            details: None,
        }
    }

    pub fn unsupported_with_details(feature: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Unsupported {
            feature: feature.into(),
            details: Some(details.into()),
        }
    }
}

/// Normalized reason a generation stopped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    ToolCalls,
    Error,
    #[default]
    Other,
}

impl FinishReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinishReason::Stop => "stop",
            FinishReason::Length => "length",
            FinishReason::ContentFilter => "content-filter",
            FinishReason::ToolCalls => "tool-calls",
            FinishReason::Error => "error",
            FinishReason::Other => "other",
        }
    }
}

impl std::fmt::Display for FinishReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Finish reason with the raw vendor value preserved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct LanguageModelV3FinishReason {
    pub unified: FinishReason,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl LanguageModelV3FinishReason {
    pub fn new(unified: FinishReason, raw: Option<String>) -> Self {
        Self { unified, raw }
    }

    /// Finish reason recorded after a failed or error chunk.
    pub fn error() -> Self {
        Self {
            unified: FinishReason::Error,
            raw: None,
        }
    }
}

/// Response metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LanguageModelV3ResponseMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "modelId")]
    pub model_id: Option<String>,
}

/// Token usage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LanguageModelV3Usage {
    #[serde(rename = "inputTokens")]
    pub input_tokens: LanguageModelV3InputTokens,
    #[serde(rename = "outputTokens")]
    pub output_tokens: LanguageModelV3OutputTokens,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LanguageModelV3InputTokens {
    pub total: Option<u64>,
    #[serde(rename = "noCache")]
    pub no_cache: Option<u64>,
    #[serde(rename = "cacheRead")]
    pub cache_read: Option<u64>,
    #[serde(rename = "cacheWrite")]
    pub cache_write: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LanguageModelV3OutputTokens {
    pub total: Option<u64>,
    pub text: Option<u64>,
    pub reasoning: Option<u64>,
}

/// Tool call produced by the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LanguageModelV3ToolCall {
    #[serde(rename = "toolCallId")]
    pub tool_call_id: String,
    #[serde(rename = "toolName")]
    pub tool_name: String,
    /// Stringified JSON tool arguments.
    pub input: String,
}
