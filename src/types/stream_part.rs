//! Typed stream parts emitted by streaming calls.
//!
//! Mirrors the `LanguageModelV3StreamPart` union (kebab-case `type` tag) so the
//! output can be forwarded verbatim as JSON or SSE frames.

use crate::types::{
    LanguageModelV3FinishReason, LanguageModelV3ResponseMetadata, LanguageModelV3ToolCall,
    LanguageModelV3Usage, SharedV3ProviderMetadata, SharedV3Warning,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum LanguageModelV3StreamPart {
    TextStart {
        id: String,
    },
    TextDelta {
        id: String,
        delta: String,
    },
    TextEnd {
        id: String,
    },

    ReasoningStart {
        id: String,
    },
    ReasoningDelta {
        id: String,
        delta: String,
    },
    ReasoningEnd {
        id: String,
    },

    ToolInputStart {
        id: String,
        #[serde(rename = "toolName")]
        tool_name: String,
    },
    ToolInputDelta {
        id: String,
        delta: String,
    },
    ToolInputEnd {
        id: String,
    },

    ToolCall(LanguageModelV3ToolCall),

    StreamStart {
        warnings: Vec<SharedV3Warning>,
    },

    ResponseMetadata(LanguageModelV3ResponseMetadata),

    Finish {
        usage: LanguageModelV3Usage,
        #[serde(rename = "finishReason")]
        finish_reason: LanguageModelV3FinishReason,
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            rename = "providerMetadata"
        )]
        provider_metadata: Option<SharedV3ProviderMetadata>,
    },

    Raw {
        #[serde(rename = "rawValue")]
        raw_value: serde_json::Value,
    },

    Error {
        error: serde_json::Value,
    },
}

impl LanguageModelV3StreamPart {
    /// The block id for text/reasoning/tool-input parts.
    pub fn block_id(&self) -> Option<&str> {
        match self {
            LanguageModelV3StreamPart::TextStart { id }
            | LanguageModelV3StreamPart::TextDelta { id, .. }
            | LanguageModelV3StreamPart::TextEnd { id }
            | LanguageModelV3StreamPart::ReasoningStart { id }
            | LanguageModelV3StreamPart::ReasoningDelta { id, .. }
            | LanguageModelV3StreamPart::ReasoningEnd { id }
            | LanguageModelV3StreamPart::ToolInputStart { id, .. }
            | LanguageModelV3StreamPart::ToolInputDelta { id, .. }
            | LanguageModelV3StreamPart::ToolInputEnd { id } => Some(id),
            LanguageModelV3StreamPart::ToolCall(_)
            | LanguageModelV3StreamPart::StreamStart { .. }
            | LanguageModelV3StreamPart::ResponseMetadata(_)
            | LanguageModelV3StreamPart::Finish { .. }
            | LanguageModelV3StreamPart::Raw { .. }
            | LanguageModelV3StreamPart::Error { .. } => None,
        }
    }

    /// The `type` tag as it appears on the wire.
    pub fn type_name(&self) -> &'static str {
        match self {
            LanguageModelV3StreamPart::TextStart { .. } => "text-start",
            LanguageModelV3StreamPart::TextDelta { .. } => "text-delta",
            LanguageModelV3StreamPart::TextEnd { .. } => "text-end",
            LanguageModelV3StreamPart::ReasoningStart { .. } => "reasoning-start",
            LanguageModelV3StreamPart::ReasoningDelta { .. } => "reasoning-delta",
            LanguageModelV3StreamPart::ReasoningEnd { .. } => "reasoning-end",
            LanguageModelV3StreamPart::ToolInputStart { .. } => "tool-input-start",
            LanguageModelV3StreamPart::ToolInputDelta { .. } => "tool-input-delta",
            LanguageModelV3StreamPart::ToolInputEnd { .. } => "tool-input-end",
            LanguageModelV3StreamPart::ToolCall(_) => "tool-call",
            LanguageModelV3StreamPart::StreamStart { .. } => "stream-start",
            LanguageModelV3StreamPart::ResponseMetadata(_) => "response-metadata",
            LanguageModelV3StreamPart::Finish { .. } => "finish",
            LanguageModelV3StreamPart::Raw { .. } => "raw",
            LanguageModelV3StreamPart::Error { .. } => "error",
        }
    }
}
