//! Standardized prompt: role-tagged messages made of typed content parts.

use serde::{Deserialize, Serialize};

/// Binary or referenced file payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum LanguageModelV3FileData {
    /// Remote resource (`http(s)://` or `data:` URL).
    Url(UrlData),
    /// Base64-encoded content.
    Base64(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
}

/// Wrapper distinguishing a URL from a base64 string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UrlData {
    pub url: String,
}

impl LanguageModelV3FileData {
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url(UrlData { url: url.into() })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LanguageModelV3FilePart {
    #[serde(rename = "mediaType")]
    pub media_type: String,
    pub data: LanguageModelV3FileData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// Output of an executed tool, as sent back to the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum LanguageModelV3ToolResultOutput {
    Text {
        value: String,
    },
    Json {
        value: serde_json::Value,
    },
    ExecutionDenied {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    ErrorText {
        value: String,
    },
    ErrorJson {
        value: serde_json::Value,
    },
    Content {
        value: serde_json::Value,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LanguageModelV3ToolCallPart {
    #[serde(rename = "toolCallId")]
    pub tool_call_id: String,
    #[serde(rename = "toolName")]
    pub tool_name: String,
    pub input: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LanguageModelV3ToolResultPart {
    #[serde(rename = "toolCallId")]
    pub tool_call_id: String,
    #[serde(rename = "toolName")]
    pub tool_name: String,
    pub output: LanguageModelV3ToolResultOutput,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LanguageModelV3ToolApprovalResponsePart {
    #[serde(rename = "approvalId")]
    pub approval_id: String,
    pub approved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Content allowed in user messages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum UserContentPart {
    Text { text: String },
    File(LanguageModelV3FilePart),
}

/// Content allowed in assistant messages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AssistantContentPart {
    Text { text: String },
    File(LanguageModelV3FilePart),
    Reasoning { text: String },
    ToolCall(LanguageModelV3ToolCallPart),
    ToolResult(LanguageModelV3ToolResultPart),
}

/// Content allowed in tool messages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ToolContentPart {
    ToolResult(LanguageModelV3ToolResultPart),
    ToolApprovalResponse(LanguageModelV3ToolApprovalResponsePart),
}

/// One prompt message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum LanguageModelV3Message {
    System { content: String },
    User { content: Vec<UserContentPart> },
    Assistant { content: Vec<AssistantContentPart> },
    Tool { content: Vec<ToolContentPart> },
}

impl LanguageModelV3Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self::System {
            content: content.into(),
        }
    }

    /// User message with a single text part.
    pub fn user(text: impl Into<String>) -> Self {
        Self::User {
            content: vec![UserContentPart::Text { text: text.into() }],
        }
    }

    /// Assistant message with a single text part.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::Assistant {
            content: vec![AssistantContentPart::Text { text: text.into() }],
        }
    }
}

pub type LanguageModelV3Prompt = Vec<LanguageModelV3Message>;
