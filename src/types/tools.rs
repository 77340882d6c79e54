//! Tool definition and tool choice types

use serde::{Deserialize, Serialize};

/// Tool made available to the model for a call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum LanguageModelV3Tool {
    /// User-defined function tool.
    Function {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        /// JSON schema for the function input.
        #[serde(rename = "inputSchema")]
        input_schema: serde_json::Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        strict: Option<bool>,
    },
    /// Tool implemented by a specific provider (e.g. hosted web search).
    ProviderDefined {
        id: String,
        name: String,
        #[serde(default)]
        args: serde_json::Value,
    },
}

impl LanguageModelV3Tool {
    /// Create a function tool.
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: serde_json::Value,
    ) -> Self {
        Self::Function {
            name: name.into(),
            description: Some(description.into()),
            input_schema,
            strict: None,
        }
    }

    /// The `type` tag as it appears in warnings.
    pub fn type_name(&self) -> &'static str {
        match self {
            LanguageModelV3Tool::Function { .. } => "function",
            LanguageModelV3Tool::ProviderDefined { .. } => "provider-defined",
        }
    }
}

/// How the model should pick tools.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum LanguageModelV3ToolChoice {
    Auto,
    None,
    Required,
    Tool {
        #[serde(rename = "toolName")]
        tool_name: String,
    },
}
