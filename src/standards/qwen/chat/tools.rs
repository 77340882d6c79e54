//! Tool definitions and tool choice for chat requests.

use super::api::{
    QwenChatNamedToolChoice, QwenChatTool, QwenChatToolChoice, QwenChatToolChoiceMode,
    QwenChatToolFunction, QwenFunctionName, QwenFunctionType,
};
use crate::types::{LanguageModelV3Tool, LanguageModelV3ToolChoice, SharedV3Warning};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreparedChatTools {
    pub tools: Option<Vec<QwenChatTool>>,
    pub tool_choice: Option<QwenChatToolChoice>,
    pub tool_warnings: Vec<SharedV3Warning>,
}

/// Map standardized tools and tool choice to the Qwen request shape.
///
/// An empty tool list is treated as no tools; the tool choice is then dropped too.
pub fn prepare_chat_tools(
    tools: Option<&[LanguageModelV3Tool]>,
    tool_choice: Option<&LanguageModelV3ToolChoice>,
) -> PreparedChatTools {
    let Some(tools) = tools.filter(|t| !t.is_empty()) else {
        return PreparedChatTools::default();
    };

    let mut tool_warnings = Vec::new();
    let mut chat_tools = Vec::with_capacity(tools.len());

    for tool in tools {
        match tool {
            LanguageModelV3Tool::Function {
                name,
                description,
                input_schema,
                strict,
            } => chat_tools.push(QwenChatTool {
                r#type: QwenFunctionType::Function,
                function: QwenChatToolFunction {
                    name: name.clone(),
                    description: description.clone().unwrap_or_default(),
                    parameters: input_schema.clone(),
                    strict: *strict,
                },
            }),
            LanguageModelV3Tool::ProviderDefined { .. } => {
                tool_warnings.push(SharedV3Warning::unsupported(format!(
                    "tool type: {}",
                    tool.type_name()
                )));
            }
        }
    }

    let tool_choice = tool_choice.map(|choice| match choice {
        LanguageModelV3ToolChoice::Auto => QwenChatToolChoice::Mode(QwenChatToolChoiceMode::Auto),
        LanguageModelV3ToolChoice::None => QwenChatToolChoice::Mode(QwenChatToolChoiceMode::None),
        LanguageModelV3ToolChoice::Required => {
            QwenChatToolChoice::Mode(QwenChatToolChoiceMode::Required)
        }
        LanguageModelV3ToolChoice::Tool { tool_name } => {
            QwenChatToolChoice::Named(QwenChatNamedToolChoice {
                r#type: QwenFunctionType::Function,
                function: QwenFunctionName {
                    name: tool_name.clone(),
                },
            })
        }
    });

    PreparedChatTools {
        tools: Some(chat_tools),
        tool_choice,
        tool_warnings,
    }
}
