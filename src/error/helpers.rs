//! Error helpers: constructors and classification.

use super::types::{ErrorCategory, LlmError};

impl LlmError {
    /// Shorthand for an `ApiError` without details.
    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Shorthand for `InvalidResponseData`.
    pub fn invalid_response_data(message: impl Into<String>, data: serde_json::Value) -> Self {
        Self::InvalidResponseData {
            message: message.into(),
            data,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            LlmError::HttpError(_) | LlmError::StreamError(_) => ErrorCategory::Network,
            LlmError::ApiError { code, .. } => match *code {
                401 | 403 => ErrorCategory::Authentication,
                429 => ErrorCategory::RateLimit,
                400..=499 => ErrorCategory::Client,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Unknown,
            },
            LlmError::MissingApiKey(_) => ErrorCategory::Authentication,
            LlmError::JsonError(_)
            | LlmError::ParseError(_)
            | LlmError::InvalidResponseData { .. } => ErrorCategory::Parsing,
            LlmError::ConfigurationError(_)
            | LlmError::InvalidParameter(_)
            | LlmError::InvalidPrompt(_)
            | LlmError::TooManyEmbeddingValues { .. } => ErrorCategory::Validation,
            LlmError::UnsupportedOperation(_) | LlmError::NoSuchModel { .. } => {
                ErrorCategory::Unsupported
            }
            LlmError::Cancelled => ErrorCategory::Cancelled,
            LlmError::InternalError(_) => ErrorCategory::Unknown,
        }
    }

    /// Whether a caller-side retry could plausibly succeed.
    ///
    /// Mirrors the API-call retry classification: request timeout, conflict,
    /// rate limit and server errors are retryable, as are transport failures.
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::ApiError { code, .. } => {
                matches!(*code, 408 | 409 | 429) || (500..=599).contains(code)
            }
            LlmError::HttpError(_) | LlmError::StreamError(_) => true,
            _ => false,
        }
    }
}
