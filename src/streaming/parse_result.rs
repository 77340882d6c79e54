//! Result of decoding one SSE payload.

use crate::error::LlmError;

/// One decoded chunk: either a value that matched the expected shape, or the
/// failure that prevented it. Both sides keep the untouched payload so it can
/// be re-emitted as a `raw` stream part.
#[derive(Debug, Clone)]
pub enum ParseResult<T> {
    Success {
        value: T,
        raw_value: serde_json::Value,
    },
    Failure {
        error: LlmError,
        raw_value: serde_json::Value,
    },
}

impl<T> ParseResult<T> {
    pub fn raw_value(&self) -> &serde_json::Value {
        match self {
            ParseResult::Success { raw_value, .. } | ParseResult::Failure { raw_value, .. } => {
                raw_value
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ParseResult::Success { .. })
    }
}
