//! Error Handling Module
//!
//! This module provides error handling for the Qwen provider, including:
//! - Core error types (`LlmError`, `ErrorCategory`)
//! - Helpers for classification and user-facing messages
//! - Type conversions from common error types
//!
//! # Example
//!
//! ```rust,ignore
//! use siumai_provider_qwen::error::{LlmError, ErrorCategory};
//!
//! let error = LlmError::api_error(404, "Not found");
//! assert_eq!(error.category(), ErrorCategory::Client);
//! assert!(!error.is_retryable());
//! ```

mod conversions;
pub mod helpers;
pub mod types;

pub use types::*;
