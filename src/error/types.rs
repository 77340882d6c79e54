//! Core error types.

use thiserror::Error;

/// Unified error type for every operation exposed by this crate.
#[derive(Debug, Clone, Error)]
pub enum LlmError {
    /// Transport-level failure (connect, send, read body).
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    JsonError(String),

    /// A payload could not be parsed into the expected shape.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The remote API answered with a non-success status.
    #[error("API error {code}: {message}")]
    ApiError {
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// No API key was configured and none was found in the environment.
    #[error("Missing API key: {0}")]
    MissingApiKey(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The prompt cannot be expressed for the target endpoint.
    #[error("Invalid prompt: {0}")]
    InvalidPrompt(String),

    /// The response violated the streaming protocol in a way that prevents
    /// further processing (e.g. a new tool call without an id).
    #[error("Invalid response data: {message}")]
    InvalidResponseData {
        message: String,
        data: serde_json::Value,
    },

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// The event stream failed mid-flight.
    #[error("Stream error: {0}")]
    StreamError(String),

    #[error("No such {model_type}: {model_id}")]
    NoSuchModel { model_id: String, model_type: String },

    #[error(
        "Too many values for a single embedding call. The {provider} model \"{model_id}\" can only embed up to {max_embeddings_per_call} values per call, but {values} values were provided."
    )]
    TooManyEmbeddingValues {
        provider: String,
        model_id: String,
        max_embeddings_per_call: usize,
        values: usize,
    },

    /// The caller aborted the request.
    #[error("Request cancelled")]
    Cancelled,

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Coarse classification used for retry decisions and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network / transport problems.
    Network,
    /// Authentication or authorization failures.
    Authentication,
    /// Rate limit hit (HTTP 429).
    RateLimit,
    /// The request was rejected as invalid (4xx).
    Client,
    /// The server failed (5xx).
    Server,
    /// Malformed data received from the server.
    Parsing,
    /// Local configuration or caller input problems.
    Validation,
    /// Feature not available for this provider/model.
    Unsupported,
    /// Caller aborted.
    Cancelled,
    Unknown,
}
