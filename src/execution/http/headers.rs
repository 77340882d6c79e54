//! HTTP Headers Utility
//!
//! Builders and helpers for request headers.

use crate::error::LlmError;
use crate::types::ResponseHeaders;
use reqwest::header::{
    AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT,
};
use std::collections::HashMap;

/// HTTP header builder for API requests
pub struct HttpHeaderBuilder {
    headers: HeaderMap,
}

impl HttpHeaderBuilder {
    pub fn new() -> Self {
        Self {
            headers: HeaderMap::new(),
        }
    }

    /// Add Bearer token authorization
    pub fn with_bearer_auth(mut self, token: &str) -> Result<Self, LlmError> {
        let auth_value = format!("Bearer {token}");
        self.headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value).map_err(|e| {
                LlmError::ConfigurationError(format!("Invalid API key format: {e}"))
            })?,
        );
        Ok(self)
    }

    /// Add JSON content type
    pub fn with_json_content_type(mut self) -> Self {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self
    }

    /// Append a suffix to the user agent (`<existing> <suffix>`).
    pub fn with_user_agent_suffix(mut self, suffix: &str) -> Result<Self, LlmError> {
        let value = match self.headers.get(USER_AGENT).and_then(|v| v.to_str().ok()) {
            Some(existing) if !existing.is_empty() => format!("{existing} {suffix}"),
            _ => suffix.to_string(),
        };
        self.headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&value)
                .map_err(|e| LlmError::ConfigurationError(format!("Invalid user agent: {e}")))?,
        );
        Ok(self)
    }

    /// Add multiple custom headers from a HashMap
    pub fn with_custom_headers(
        mut self,
        custom_headers: &HashMap<String, String>,
    ) -> Result<Self, LlmError> {
        for (key, value) in custom_headers {
            let (name, value) = parse_header(key, value)?;
            self.headers.insert(name, value);
        }
        Ok(self)
    }

    pub fn build(self) -> HeaderMap {
        self.headers
    }
}

impl Default for HttpHeaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), LlmError> {
    let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
        LlmError::ConfigurationError(format!("Invalid header name '{name}': {e}"))
    })?;
    let header_value = HeaderValue::from_str(value).map_err(|e| {
        LlmError::ConfigurationError(format!("Invalid header value for '{name}': {e}"))
    })?;
    Ok((header_name, header_value))
}

/// Merge extra headers into base headers.
///
/// Extra headers override base headers with the same name.
pub fn merge_headers(
    mut base: HeaderMap,
    extra: Option<&HashMap<String, String>>,
) -> Result<HeaderMap, LlmError> {
    if let Some(extra) = extra {
        for (key, value) in extra {
            let (name, value) = parse_header(key, value)?;
            base.insert(name, value);
        }
    }
    Ok(base)
}

/// Flatten response headers into string pairs, skipping non-UTF-8 values.
pub fn response_headers(headers: &HeaderMap) -> ResponseHeaders {
    headers
        .iter()
        .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
        .collect()
}
