//! Per-model configuration shared by all Qwen models.

use crate::error::LlmError;
use crate::execution::http::headers::{HttpHeaderBuilder, merge_headers};
use crate::streaming::IdGenerator;
use reqwest::header::HeaderMap;
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;

/// Environment variable consulted when no API key is configured.
pub const API_KEY_ENV_VAR: &str = "DASHSCOPE_API_KEY";

/// User agent suffix appended to every request.
pub const USER_AGENT_SUFFIX: &str = concat!("siumai-provider-qwen/", env!("CARGO_PKG_VERSION"));

/// Everything a model needs to talk to the API.
#[derive(Clone)]
pub struct QwenConfig {
    /// Provider id reported by the model, e.g. `qwen.chat`.
    pub provider: String,
    pub base_url: String,
    pub api_key: Option<SecretString>,
    pub headers: HashMap<String, String>,
    pub http_client: reqwest::Client,
    pub generate_id: IdGenerator,
}

impl QwenConfig {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Resolve the API key: configured key first, then `DASHSCOPE_API_KEY`.
    pub fn load_api_key(&self) -> Result<SecretString, LlmError> {
        if let Some(key) = &self.api_key {
            return Ok(key.clone());
        }
        match std::env::var(API_KEY_ENV_VAR) {
            Ok(key) if !key.trim().is_empty() => Ok(SecretString::from(key)),
            _ => Err(LlmError::MissingApiKey(format!(
                "Qwen API key is missing. Pass it using the 'api_key' setting or the {API_KEY_ENV_VAR} environment variable."
            ))),
        }
    }

    /// Request headers: bearer auth, JSON content type, provider headers, user agent,
    /// then the per-call `extra` headers on top.
    pub fn headers(&self, extra: Option<&HashMap<String, String>>) -> Result<HeaderMap, LlmError> {
        let api_key = self.load_api_key()?;
        let base = HttpHeaderBuilder::new()
            .with_bearer_auth(api_key.expose_secret())?
            .with_json_content_type()
            .with_custom_headers(&self.headers)?
            .with_user_agent_suffix(USER_AGENT_SUFFIX)?
            .build();
        merge_headers(base, extra)
    }
}

impl std::fmt::Debug for QwenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QwenConfig")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("has_api_key", &self.api_key.is_some())
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}
