//! Provider settings with builder-style setters.

use crate::streaming::IdGenerator;
use secrecy::SecretString;
use std::collections::HashMap;

pub const DEFAULT_BASE_URL: &str = "https://dashscope.aliyuncs.com/compatible-mode/v1";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://dashscope.aliyuncs.com/api/v1";

/// Settings for [`create_qwen`](super::create_qwen).
///
/// ```rust,ignore
/// use siumai_provider_qwen::providers::qwen::{QwenProviderSettings, create_qwen};
///
/// let qwen = create_qwen(
///     QwenProviderSettings::new()
///         .api_key("sk-...")
///         .header("X-DashScope-WorkSpace", "ws-123"),
/// )?;
/// ```
#[derive(Clone, Default)]
pub struct QwenProviderSettings {
    /// OpenAI-compatible API prefix, e.g. a proxy. Defaults to [`DEFAULT_BASE_URL`].
    pub base_url: Option<String>,
    /// DashScope native API prefix used for image generation.
    pub image_base_url: Option<String>,
    /// Defaults to the `DASHSCOPE_API_KEY` environment variable at request time.
    pub api_key: Option<SecretString>,
    pub headers: HashMap<String, String>,
    pub http_client: Option<reqwest::Client>,
    /// Id source for stream blocks and missing tool call ids.
    pub id_generator: Option<IdGenerator>,
}

impl QwenProviderSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn image_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.image_base_url = Some(base_url.into());
        self
    }

    pub fn api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    pub fn header<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn id_generator(mut self, generator: IdGenerator) -> Self {
        self.id_generator = Some(generator);
        self
    }
}

impl std::fmt::Debug for QwenProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QwenProviderSettings")
            .field("base_url", &self.base_url)
            .field("image_base_url", &self.image_base_url)
            .field("has_api_key", &self.api_key.is_some())
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Strip trailing slashes so paths can be appended directly.
pub(crate) fn without_trailing_slash(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
