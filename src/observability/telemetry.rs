//! Tracing subscriber setup
//!
//! The crate only emits `tracing` events; applications that do not install
//! their own subscriber can use these helpers.
//!
//! ```rust,ignore
//! use siumai_provider_qwen::observability::telemetry::{init_subscriber, OutputFormat, SubscriberConfig};
//!
//! init_subscriber(
//!     SubscriberConfig::builder()
//!         .log_level(tracing::Level::DEBUG)
//!         .output_format(OutputFormat::Json)
//!         .build(),
//! )?;
//! ```

use crate::error::LlmError;
use std::str::FromStr;

/// Environment variable read by [`init_from_env`] for the log level.
pub const LOG_LEVEL_ENV_VAR: &str = "QWEN_LOG_LEVEL";
/// Environment variable read by [`init_from_env`] for the output format.
pub const LOG_FORMAT_ENV_VAR: &str = "QWEN_LOG_FORMAT";

const CRATE_TARGET: &str = "siumai_provider_qwen";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    Json,
    /// Single-line JSON
    JsonCompact,
}

impl FromStr for OutputFormat {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "json-compact" => Ok(Self::JsonCompact),
            _ => Err(LlmError::ConfigurationError(format!(
                "Invalid log format: {s}. Valid options: text, json, json-compact"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubscriberConfig {
    pub log_level: tracing::Level,
    pub output_format: OutputFormat,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            log_level: tracing::Level::INFO,
            output_format: OutputFormat::Text,
        }
    }
}

impl SubscriberConfig {
    pub fn builder() -> SubscriberConfigBuilder {
        SubscriberConfigBuilder::default()
    }

    pub fn debug() -> Self {
        Self {
            log_level: tracing::Level::DEBUG,
            output_format: OutputFormat::Text,
        }
    }

    /// `tracing-subscriber` filter directive scoped to this crate.
    pub fn filter_directive(&self) -> String {
        format!(
            "{CRATE_TARGET}={}",
            self.log_level.as_str().to_lowercase()
        )
    }
}

#[derive(Debug, Default)]
pub struct SubscriberConfigBuilder {
    log_level: Option<tracing::Level>,
    output_format: Option<OutputFormat>,
}

impl SubscriberConfigBuilder {
    pub fn log_level(mut self, level: tracing::Level) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Parse `trace`, `debug`, `info`, `warn` or `error`.
    pub fn log_level_str(mut self, level: &str) -> Result<Self, LlmError> {
        let parsed = tracing::Level::from_str(level).map_err(|_| {
            LlmError::ConfigurationError(format!(
                "Invalid log level: {level}. Valid options: trace, debug, info, warn, error"
            ))
        })?;
        self.log_level = Some(parsed);
        Ok(self)
    }

    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    pub fn build(self) -> SubscriberConfig {
        SubscriberConfig {
            log_level: self.log_level.unwrap_or(tracing::Level::INFO),
            output_format: self.output_format.unwrap_or_default(),
        }
    }
}

/// Install a global `fmt` subscriber. An already-installed subscriber is left in place.
pub fn init_subscriber(config: SubscriberConfig) -> Result<(), LlmError> {
    let filter = config.filter_directive();

    let init_result = match config.output_format {
        OutputFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .json()
            .try_init(),
        OutputFormat::JsonCompact => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .flatten_event(true)
            .try_init(),
        OutputFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
    };

    match init_result {
        Ok(()) => Ok(()),
        Err(e) if e.to_string().contains("already") => Ok(()),
        Err(e) => Err(LlmError::ConfigurationError(format!(
            "Failed to initialize tracing: {e}"
        ))),
    }
}

pub fn init_default() -> Result<(), LlmError> {
    init_subscriber(SubscriberConfig::default())
}

pub fn init_debug() -> Result<(), LlmError> {
    init_subscriber(SubscriberConfig::debug())
}

/// Configure from `QWEN_LOG_LEVEL` and `QWEN_LOG_FORMAT`; unset variables keep the defaults.
pub fn init_from_env() -> Result<(), LlmError> {
    init_subscriber(config_from_lookup(|name| std::env::var(name).ok())?)
}

fn config_from_lookup(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<SubscriberConfig, LlmError> {
    let mut builder = SubscriberConfig::builder();
    if let Some(level) = lookup(LOG_LEVEL_ENV_VAR) {
        builder = builder.log_level_str(&level)?;
    }
    if let Some(format) = lookup(LOG_FORMAT_ENV_VAR) {
        builder = builder.output_format(format.parse()?);
    }
    Ok(builder.build())
}
