//! Qwen Provider Module
//!
//! Alibaba Cloud Model Studio (DashScope) models behind the standardized
//! model interfaces.
//!
//! # Architecture
//! - `settings.rs` - Provider settings with builder-style setters
//! - `config.rs` - Per-model configuration (URL, headers, HTTP client)
//! - `provider.rs` - Model factory implementing `ProviderV3`
//! - `models.rs` - Common model id constants
//!
//! # Example Usage
//! ```rust,ignore
//! use siumai_provider_qwen::prelude::*;
//!
//! let qwen = create_qwen(QwenProviderSettings::new())?;
//! let model = qwen.chat(models::chat::QWEN_PLUS);
//! let result = model
//!     .do_generate(LanguageModelV3CallOptions::new(vec![
//!         LanguageModelV3Message::user("Hello"),
//!     ]))
//!     .await?;
//! println!("{}", result.text());
//! ```

pub mod config;
pub mod models;
pub mod provider;
pub mod settings;

pub use config::QwenConfig;
pub use provider::{QwenProvider, create_qwen};
pub use settings::QwenProviderSettings;
