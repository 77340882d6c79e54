//! siumai-provider-qwen
//!
//! Qwen (Alibaba Cloud DashScope) provider for the siumai v3 model interfaces:
//! chat and legacy completion language models with streaming, text embeddings,
//! and image generation.
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use siumai_provider_qwen::prelude::*;
//!
//! let qwen = create_qwen(QwenProviderSettings::new().api_key("sk-..."))?;
//! let model = qwen.chat(models::chat::QWQ_PLUS);
//! let mut stream = model
//!     .do_stream(LanguageModelV3CallOptions::new(vec![
//!         LanguageModelV3Message::user("Why is the sky blue?"),
//!     ]))
//!     .await?
//!     .stream;
//! while let Some(part) = stream.next().await {
//!     println!("{:?}", part?);
//! }
//! ```
#![deny(unsafe_code)]

pub mod error;
pub mod execution;
pub mod observability;
pub mod providers;
pub mod standards;
pub mod streaming;
pub mod traits;
pub mod types;

pub use error::LlmError;
pub use providers::qwen::{QwenProvider, QwenProviderSettings, create_qwen};

/// Model id constants.
pub mod models {
    pub use crate::providers::qwen::models::*;
}

/// Commonly used items.
pub mod prelude {
    pub use crate::error::LlmError;
    pub use crate::models;
    pub use crate::providers::qwen::{QwenProvider, QwenProviderSettings, create_qwen};
    pub use crate::standards::qwen::{
        QwenChatLanguageModel, QwenCompletionLanguageModel, QwenEmbeddingModel, QwenImageModel,
    };
    pub use crate::traits::{EmbeddingModelV3, ImageModelV3, LanguageModelV3, ProviderV3};
    pub use crate::types::*;
}
