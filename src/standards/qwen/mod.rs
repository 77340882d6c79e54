//! Qwen (DashScope) protocol mapping.
//!
//! Request/response types and the conversions between them and the
//! standardized model interfaces. Chat, completion and embedding use the
//! OpenAI-compatible endpoints; image generation uses the native API.

pub mod chat;
pub mod completion;
pub mod embedding;
pub mod error;
pub mod finish_reason;
pub mod image;
pub mod response_metadata;

pub use chat::QwenChatLanguageModel;
pub use completion::QwenCompletionLanguageModel;
pub use embedding::QwenEmbeddingModel;
pub use image::QwenImageModel;
