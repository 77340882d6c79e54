//! Model and provider traits
//!
//! Object-safe, `async_trait`-based interfaces mirroring the v3 provider
//! contract: language, embedding and image models plus the provider factory.

mod embedding;
mod image;
mod language_model;
mod provider;

pub use embedding::EmbeddingModelV3;
pub use image::ImageModelV3;
pub use language_model::LanguageModelV3;
pub use provider::ProviderV3;
