//! Text embeddings.

pub mod api;
pub mod model;
pub mod options;

pub use model::QwenEmbeddingModel;
pub use options::QwenEmbeddingProviderOptions;
