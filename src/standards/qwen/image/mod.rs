//! Image generation.

pub mod api;
pub mod model;

pub use model::QwenImageModel;
