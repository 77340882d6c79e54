//! Legacy text completions (`/completions`)

pub mod api;
pub mod model;
pub mod prompt;
pub mod stream;
pub mod usage;

pub use model::QwenCompletionLanguageModel;
pub use prompt::convert_to_qwen_completion_prompt;
pub use stream::CompletionStreamState;
pub use usage::convert_qwen_completion_usage;
