//! Chat completions (`/chat/completions`)

pub mod api;
pub mod messages;
pub mod model;
pub mod stream;
pub mod tools;
pub mod usage;

pub use messages::convert_to_qwen_chat_messages;
pub use model::QwenChatLanguageModel;
pub use stream::ChatStreamState;
pub use tools::prepare_chat_tools;
pub use usage::convert_qwen_chat_usage;
