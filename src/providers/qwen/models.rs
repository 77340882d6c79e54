//! Qwen model id constants
//!
//! Any string is accepted as a model id; these are the commonly used ones.

/// Chat models (`/chat/completions`)
pub mod chat {
    pub const QWEN_MAX: &str = "qwen-max";
    pub const QWEN_PLUS: &str = "qwen-plus";
    pub const QWEN_TURBO: &str = "qwen-turbo";
    pub const QWEN_FLASH: &str = "qwen-flash";
    pub const QWEN_LONG: &str = "qwen-long";
    pub const QWEN3_MAX: &str = "qwen3-max";
    pub const QWEN_VL_MAX: &str = "qwen-vl-max";
    pub const QWEN_VL_PLUS: &str = "qwen-vl-plus";
    pub const QWEN_OMNI_TURBO: &str = "qwen-omni-turbo";
    /// Reasoning model; streams `reasoning_content`.
    pub const QWQ_PLUS: &str = "qwq-plus";
    pub const QWEN3_CODER_PLUS: &str = "qwen3-coder-plus";
}

/// Legacy completion models (`/completions`)
pub mod completion {
    pub const QWEN2_5_CODER_32B_INSTRUCT: &str = "qwen2.5-coder-32b-instruct";
    pub const QWEN_CODER_TURBO: &str = "qwen-coder-turbo";
}

/// Embedding models (`/embeddings`)
pub mod embedding {
    pub const TEXT_EMBEDDING_V4: &str = "text-embedding-v4";
    pub const TEXT_EMBEDDING_V3: &str = "text-embedding-v3";
    pub const TEXT_EMBEDDING_V2: &str = "text-embedding-v2";
    pub const TEXT_EMBEDDING_V1: &str = "text-embedding-v1";
}

/// Image generation models (DashScope multimodal generation)
pub mod image {
    pub const QWEN_IMAGE: &str = "qwen-image";
    pub const QWEN_IMAGE_PLUS: &str = "qwen-image-plus";
}
