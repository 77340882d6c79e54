//! Provider implementations

pub mod qwen;
