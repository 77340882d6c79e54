//! Protocol standards
//!
//! Wire-level mappings between the standardized model interfaces and
//! vendor APIs.

pub mod qwen;
