//! HTTP plumbing shared by all Qwen models.

pub mod headers;
pub mod post;
