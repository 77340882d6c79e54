//! Streaming Module
//!
//! Protocol-agnostic streaming helpers:
//! - SSE payload decoding into tagged parse results
//! - the start/chunk/flush driver for stateful transformers
//! - identifier generation for stream blocks
//! - JSON completeness checks for streamed tool arguments

mod decode;
mod id;
mod json;
mod parse_result;
mod transform;

pub use decode::*;
pub use id::*;
pub use json::*;
pub use parse_result::*;
pub use transform::*;
