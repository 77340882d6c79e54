//! Provider-facing types
//!
//! The standardized call/result shapes exchanged with the orchestration layer.

mod call_options;
mod common;
mod prompt;
mod results;
mod stream_part;
mod tools;

pub use call_options::*;
pub use common::*;
pub use prompt::*;
pub use results::*;
pub use stream_part::*;
pub use tools::*;
