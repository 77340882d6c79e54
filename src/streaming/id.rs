//! Identifier generation for stream blocks and tool calls.

use rand::Rng;
use rand::distributions::Alphanumeric;
use std::sync::Arc;

/// Produces a fresh identifier on every call.
pub type IdGenerator = Arc<dyn Fn() -> String + Send + Sync>;

const ID_LENGTH: usize = 16;

/// Random 16-character alphanumeric id.
pub fn generate_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ID_LENGTH)
        .map(char::from)
        .collect()
}

pub fn default_id_generator() -> IdGenerator {
    Arc::new(generate_id)
}
