//! JSON helpers used while accumulating streamed tool arguments.

use serde::de::IgnoredAny;

/// Whether `text` is a complete, syntactically valid JSON document.
///
/// Empty and whitespace-only input is not parsable.
pub fn is_parsable_json(text: &str) -> bool {
    serde_json::from_str::<IgnoredAny>(text).is_ok()
}
