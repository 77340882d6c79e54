//! SSE chunk decoding
//!
//! Turns SSE `data:` payloads into [`ParseResult`]s. Decoding never fails the
//! stream: malformed payloads become `ParseResult::Failure`. Only transport
//! errors and cancellation surface as `Err`.

use crate::error::LlmError;
use crate::streaming::ParseResult;
use eventsource_stream::Eventsource;
use futures::Stream;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use std::pin::Pin;
use tokio_util::sync::CancellationToken;

/// Terminal SSE payload sent by OpenAI-compatible endpoints.
pub const DONE_MARKER: &str = "[DONE]";

pub type DecodedChunkStream<T> =
    Pin<Box<dyn Stream<Item = Result<ParseResult<T>, LlmError>> + Send>>;

/// Decode one SSE payload.
///
/// Invalid JSON keeps the payload as a JSON string in `raw_value`.
pub fn decode_event<T: DeserializeOwned>(data: &str) -> ParseResult<T> {
    let raw_value = match serde_json::from_str::<serde_json::Value>(data) {
        Ok(v) => v,
        Err(e) => {
            return ParseResult::Failure {
                error: LlmError::JsonError(format!("Invalid JSON in SSE payload: {e}")),
                raw_value: serde_json::Value::String(data.to_string()),
            };
        }
    };

    match serde_json::from_value::<T>(raw_value.clone()) {
        Ok(value) => ParseResult::Success { value, raw_value },
        Err(e) => ParseResult::Failure {
            error: LlmError::ParseError(format!("Type validation failed: {e}")),
            raw_value,
        },
    }
}

/// Convert a byte stream carrying SSE frames into decoded chunks.
///
/// - Empty payloads and the `[DONE]` marker are skipped.
/// - A transport error yields one `Err(StreamError)` and ends the stream.
/// - Cancelling `abort_signal` yields one `Err(Cancelled)` and ends the stream.
pub fn decode_event_stream<T, S, B, E>(
    byte_stream: S,
    abort_signal: Option<CancellationToken>,
) -> DecodedChunkStream<T>
where
    T: DeserializeOwned + Send + 'static,
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    let out = async_stream::stream! {
        let events = byte_stream.eventsource();
        futures_util::pin_mut!(events);

        loop {
            let next = match &abort_signal {
                Some(token) => tokio::select! {
                    biased;
                    _ = token.cancelled() => None,
                    item = events.next() => Some(item),
                },
                None => Some(events.next().await),
            };

            let Some(next) = next else {
                tracing::debug!("SSE stream aborted by caller");
                yield Err(LlmError::Cancelled);
                return;
            };
            let Some(item) = next else { break };
            let event = match item {
                Ok(ev) => ev,
                Err(e) => {
                    yield Err(LlmError::StreamError(format!("SSE stream error: {e}")));
                    return;
                }
            };

            let data = event.data.trim();
            if data.is_empty() || data == DONE_MARKER {
                continue;
            }

            yield Ok(decode_event::<T>(data));
        }
    };

    Box::pin(out)
}
