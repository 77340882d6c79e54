//! Chunk-to-part transformation loop.
//!
//! A [`StreamTransformer`] owns all per-call state. [`transform_stream`] drives
//! it: `stream-start`, then every decoded chunk, then the flush.

use crate::error::LlmError;
use crate::streaming::ParseResult;
use crate::types::{LanguageModelV3PartStream, LanguageModelV3StreamPart, SharedV3Warning};
use futures::Stream;
use futures_util::StreamExt;

/// Stateful conversion of decoded chunks into stream parts.
pub trait StreamTransformer: Send + 'static {
    type Chunk: Send + 'static;

    /// Handle one decoded chunk, appending the resulting parts to `out`.
    ///
    /// An `Err` is fatal: the stream ends after the parts already in `out`.
    fn process_chunk(
        &mut self,
        chunk: ParseResult<Self::Chunk>,
        out: &mut Vec<LanguageModelV3StreamPart>,
    ) -> Result<(), LlmError>;

    /// Close open blocks and emit the terminal `finish` part.
    fn flush(self, out: &mut Vec<LanguageModelV3StreamPart>);
}

/// Drive `transformer` over `chunks`.
///
/// An input error (transport failure, cancellation) is forwarded and the
/// stream ends without a `finish` part.
pub fn transform_stream<T, S>(
    chunks: S,
    warnings: Vec<SharedV3Warning>,
    mut transformer: T,
) -> LanguageModelV3PartStream
where
    T: StreamTransformer,
    S: Stream<Item = Result<ParseResult<T::Chunk>, LlmError>> + Send + 'static,
{
    let out = async_stream::stream! {
        yield Ok(LanguageModelV3StreamPart::StreamStart { warnings });

        futures_util::pin_mut!(chunks);
        let mut parts = Vec::new();

        while let Some(item) = chunks.next().await {
            let chunk = match item {
                Ok(chunk) => chunk,
                Err(e) => {
                    tracing::debug!(error = %e, "stream input ended early");
                    yield Err(e);
                    return;
                }
            };

            let res = transformer.process_chunk(chunk, &mut parts);
            for part in parts.drain(..) {
                yield Ok(part);
            }
            if let Err(e) = res {
                tracing::warn!(error = %e, "aborting stream");
                yield Err(e);
                return;
            }
        }

        transformer.flush(&mut parts);
        for part in parts.drain(..) {
            yield Ok(part);
        }
    };

    Box::pin(out)
}
