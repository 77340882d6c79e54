//! JSON POST helpers
//!
//! Thin wrappers around `reqwest` that apply a provider-specific failure
//! handler to non-success responses and honor the caller's abort signal.

use crate::error::LlmError;
use crate::execution::http::headers::response_headers;
use crate::types::ResponseHeaders;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Maps a non-success response (status, body text) to an error.
pub type FailedResponseHandler = fn(u16, &str) -> LlmError;

/// Decoded JSON response.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub headers: ResponseHeaders,
    pub value: T,
    pub raw_value: serde_json::Value,
}

/// Successful event-stream response; the body has not been read yet.
#[derive(Debug)]
pub struct EventStreamResponse {
    pub headers: ResponseHeaders,
    pub response: reqwest::Response,
}

/// Race `fut` against the abort signal.
pub async fn with_abort<F, T>(fut: F, abort_signal: Option<&CancellationToken>) -> Result<T, LlmError>
where
    F: Future<Output = Result<T, LlmError>>,
{
    match abort_signal {
        Some(token) => tokio::select! {
            biased;
            _ = token.cancelled() => Err(LlmError::Cancelled),
            res = fut => res,
        },
        None => fut.await,
    }
}

async fn send_json(
    client: &reqwest::Client,
    url: &str,
    headers: HeaderMap,
    body: &serde_json::Value,
    on_failure: FailedResponseHandler,
) -> Result<reqwest::Response, LlmError> {
    let response = client.post(url).headers(headers).json(body).send().await?;
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        tracing::warn!(url, status = status.as_u16(), "Qwen API request failed");
        return Err(on_failure(status.as_u16(), &text));
    }
    Ok(response)
}

/// POST a JSON body and decode the JSON response into `T`.
pub async fn post_json_to_api<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    headers: HeaderMap,
    body: &serde_json::Value,
    on_failure: FailedResponseHandler,
    abort_signal: Option<&CancellationToken>,
) -> Result<ApiResponse<T>, LlmError> {
    tracing::debug!(url, stream = false, "POST");
    with_abort(
        async {
            let response = send_json(client, url, headers, body, on_failure).await?;
            let headers = response_headers(response.headers());
            let text = response.text().await?;
            let raw_value: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
                LlmError::ParseError(format!("Invalid JSON response: {e}"))
            })?;
            let value = serde_json::from_value::<T>(raw_value.clone()).map_err(|e| {
                LlmError::ParseError(format!("Type validation failed: {e}"))
            })?;
            Ok(ApiResponse {
                headers,
                value,
                raw_value,
            })
        },
        abort_signal,
    )
    .await
}

/// POST a JSON body expecting a `text/event-stream` response.
pub async fn post_json_to_event_stream(
    client: &reqwest::Client,
    url: &str,
    headers: HeaderMap,
    body: &serde_json::Value,
    on_failure: FailedResponseHandler,
    abort_signal: Option<&CancellationToken>,
) -> Result<EventStreamResponse, LlmError> {
    tracing::debug!(url, stream = true, "POST");
    let mut headers = headers;
    headers.insert(
        reqwest::header::ACCEPT,
        reqwest::header::HeaderValue::from_static("text/event-stream"),
    );
    with_abort(
        async {
            let response = send_json(client, url, headers, body, on_failure).await?;
            Ok(EventStreamResponse {
                headers: response_headers(response.headers()),
                response,
            })
        },
        abort_signal,
    )
    .await
}

/// GET a binary resource (e.g. a generated image URL).
pub async fn get_bytes(
    client: &reqwest::Client,
    url: &str,
    abort_signal: Option<&CancellationToken>,
) -> Result<Vec<u8>, LlmError> {
    tracing::debug!(url, "GET");
    with_abort(
        async {
            let response = client.get(url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(LlmError::api_error(
                    status.as_u16(),
                    format!("Failed to download {url}"),
                ));
            }
            Ok(response.bytes().await?.to_vec())
        },
        abort_signal,
    )
    .await
}
