//! Shared helpers for Qwen mock-server tests.
#![allow(dead_code)]

use futures::StreamExt;
use siumai_provider_qwen::prelude::*;
use siumai_provider_qwen::streaming::IdGenerator;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use wiremock::MockServer;

pub const API_KEY: &str = "sk-test";

/// Ids `id-0`, `id-1`, ... in call order.
pub fn sequential_ids() -> IdGenerator {
    let counter = Arc::new(AtomicUsize::new(0));
    Arc::new(move || format!("id-{}", counter.fetch_add(1, Ordering::SeqCst)))
}

/// Provider whose compatible-mode and native prefixes both point at `server`.
pub fn provider(server: &MockServer) -> QwenProvider {
    create_qwen(
        QwenProviderSettings::new()
            .api_key(API_KEY)
            .base_url(format!("{}/compatible-mode/v1", server.uri()))
            .image_base_url(format!("{}/api/v1", server.uri()))
            .id_generator(sequential_ids()),
    )
    .expect("provider")
}

/// SSE body with one `data:` frame per payload followed by `[DONE]`.
pub fn sse_body(payloads: &[serde_json::Value]) -> String {
    let mut body = String::new();
    for p in payloads {
        body.push_str(&format!("data: {p}\n\n"));
    }
    body.push_str("data: [DONE]\n\n");
    body
}

pub async fn collect(
    stream: LanguageModelV3PartStream,
) -> Vec<Result<LanguageModelV3StreamPart, LlmError>> {
    stream.collect().await
}

pub fn type_names(parts: &[Result<LanguageModelV3StreamPart, LlmError>]) -> Vec<&'static str> {
    parts
        .iter()
        .map(|p| match p {
            Ok(part) => part.type_name(),
            Err(_) => "ERR",
        })
        .collect()
}
