//! Embedding wire types.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QwenEncodingFormat {
    Float,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QwenEmbeddingRequest {
    pub model: String,
    pub input: Vec<String>,
    pub encoding_format: QwenEncodingFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<u32>,
}

/// Only the fields the model reads; everything else in the body is ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct QwenEmbeddingResponse {
    pub data: Vec<QwenEmbeddingData>,
    #[serde(default)]
    pub usage: Option<QwenEmbeddingUsage>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct QwenEmbeddingData {
    pub embedding: Vec<f64>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct QwenEmbeddingUsage {
    pub prompt_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_omits_unset_dimensions() {
        let request = QwenEmbeddingRequest {
            model: "text-embedding-v4".into(),
            input: vec!["a".into()],
            encoding_format: QwenEncodingFormat::Float,
            dimensions: None,
        };
        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({ "model": "text-embedding-v4", "input": ["a"], "encoding_format": "float" })
        );
    }

    #[test]
    fn response_tolerates_extra_fields_and_null_usage() {
        let response: QwenEmbeddingResponse = serde_json::from_value(json!({
            "object": "list",
            "data": [{ "object": "embedding", "index": 0, "embedding": [0.5, -1] }],
            "usage": null
        }))
        .unwrap();
        assert_eq!(response.data[0].embedding, vec![0.5, -1.0]);
        assert_eq!(response.usage, None);
    }
}
