//! Response metadata extraction shared by chat and completion responses.

use crate::types::LanguageModelV3ResponseMetadata;

/// Build response metadata from the vendor `id`, `created` (unix seconds) and `model` fields.
pub fn get_response_metadata(
    id: Option<&str>,
    created: Option<i64>,
    model: Option<&str>,
) -> LanguageModelV3ResponseMetadata {
    LanguageModelV3ResponseMetadata {
        id: id.map(str::to_string),
        timestamp: created.and_then(|secs| chrono::DateTime::from_timestamp(secs, 0)),
        model_id: model.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_created_seconds_to_timestamp() {
        let meta = get_response_metadata(Some("chatcmpl-1"), Some(1_700_000_000), Some("qwen-plus"));
        assert_eq!(meta.id.as_deref(), Some("chatcmpl-1"));
        assert_eq!(meta.model_id.as_deref(), Some("qwen-plus"));
        assert_eq!(meta.timestamp.map(|t| t.timestamp()), Some(1_700_000_000));
    }

    #[test]
    fn missing_fields_stay_empty() {
        let meta = get_response_metadata(None, None, None);
        assert_eq!(meta, LanguageModelV3ResponseMetadata::default());
    }
}
