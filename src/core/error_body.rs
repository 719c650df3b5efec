//! Best-effort message extraction from failed responses

use serde_json::Value;

const RAW_FALLBACK_CHARS: usize = 200;

/// Turn the body of a non-2xx response into a human-readable message.
///
/// Prefers `error.message`, then the whole parsed document, then the first
/// 200 characters of the raw text. Never fails.
pub fn extract_error_message(raw: &str) -> String {
    let structured = serde_json::from_str::<Value>(raw)
        .ok()
        .and_then(|body| message_from_body(&body));

    structured.unwrap_or_else(|| raw.chars().take(RAW_FALLBACK_CHARS).collect())
}

/// `None` when the document is not shaped like an error object at all.
fn message_from_body(body: &Value) -> Option<String> {
    let object = body.as_object()?;
    let error = match object.get("error") {
        None => return Some(body.to_string()),
        Some(error) => error.as_object()?,
    };

    let message = match error.get("message") {
        Some(Value::String(message)) => message.clone(),
        Some(other) => other.to_string(),
        None => body.to_string(),
    };
    Some(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_message() {
        assert_eq!(extract_error_message(r#"{"error":{"message":"OOM"}}"#), "OOM");
    }

    #[test]
    fn test_object_without_error_uses_whole_body() {
        let message = extract_error_message(r#"{"detail":"bad lang"}"#);
        assert_eq!(message, r#"{"detail":"bad lang"}"#);
    }

    #[test]
    fn test_error_without_message_uses_whole_body() {
        let message = extract_error_message(r#"{"error":{"code":42}}"#);
        assert!(message.contains("42"));
    }

    #[test]
    fn test_unparseable_body_truncated() {
        let raw = "x".repeat(500);
        let message = extract_error_message(&raw);
        assert_eq!(message.chars().count(), 200);
    }

    #[test]
    fn test_short_unparseable_body_kept() {
        assert_eq!(extract_error_message("Internal Server Error"), "Internal Server Error");
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let raw = "翻".repeat(300);
        let message = extract_error_message(&raw);
        assert_eq!(message, "翻".repeat(200));
    }

    #[test]
    fn test_non_object_shapes_fall_back_to_raw() {
        assert_eq!(extract_error_message("[1,2,3]"), "[1,2,3]");
        assert_eq!(extract_error_message(r#"{"error":"boom"}"#), r#"{"error":"boom"}"#);
    }
}
