use serde_json::json;

/// Builders for Gemini generateContent response bodies, used with a mock
/// HTTP server in tests.
pub struct MockGeminiResponse;

impl MockGeminiResponse {
    /// A successful response whose single candidate carries `text`.
    pub fn with_text(text: &str) -> serde_json::Value {
        json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": text }],
                    "role": "model"
                },
                "finishReason": "STOP"
            }]
        })
    }

    /// A well-formed plan response for the given `(day, tasks)` pairs.
    pub fn plan(days: &[(u32, &[&str])]) -> serde_json::Value {
        let entries: Vec<serde_json::Value> = days
            .iter()
            .map(|(day, tasks)| json!({ "day": day, "tasks": tasks }))
            .collect();
        let text = serde_json::Value::Array(entries).to_string();
        Self::with_text(&text)
    }

    /// A response with no candidates, as returned when generation is
    /// blocked.
    pub fn empty() -> serde_json::Value {
        json!({ "candidates": [] })
    }

    pub fn error_json(message: &str) -> serde_json::Value {
        json!({
            "error": {
                "code": 500,
                "message": message,
                "status": "INTERNAL"
            }
        })
    }
}
