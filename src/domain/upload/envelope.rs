use serde_json::{Value, json};

/// Interprets an upstream response body.
///
/// GC2 answers with JSON most of the time; plain-text bodies from a successful
/// call are wrapped as `{"success": true, "message": <body>}`.
pub fn parse_upstream_body(body: &str) -> Value {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => value,
        Err(_) => json!({ "success": true, "message": body }),
    }
}
