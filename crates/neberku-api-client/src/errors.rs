//! Error bodies returned by the backend
//!
//! The backend answers failures in several shapes: `{"detail": ".."}`,
//! `{"error": ".."}`, `{"non_field_errors": [..]}`, `{"errors": {..}}`,
//! a bare list of messages, or a map of field name to messages. They are
//! flattened into one line for the guest.

use serde_json::Value;

/// Non-success HTTP answer from the backend
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("API request failed with status {status}: {message}")]
pub struct ApiStatusError {
    pub status: u16,
    pub message: String,
}

const FALLBACK_MESSAGE: &str = "Request failed. Please try again.";

/// Longest plain-text body shown as is; longer ones are cut.
const MAX_PLAIN_MESSAGE_CHARS: usize = 200;

/// Turn an error response body into a single readable message.
pub fn flatten_error_body(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return FALLBACK_MESSAGE.to_string();
    }

    match serde_json::from_str::<Value>(body) {
        Ok(value) => {
            let mut messages = Vec::new();
            collect_messages(None, &value, &mut messages);
            if messages.is_empty() {
                FALLBACK_MESSAGE.to_string()
            } else {
                messages.join("; ")
            }
        }
        Err(_) => plain_text_message(body),
    }
}

/// Markup pages from a proxy or the server's debug view are not shown.
fn plain_text_message(body: &str) -> String {
    if body.starts_with('<') {
        return FALLBACK_MESSAGE.to_string();
    }
    let mut chars = body.chars();
    let head: String = chars.by_ref().take(MAX_PLAIN_MESSAGE_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head.trim_end())
    } else {
        head
    }
}

fn collect_messages(field: Option<&str>, value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(message) => out.push(match field {
            Some(field) => format!("{}: {}", field, message),
            None => message.clone(),
        }),
        Value::Array(items) => {
            for item in items {
                collect_messages(field, item, out);
            }
        }
        Value::Object(map) => {
            for (key, nested) in map {
                let label = match key.as_str() {
                    "detail" | "error" | "errors" | "non_field_errors" | "message" => field,
                    other => Some(other),
                };
                collect_messages(label, nested, out);
            }
        }
        Value::Number(n) => out.push(n.to_string()),
        Value::Bool(_) | Value::Null => {}
    }
}
