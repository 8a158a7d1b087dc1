//! Response envelope and error body conventions of the REST backend
//!
//! Success: `{"success": true, "message": "...", "data": {...}}`
//! Failure: `{"message": "..."}` or `{"error": {"message": "...", "details": [...]}}`

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Success envelope returned by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

fn default_success() -> bool {
    true
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Payload of a response body: its `data` field, or the whole body when the
/// endpoint does not wrap its payload.
pub fn payload_of(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Top-level `message` of a response body, if any
pub fn message_of(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
}

/// Nested error object: `{"message": "...", "details": [...]}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<Value>,
}

/// Error body returned with a non-2xx status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<ApiErrorDetail>,
}

impl ApiErrorBody {
    /// Lenient parse: anything that is not an error object yields an empty body
    pub fn from_value(body: &Value) -> Self {
        match body {
            Value::Object(_) => serde_json::from_value(body.clone()).unwrap_or_else(|_| Self {
                message: message_of(body)
                    .or_else(|| body.get("error").and_then(Value::as_str).map(str::to_string)),
                error: None,
            }),
            Value::String(s) if !s.trim().is_empty() => Self {
                message: Some(s.clone()),
                error: None,
            },
            _ => Self::default(),
        }
    }

    /// Single headline: `error.message`, else top-level `message`
    pub fn primary_message(&self) -> Option<String> {
        self.error
            .as_ref()
            .and_then(|e| e.message.clone())
            .or_else(|| self.message.clone())
            .filter(|m| !m.trim().is_empty())
    }

    /// User-facing messages, one per toast.
    ///
    /// `error.details` wins when it is a non-empty array; otherwise a single
    /// message taken from `error.message` or `message`.
    pub fn messages(&self) -> Vec<String> {
        if let Some(Value::Array(details)) = self.error.as_ref().and_then(|e| e.details.as_ref()) {
            let collected: Vec<String> = details.iter().filter_map(detail_text).collect();
            if !collected.is_empty() {
                return collected;
            }
        }

        self.primary_message().into_iter().collect()
    }
}

fn detail_text(detail: &Value) -> Option<String> {
    match detail {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Object(obj) => obj
            .get("message")
            .or_else(|| obj.get("msg"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| Some(detail.to_string())),
        Value::Null => None,
        Value::String(_) => None,
        other => Some(other.to_string()),
    }
}
