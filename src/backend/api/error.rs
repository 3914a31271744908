//! Errors returned by the platform API client.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server responded with {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Request timed out after {}s", .0.as_secs_f32())]
    Timeout(Duration),

    #[error("Not signed in or session expired")]
    Unauthorized,

    #[error("Request was cancelled")]
    Cancelled,
}

impl ApiError {
    /// Builds a status error from a non-2xx response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        if status == 401 {
            return Self::Unauthorized;
        }
        Self::Status {
            status,
            message: detail_message(body),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// Extracts the `detail` field the API puts on error responses.
///
/// Validation errors carry a list of objects instead of a string; those are
/// reduced to their `msg` entries.
fn detail_message(body: &str) -> String {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail);

    match detail {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Array(items)) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if messages.is_empty() {
                "Request was rejected".to_string()
            } else {
                messages.join("; ")
            }
        }
        Some(other) => other.to_string(),
        None if body.trim().is_empty() => "No details provided".to_string(),
        None => body.trim().chars().take(200).collect(),
    }
}
