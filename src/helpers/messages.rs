//! User-facing messages for server errors and validation failures

use serde::{Deserialize, Serialize};

pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized Action";
pub const NOT_FOUND_MESSAGE: &str = "Not found exception occured";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error occured. Please try again later";
pub const VALIDATION_FALLBACK_MESSAGE: &str = "Validation Error: Please check all the fields correctly";

/// Body nested under `error` in a failed HTTP response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// A failed HTTP response as reported by the panel's HTTP client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerError {
    pub status: u16,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<ErrorBody>,
}

impl ServerError {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }
}

/// One entry of a validation failure list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Message to show for a failed request
pub fn server_error_message(err: &ServerError) -> String {
    match err.status {
        401 => err
            .error
            .as_ref()
            .and_then(|body| body.message.clone())
            .unwrap_or_else(|| UNAUTHORIZED_MESSAGE.to_string()),
        404 => err
            .message
            .clone()
            .unwrap_or_else(|| NOT_FOUND_MESSAGE.to_string()),
        _ => INTERNAL_ERROR_MESSAGE.to_string(),
    }
}

/// First non-empty message among `issues`, or a generic fallback
pub fn validation_message(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .filter_map(|issue| issue.message.as_deref())
        .find(|message| !message.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| VALIDATION_FALLBACK_MESSAGE.to_string())
}
