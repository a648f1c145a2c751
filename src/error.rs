//! Error types for 99 API operations.

use std::fmt;
use std::time::Duration;

use http::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur during 99 API operations.
#[derive(Debug, Error)]
pub enum Taxis99Error {
    /// Configuration is missing or incomplete.
    #[error("99 configuration required: {0}")]
    ConfigMissing(String),

    /// A credential or tenant id cannot be sent as an HTTP header value.
    #[error("Invalid value for header '{name}'")]
    InvalidHeader { name: &'static str },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// The resolved URL would leave the configured API base.
    #[error("Path '{path}' escapes the API base URL")]
    PathEscapesBase { path: String },

    /// The outgoing request could not be assembled.
    #[error("Invalid request: {0}")]
    RequestError(#[from] http::Error),

    /// The request body could not be encoded as JSON.
    #[error("Failed to encode request body: {0}")]
    EncodeError(#[source] serde_json::Error),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The call context was cancelled before the exchange completed.
    #[error("Request cancelled")]
    Cancelled,

    /// The call context deadline elapsed before the exchange completed.
    #[error("Request timed out after {0:?}")]
    TimedOut(Duration),

    /// The API answered but rejected the request or sent an unreadable body.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl Taxis99Error {
    /// Returns true for network level failures, including cancellation and
    /// deadlines. These never carry an HTTP status.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::HttpError(_) | Self::Cancelled | Self::TimedOut(_)
        )
    }

    /// The [`ApiError`] behind this error, if the server produced one.
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }

    /// HTTP status code reported by the server, if any.
    pub fn status_code(&self) -> Option<u16> {
        self.as_api_error().map(|err| err.status_code)
    }
}

/// Result type alias for 99 operations.
pub type Result<T> = core::result::Result<T, Taxis99Error>;

/// One entry of a 422 validation payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FieldError {
    /// Machine readable error code.
    #[serde(default)]
    pub code: Option<String>,
    /// Offending field, e.g. `employee.phone`.
    #[serde(default)]
    pub field: Option<String>,
    /// Message key, e.g. `error.invalidPhoneNumber`.
    #[serde(default)]
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{field}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ValidationPayload {
    errors: Vec<FieldError>,
}

/// Error returned when the API answered but the exchange failed at the
/// application level.
///
/// Built in three situations:
///
/// - the body could not be decoded into the expected type (`source` holds
///   the decode error);
/// - the server answered `422 Unprocessable Entity` with a structured
///   validation payload (`errors` holds the entries);
/// - the server answered with any other non-success status.
#[derive(Debug, Error)]
#[error("Error Status Code: {status_code}; Message: {message}.")]
pub struct ApiError {
    /// HTTP status code of the response.
    pub status_code: u16,
    /// Human readable description.
    pub message: String,
    /// Validation entries from a 422 response.
    pub errors: Vec<FieldError>,
    /// Underlying decode error.
    #[source]
    pub source: Option<serde_json::Error>,
}

impl ApiError {
    /// Wrap a body that did not match the expected JSON shape.
    pub fn decode(status_code: u16, err: serde_json::Error) -> Self {
        Self {
            status_code,
            message: format!("api: '{err}'"),
            errors: Vec::new(),
            source: Some(err),
        }
    }

    /// Classify a `422` response carrying `{"errors": [...]}`.
    ///
    /// A body that does not follow the validation shape is reported as a
    /// decode failure.
    pub fn validation(status_code: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<ValidationPayload>(body) {
            Ok(payload) => {
                let message = if payload.errors.is_empty() {
                    "validation failed".to_string()
                } else {
                    payload
                        .errors
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join("; ")
                };
                Self {
                    status_code,
                    message,
                    errors: payload.errors,
                    source: None,
                }
            }
            Err(err) => Self::decode(status_code, err),
        }
    }

    /// Classify any other non-success response.
    pub fn from_status(status: StatusCode, body: &[u8]) -> Self {
        Self {
            status_code: status.as_u16(),
            message: extract_error_message(status, body),
            errors: Vec::new(),
            source: None,
        }
    }

    /// True for `422` validation failures.
    pub fn is_validation(&self) -> bool {
        self.status_code == StatusCode::UNPROCESSABLE_ENTITY.as_u16()
    }
}

/// Extract an error message from a failed response body.
fn extract_error_message(status: StatusCode, body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        return format!("HTTP {status}");
    }

    // Try to parse as JSON and extract message field
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(text) {
        if let Some(msg) = json.get("message").and_then(|m| m.as_str()) {
            return msg.to_string();
        }
        if let Some(err) = json.get("error").and_then(|m| m.as_str()) {
            return err.to_string();
        }
    }

    text.to_string()
}
