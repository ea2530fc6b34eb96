//! Error types for the Open To Close client.
//!
//! Every failed call resolves to one [`OpenToCloseError`] variant. HTTP
//! statuses map onto variants one-to-one (see [`OpenToCloseError::from_status`]),
//! transport failures become [`OpenToCloseError::Network`], and problems with
//! the local configuration surface before any request is made.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Convenience alias used by every fallible operation in this crate.
pub type Result<T> = std::result::Result<T, OpenToCloseError>;

/// Error emitted by the Open To Close client
#[derive(Debug, Error)]
pub enum OpenToCloseError {
    /// The API key is missing, or the server rejected it (401 / 403)
    #[error("Authentication error: {message}")]
    Authentication {
        message: String,
        /// `None` when the failure happened locally, before any request
        status: Option<u16>,
    },
    /// The server rejected the request payload or parameters (400 / 422)
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        status: u16,
        body: Option<Value>,
    },
    /// The addressed record does not exist (404)
    #[error("Not found: {message}")]
    NotFound { message: String, body: Option<Value> },
    /// Too many requests (429)
    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        message: String,
        /// Seconds from the `Retry-After` header, when the server sent one
        retry_after: Option<u64>,
        body: Option<Value>,
    },
    /// The server failed to handle the request (5xx)
    #[error("Server error ({status}): {message}")]
    Server {
        message: String,
        status: u16,
        body: Option<Value>,
    },
    /// The request never produced an HTTP response
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),
    /// Any other non-success status
    #[error("API error ({status}): {message}")]
    Api {
        message: String,
        status: u16,
        body: Option<Value>,
    },
    /// A success response whose body is not valid JSON
    #[error("JSON parsing error: {0}")]
    Decode(#[from] serde_json::Error),
    /// Valid JSON of a shape the client cannot use
    #[error("Unexpected response from server: {0}")]
    UnexpectedResponse(String),
    /// Invalid base URL, unreadable configuration file and the like
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<url::ParseError> for OpenToCloseError {
    fn from(error: url::ParseError) -> Self {
        OpenToCloseError::Configuration(format!("invalid base URL: {}", error))
    }
}

impl OpenToCloseError {
    /// Raised locally when neither the caller nor the environment supplies a key.
    pub fn missing_api_key() -> Self {
        OpenToCloseError::Authentication {
            message: format!(
                "no API key provided; pass one explicitly or set {}",
                crate::configuration::API_KEY_ENV_VAR
            ),
            status: None,
        }
    }

    /// Map a non-success HTTP status onto the matching variant.
    ///
    /// `message` should already be extracted from the response body; `body`
    /// is the parsed JSON body if there was one.
    pub fn from_status(
        status: StatusCode,
        message: String,
        body: Option<Value>,
        retry_after: Option<u64>,
    ) -> Self {
        let code = status.as_u16();
        match code {
            401 | 403 => OpenToCloseError::Authentication {
                message,
                status: Some(code),
            },
            400 | 422 => OpenToCloseError::Validation {
                message,
                status: code,
                body,
            },
            404 => OpenToCloseError::NotFound { message, body },
            429 => OpenToCloseError::RateLimit {
                message,
                retry_after,
                body,
            },
            500..=599 => OpenToCloseError::Server {
                message,
                status: code,
                body,
            },
            _ => OpenToCloseError::Api {
                message,
                status: code,
                body,
            },
        }
    }

    /// HTTP status that produced this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            OpenToCloseError::Authentication { status, .. } => *status,
            OpenToCloseError::Validation { status, .. } => Some(*status),
            OpenToCloseError::NotFound { .. } => Some(404),
            OpenToCloseError::RateLimit { .. } => Some(429),
            OpenToCloseError::Server { status, .. } => Some(*status),
            OpenToCloseError::Api { status, .. } => Some(*status),
            OpenToCloseError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Parsed JSON body of the error response, if the server sent one.
    pub fn response_body(&self) -> Option<&Value> {
        match self {
            OpenToCloseError::Validation { body, .. }
            | OpenToCloseError::NotFound { body, .. }
            | OpenToCloseError::RateLimit { body, .. }
            | OpenToCloseError::Server { body, .. }
            | OpenToCloseError::Api { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Whether repeating the same request later could succeed.
    ///
    /// Only a classification: the client itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            OpenToCloseError::RateLimit { .. }
                | OpenToCloseError::Server { .. }
                | OpenToCloseError::Network(_)
        )
    }
}

/// Pick a human readable message out of an error response.
///
/// Looks for `message`, `error` or `detail` string keys in a JSON body, falls
/// back to the raw text, and finally to the canonical status reason.
pub(crate) fn extract_error_message(
    status: StatusCode,
    text: &str,
    body: Option<&Value>,
) -> String {
    if let Some(Value::Object(map)) = body {
        for key in ["message", "error", "detail"] {
            if let Some(Value::String(message)) = map.get(key) {
                if !message.trim().is_empty() {
                    return message.clone();
                }
            }
        }
    }

    let text = text.trim();
    if !text.is_empty() && body.map_or(true, |b| !b.is_object()) {
        return text.to_string();
    }

    match status.canonical_reason() {
        Some(reason) => format!("HTTP {} {}", status.as_u16(), reason),
        None => format!("HTTP {}", status.as_u16()),
    }
}
