//! Error types for the Loyverse API client.
//!
//! Every failure surfaced by this crate is an [`Error`]. Responses with a
//! non-success HTTP status are classified into one of the status-keyed
//! variants, each carrying an [`ApiError`] with whatever message, code and
//! details the server supplied. Callers can match on [`Error`] to catch
//! broadly, or on [`Error::kind`] to branch on a single category.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// A specialized `Result` type for Loyverse operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure payload extracted from an API error response.
///
/// Fields are `None` when the server did not send them, or when the body
/// was not a JSON object at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiError {
    /// HTTP status code, if the error came from a response
    pub status: Option<u16>,
    /// Human-readable message
    pub message: Option<String>,
    /// Provider-assigned error code
    pub code: Option<String>,
    /// Structured details payload
    pub details: Option<Value>,
}

impl ApiError {
    /// Create an error payload with only a message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Default::default()
        }
    }

    /// Extract message, code and details from a response body.
    ///
    /// Looks for `error.message`, `error.code` and `error.details` first and
    /// falls back to a top-level `message`. Anything that is not a JSON
    /// object yields an empty payload.
    pub fn from_body(status: u16, body: Option<&Value>) -> Self {
        let Some(object) = body.filter(|b| b.is_object()) else {
            return Self {
                status: Some(status),
                ..Default::default()
            };
        };

        let nested = object.get("error");
        let message = nested
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
            .or_else(|| object.get("message").and_then(Value::as_str))
            .map(String::from);
        let code = nested.and_then(|e| e.get("code")).and_then(scalar_string);
        let details = nested
            .and_then(|e| e.get("details"))
            .filter(|d| !d.is_null())
            .cloned();

        Self {
            status: Some(status),
            message,
            code,
            details,
        }
    }

    fn or_message(mut self, default: impl FnOnce() -> String) -> Self {
        if self.message.is_none() {
            self.message = Some(default());
        }
        self
    }
}

/// Strings pass through; numbers and booleans are stringified.
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message.as_deref().unwrap_or("no message"))?;
        if let Some(ref code) = self.code {
            write!(f, " (code={})", code)?;
        }
        if let Some(status) = self.status {
            write!(f, " [status={}]", status)?;
        }
        Ok(())
    }
}

/// Closed set of failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 401, or a missing access token at construction
    Authentication,
    /// 403
    Authorization,
    /// 404
    NotFound,
    /// 400
    BadRequest,
    /// 429
    RateLimit,
    /// 500, 502, 503, 504
    Server,
    /// Any other non-success status
    Api,
    /// Timeout or connection failure
    Transport,
    /// Local failure that never reached the status taxonomy
    Client,
}

/// The main error type for all Loyverse API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or rejected credentials
    #[error("Authentication failed: {0}")]
    Authentication(ApiError),

    /// Credentials lack permission for the resource
    #[error("Authorization failed: {0}")]
    Authorization(ApiError),

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(ApiError),

    /// Request was rejected as malformed (400)
    #[error("Bad request: {0}")]
    BadRequest(ApiError),

    /// Rate limited by the API (429)
    #[error("Rate limited: {0}")]
    RateLimit(ApiError),

    /// Server-side failure (5xx)
    #[error("Server error: {0}")]
    Server(ApiError),

    /// Unmapped non-success status
    #[error("API error: {0}")]
    Api(ApiError),

    /// Request timed out or the connection failed
    #[error("Transport error: {message}")]
    Transport {
        /// What went wrong at the connection level
        message: String,
        /// Underlying HTTP client error
        #[source]
        source: Option<reqwest::Error>,
    },

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input provided to a function
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A list response carried a data field that is not an array
    #[error("Malformed page: field `{field}` is not an array")]
    MalformedPage {
        /// Name of the data field
        field: String,
        /// Raw value found under that field
        value: Value,
    },

    /// Exhaustive pagination hit its configured page bound
    #[error("Pagination stopped after {max_pages} pages with a cursor still present")]
    PageLimitExceeded {
        /// The configured bound
        max_pages: usize,
    },
}

impl Error {
    /// Classify a non-success response.
    ///
    /// `raw` is the undecoded body, used only to enrich the default 400
    /// message when the server sent nothing structured.
    pub(crate) fn from_response(status: u16, body: Option<&Value>, raw: &str) -> Self {
        let info = ApiError::from_body(status, body);

        match status {
            400 => Error::BadRequest(info.or_message(|| format!("Bad Request: {:?}", raw))),
            401 => Error::Authentication(info),
            403 => Error::Authorization(info),
            404 => Error::NotFound(info),
            429 => Error::RateLimit(info.or_message(|| "Rate limit exceeded".to_string())),
            500 | 502 | 503 | 504 => {
                Error::Server(info.or_message(|| "Server error occurred".to_string()))
            }
            _ => Error::Api(info.or_message(|| "Unknown error occurred".to_string())),
        }
    }

    /// Build a transport failure from a reqwest error.
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "Request timeout"
        } else if err.is_connect() {
            "Connection failed"
        } else {
            "Request failed"
        };

        Error::Transport {
            message: message.to_string(),
            source: Some(err),
        }
    }

    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Authentication(_) => ErrorKind::Authentication,
            Error::Authorization(_) => ErrorKind::Authorization,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::BadRequest(_) => ErrorKind::BadRequest,
            Error::RateLimit(_) => ErrorKind::RateLimit,
            Error::Server(_) => ErrorKind::Server,
            Error::Api(_) => ErrorKind::Api,
            Error::Transport { .. } => ErrorKind::Transport,
            _ => ErrorKind::Client,
        }
    }

    /// The server payload for status-keyed errors.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Authentication(e)
            | Error::Authorization(e)
            | Error::NotFound(e)
            | Error::BadRequest(e)
            | Error::RateLimit(e)
            | Error::Server(e)
            | Error::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Human-readable message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Error::Transport { message, .. } => Some(message),
            other => other.api_error().and_then(|e| e.message.as_deref()),
        }
    }

    /// Provider-assigned error code, if any.
    pub fn code(&self) -> Option<&str> {
        self.api_error().and_then(|e| e.code.as_deref())
    }

    /// Structured details payload, if any.
    pub fn details(&self) -> Option<&Value> {
        self.api_error().and_then(|e| e.details.as_ref())
    }

    /// HTTP status that produced this error, if any.
    pub fn status(&self) -> Option<u16> {
        self.api_error().and_then(|e| e.status)
    }

    /// Returns `true` if this error is potentially transient and the
    /// operation could be retried.
    ///
    /// # Example
    ///
    /// ```
    /// use loyverse_rs::Error;
    ///
    /// fn handle_error(err: Error) {
    ///     if err.is_retryable() {
    ///         println!("Retrying operation...");
    ///     }
    /// }
    /// ```
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Transport { .. } | Error::RateLimit(_) | Error::Server(_)
        )
    }

    /// Returns `true` if this is an authentication or authorization error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Authentication(_) | Error::Authorization(_))
    }

    /// Returns `true` if this error indicates a client-side issue
    /// (invalid input, bad request, etc.).
    pub fn is_client_error(&self) -> bool {
        match self.status() {
            Some(status) => (400..500).contains(&status),
            None => matches!(self, Error::InvalidInput(_) | Error::Config(_)),
        }
    }

    /// Returns `true` if this error indicates a server-side issue.
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| s >= 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn classify(status: u16, body: Value) -> Error {
        let raw = body.to_string();
        Error::from_response(status, Some(&body), &raw)
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (400, ErrorKind::BadRequest),
            (401, ErrorKind::Authentication),
            (403, ErrorKind::Authorization),
            (404, ErrorKind::NotFound),
            (429, ErrorKind::RateLimit),
            (500, ErrorKind::Server),
            (502, ErrorKind::Server),
            (503, ErrorKind::Server),
            (504, ErrorKind::Server),
            (418, ErrorKind::Api),
            (501, ErrorKind::Api),
        ];

        for (status, kind) in cases {
            assert_eq!(classify(status, json!({})).kind(), kind, "status {}", status);
        }
    }

    #[test]
    fn test_nested_error_fields() {
        let err = classify(
            400,
            json!({"error": {"message": "X", "code": "C", "details": {"k": "v"}}}),
        );

        assert_eq!(err.message(), Some("X"));
        assert_eq!(err.code(), Some("C"));
        assert_eq!(err.details(), Some(&json!({"k": "v"})));
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_numeric_code_is_kept() {
        let body = json!({"error": {"message": "Invalid store", "code": 4012}});
        let err = Error::from_response(422, Some(&body), "");
        assert_eq!(err.code(), Some("4012"));

        let body = json!({"error": {"code": {"nested": true}}});
        assert_eq!(ApiError::from_body(400, Some(&body)).code, None);
    }

    #[test]
    fn test_top_level_message_fallback() {
        let err = classify(404, json!({"message": "X"}));

        assert_eq!(err.message(), Some("X"));
        assert_eq!(err.code(), None);
        assert_eq!(err.details(), None);
    }

    #[test]
    fn test_default_messages() {
        assert_eq!(classify(429, json!({})).message(), Some("Rate limit exceeded"));
        assert_eq!(classify(503, json!({})).message(), Some("Server error occurred"));
        assert_eq!(classify(409, json!({})).message(), Some("Unknown error occurred"));
        assert_eq!(classify(401, json!({})).message(), None);
        assert_eq!(classify(404, json!({})).message(), None);
    }

    #[test]
    fn test_non_object_body_degrades() {
        let body = json!(["not", "an", "object"]);
        let err = Error::from_response(403, Some(&body), "");
        assert_eq!(err.kind(), ErrorKind::Authorization);
        assert_eq!(err.message(), None);
        assert_eq!(err.code(), None);

        let err = Error::from_response(500, None, "<html>oops</html>");
        assert_eq!(err.message(), Some("Server error occurred"));
        assert_eq!(err.details(), None);
    }

    #[test]
    fn test_bad_request_default_includes_raw_body() {
        let err = Error::from_response(400, None, "garbage");
        assert_eq!(err.message(), Some("Bad Request: \"garbage\""));
    }

    #[test]
    fn test_error_predicates() {
        let rate = classify(429, json!({}));
        assert!(rate.is_retryable());
        assert!(rate.is_client_error());
        assert!(!rate.is_server_error());

        let auth = classify(401, json!({}));
        assert!(auth.is_auth_error());
        assert!(!auth.is_retryable());

        let server = classify(502, json!({}));
        assert!(server.is_server_error());

        assert!(Error::InvalidInput("bad".into()).is_client_error());
        assert_eq!(Error::InvalidInput("bad".into()).kind(), ErrorKind::Client);
    }

    #[test]
    fn test_display() {
        let err = classify(404, json!({"error": {"message": "Item missing", "code": "NOT_FOUND"}}));
        assert_eq!(
            err.to_string(),
            "Not found: Item missing (code=NOT_FOUND) [status=404]"
        );
    }
}
