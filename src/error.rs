//! Unified error types.

use std::fmt;

use http::StatusCode;

use crate::response::{IntoResponse, Response};

/// The error type returned by the server's fallible operations.
///
/// Request-level failures (404, 422, etc.) travel as [`HttpError`]s and end
/// up as HTTP responses. This type surfaces infrastructure failures: binding
/// to a port or accepting a connection.
#[derive(Debug)]
pub struct Error(std::io::Error);

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "io: {}", self.0)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self(e)
    }
}

/// A normalized request failure: a user-facing message and the status it
/// is served with.
///
/// Every handler error is converted into one of these at the handler
/// boundary. The error middleware (or the router, when none is installed)
/// writes it out as `{"message": "..."}` with the carried status.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    /// Builds an error from a status that may be missing or not a valid HTTP
    /// code. Either case falls back to `500 Internal Server Error`.
    pub fn with_code(code: Option<u16>, message: impl Into<String>) -> Self {
        let status = code
            .and_then(|c| StatusCode::from_u16(c).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self::new(status, message)
    }

    pub fn status(&self) -> StatusCode { self.status }
    pub fn message(&self) -> &str { &self.message }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status.as_u16(), self.message)
    }
}

impl std::error::Error for HttpError {}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "message": self.message });
        Response::builder().status(self.status).json(body.to_string().into_bytes())
    }
}
