//! Classified errors for PMO API calls.
//!
//! Every failure a call can produce is normalized into an [`ApiError`] carrying
//! one of a closed set of [`ErrorKind`]s, a machine-readable code, a human
//! message, the originating HTTP status when one exists, and any structured
//! detail the server attached. The kind alone decides whether the executor
//! retries.

use http::StatusCode;
use serde::Deserialize;

/// The closed set of failure categories a PMO API call can resolve to.
///
/// Classification is a pure function of the HTTP status (or its absence, for
/// transport failures): the same input always yields the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 401 — the bearer credential was missing, invalid, or expired.
    Authentication,
    /// 403 — authenticated but not allowed to perform the operation.
    Permission,
    /// 404 — the addressed resource does not exist.
    NotFound,
    /// Any other 4xx — the request itself was malformed or rejected.
    Validation,
    /// 429 — the server is shedding load; safe to retry after a delay.
    RateLimited,
    /// 5xx — the server failed; safe to retry.
    ServerFault,
    /// No response was received at all (connection refused, timeout, DNS
    /// failure, cancellation).
    Transport,
}

impl ErrorKind {
    /// Returns `true` if failures of this kind may succeed on a later attempt.
    ///
    /// Only [`Transport`](ErrorKind::Transport),
    /// [`RateLimited`](ErrorKind::RateLimited), and
    /// [`ServerFault`](ErrorKind::ServerFault) are retryable. Authentication
    /// and permission failures are surfaced immediately so the caller can
    /// re-authenticate.
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            ErrorKind::Transport | ErrorKind::RateLimited | ErrorKind::ServerFault
        )
    }

    /// Maps a non-2xx HTTP status to its kind.
    ///
    /// The mapping is total over non-2xx statuses: exact statuses (401, 403,
    /// 404, 429) first, then the 4xx range, then everything at or above 500.
    pub fn for_status(status: StatusCode) -> Self {
        match status.as_u16() {
            401 => ErrorKind::Authentication,
            403 => ErrorKind::Permission,
            404 => ErrorKind::NotFound,
            429 => ErrorKind::RateLimited,
            400..=499 => ErrorKind::Validation,
            _ => ErrorKind::ServerFault,
        }
    }
}

/// The error type for PMO API calls.
///
/// Produced once per failed attempt; a call surfaces either a decoded success
/// value or the last `ApiError` — never both.
#[derive(thiserror::Error, Debug, Clone)]
#[error("[{code}] {message}{}", .http_status.map(|s| format!(" (HTTP {})", s.as_u16())).unwrap_or_default())]
pub struct ApiError {
    /// Which failure category this error falls into.
    pub kind: ErrorKind,
    /// Machine-readable code, copied from the server envelope when present.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// The originating HTTP status; `None` for transport failures.
    pub http_status: Option<StatusCode>,
    /// Structured detail payload from the server envelope, when present.
    pub detail: Option<serde_json::Value>,
}

/// The fixed error envelope every non-2xx PMO API response carries.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
    #[serde(rename = "statusCode")]
    #[allow(dead_code)]
    status_code: u16,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl ApiError {
    /// Classifies a non-2xx response into an `ApiError`.
    ///
    /// `code`, `message`, and `detail` are copied verbatim from the body's
    /// error envelope. A body that does not parse as the expected envelope
    /// falls back to [`ErrorKind::ServerFault`] with the synthetic code
    /// `"malformed_error_body"` and the raw text as the message.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => Self {
                kind: ErrorKind::for_status(status),
                code: envelope.error.code,
                message: envelope.error.message,
                http_status: Some(status),
                detail: envelope.error.detail,
            },
            Err(_) => Self {
                kind: ErrorKind::ServerFault,
                code: "malformed_error_body".to_string(),
                message: body.to_string(),
                http_status: Some(status),
                detail: None,
            },
        }
    }

    /// Wraps a transport-level failure (no response received).
    pub fn transport(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Transport,
            code: code.into(),
            message: message.into(),
            http_status: None,
            detail: None,
        }
    }

    /// The error surfaced when an in-flight call is cancelled externally.
    pub fn cancelled() -> Self {
        Self::transport("cancelled", "request cancelled before completion")
    }

    /// A 2xx response whose body failed to decode into the expected type.
    ///
    /// Not retryable: reissuing the identical request would produce the same
    /// body. Carries the successful status so the mismatch is debuggable.
    pub fn decode(status: StatusCode, serde_error: &serde_json::Error) -> Self {
        Self {
            kind: ErrorKind::Validation,
            code: "decode".to_string(),
            message: format!("failed to decode response body: {serde_error}"),
            http_status: Some(status),
            detail: None,
        }
    }

    /// Invalid client or request configuration (bad base URL, bad header).
    ///
    /// Classified as [`ErrorKind::Validation`]: the input is wrong and
    /// retrying cannot fix it.
    pub fn config(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Validation,
            code: "invalid_config".to_string(),
            message: message.into(),
            http_status: None,
            detail: None,
        }
    }

    /// Returns `true` if a later attempt may succeed. Delegates to
    /// [`ErrorKind::is_retryable`].
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::transport("timeout", err.to_string())
        } else {
            Self::transport("network", err.to_string())
        }
    }
}

/// A specialized `Result` type for PMO API calls.
pub type Result<T> = std::result::Result<T, ApiError>;
