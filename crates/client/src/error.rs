use std::fmt;

use thiserror::Error;

pub type Result<T, E = ClientError> = std::result::Result<T, E>;

/// Status code reported by a Lattice service.
///
/// Mirrors the status vocabulary the services emit; a code string this
/// version does not know decodes to [`RemoteCode::Unknown`] so that newer
/// servers never crash older clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteCode {
    InvalidArgument,
    NotFound,
    AlreadyExists,
    PermissionDenied,
    Unauthenticated,
    FailedPrecondition,
    ResourceExhausted,
    Unavailable,
    DeadlineExceeded,
    Internal,
    Unknown,
}

impl RemoteCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemoteCode::InvalidArgument => "invalid_argument",
            RemoteCode::NotFound => "not_found",
            RemoteCode::AlreadyExists => "already_exists",
            RemoteCode::PermissionDenied => "permission_denied",
            RemoteCode::Unauthenticated => "unauthenticated",
            RemoteCode::FailedPrecondition => "failed_precondition",
            RemoteCode::ResourceExhausted => "resource_exhausted",
            RemoteCode::Unavailable => "unavailable",
            RemoteCode::DeadlineExceeded => "deadline_exceeded",
            RemoteCode::Internal => "internal",
            RemoteCode::Unknown => "unknown",
        }
    }

    pub(crate) fn parse(value: &str) -> Self {
        match value {
            "invalid_argument" => RemoteCode::InvalidArgument,
            "not_found" => RemoteCode::NotFound,
            "already_exists" => RemoteCode::AlreadyExists,
            "permission_denied" => RemoteCode::PermissionDenied,
            "unauthenticated" => RemoteCode::Unauthenticated,
            "failed_precondition" => RemoteCode::FailedPrecondition,
            "resource_exhausted" => RemoteCode::ResourceExhausted,
            "unavailable" => RemoteCode::Unavailable,
            "deadline_exceeded" => RemoteCode::DeadlineExceeded,
            "internal" => RemoteCode::Internal,
            _ => RemoteCode::Unknown,
        }
    }

    /// Fallback mapping when an error response carries no parseable body.
    pub(crate) fn from_http_status(status: u16) -> Self {
        match status {
            400 => RemoteCode::InvalidArgument,
            401 => RemoteCode::Unauthenticated,
            403 => RemoteCode::PermissionDenied,
            404 => RemoteCode::NotFound,
            409 => RemoteCode::AlreadyExists,
            412 => RemoteCode::FailedPrecondition,
            429 => RemoteCode::ResourceExhausted,
            500 => RemoteCode::Internal,
            503 => RemoteCode::Unavailable,
            504 => RemoteCode::DeadlineExceeded,
            _ => RemoteCode::Unknown,
        }
    }
}

impl fmt::Display for RemoteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a single client call.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (connection refused, TLS
    /// setup failure, broken stream, ...).
    #[error("transport error: {message}")]
    Transport { message: String },

    /// The configured request timeout fired.
    #[error("request timed out after {seconds}s")]
    Timeout { seconds: f64 },

    /// The service answered with an error status.
    #[error("remote error ({code}): {message}")]
    Remote { code: RemoteCode, message: String },

    /// The response body did not match the wire schema.
    #[error("failed to decode response: {message}")]
    Decode { message: String },
}

impl ClientError {
    /// True for the one error class `get`-style lookups convert into an
    /// absent result.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ClientError::Remote {
                code: RemoteCode::NotFound,
                ..
            }
        )
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Timeout { .. })
    }
}
