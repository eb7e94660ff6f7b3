//! Schedule backend error taxonomy.

use std::fmt;

/// Errors from the schedule backend.
///
/// Every kind is recoverable by retrying or by changing the query; none is
/// fatal to the process. `EmptyResponse` is special: it means the query
/// matched no rows, which callers render as "no results" rather than as an
/// error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Could not reach the database service (timeout, refused connection).
    ConnectionFailed,

    /// The service answered with an unusable status code.
    InvalidResponse { status: u16, message: String },

    /// Invalid or rejected credentials.
    AuthenticationFailed,

    /// The response body could not be decoded.
    JsonParsingFailed {
        message: String,
        body: Option<String>,
    },

    /// The query matched no rows. Valid outcome, not a user-facing error.
    EmptyResponse,

    /// A row decoded but carried values the domain rejects.
    InvalidData(String),

    /// Transport-level failure other than connectivity.
    NetworkError(String),

    /// The endpoint exists but is not implemented on this backend.
    NotImplemented,
}

impl BackendError {
    /// Whether a retry has a chance of succeeding.
    ///
    /// Authentication failures, decode failures, and empty results are
    /// terminal for the request as issued; connectivity problems and
    /// server-side errors are worth another attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            BackendError::ConnectionFailed | BackendError::NetworkError(_) => true,
            BackendError::InvalidResponse { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::ConnectionFailed => write!(f, "database connection failed"),
            BackendError::InvalidResponse { status, message } => {
                write!(f, "invalid response {status}: {message}")
            }
            BackendError::AuthenticationFailed => write!(f, "authentication failed"),
            BackendError::JsonParsingFailed { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            BackendError::EmptyResponse => write!(f, "no matching schedules"),
            BackendError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
            BackendError::NetworkError(msg) => write!(f, "network error: {msg}"),
            BackendError::NotImplemented => write!(f, "not implemented on this backend"),
        }
    }
}

impl std::error::Error for BackendError {}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            BackendError::ConnectionFailed
        } else {
            BackendError::NetworkError(err.to_string())
        }
    }
}
