//! Caller-facing error taxonomy.

use crate::retry::TransportError;

/// Substring the accounts API puts in 400 responses for uniqueness collisions.
pub const DUPLICATE_INDICATOR: &str = "duplicate constraint";

/// Broad category of an [`Error`], for callers that branch on kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    VersionConflict,
    Validation,
    Server,
    Transport,
    RetriesExhausted,
    Decode,
    Encode,
    Cancelled,
    InvalidUrl,
}

/// Every failure a client operation can report.
///
/// Domain variants carry the server's `error_message` verbatim.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("version conflict: {0}")]
    VersionConflict(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("server error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(#[source] TransportError),

    #[error("gave up after {attempts} attempts (HTTP {status}): {message}")]
    RetriesExhausted {
        attempts: u32,
        status: u16,
        message: String,
    },

    #[error("could not decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not encode {what}: {source}")]
    Encode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("request cancelled")]
    Cancelled,

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::VersionConflict(_) => ErrorKind::VersionConflict,
            Error::Validation(_) => ErrorKind::Validation,
            Error::Server { .. } => ErrorKind::Server,
            Error::Transport(_) => ErrorKind::Transport,
            Error::RetriesExhausted { .. } => ErrorKind::RetriesExhausted,
            Error::Decode { .. } => ErrorKind::Decode,
            Error::Encode { .. } => ErrorKind::Encode,
            Error::Cancelled => ErrorKind::Cancelled,
            Error::InvalidUrl(_) => ErrorKind::InvalidUrl,
        }
    }

    /// True for a validation error caused by a uniqueness collision.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Error::Validation(msg) if msg.contains(DUPLICATE_INDICATOR))
    }

    /// True when the transport gave up on a request that ran past its timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Transport(t) if t.is_timeout())
    }

    /// The server-provided message, if this error came from a decoded payload.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Error::NotFound(m) | Error::VersionConflict(m) | Error::Validation(m) => Some(m),
            Error::Server { message, .. } | Error::RetriesExhausted { message, .. } => {
                Some(message)
            }
            _ => None,
        }
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::Aborted => Error::Cancelled,
            other => Error::Transport(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
