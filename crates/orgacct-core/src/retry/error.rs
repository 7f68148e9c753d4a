//! Errors produced by a single physical attempt and by the attempt loop.

use crate::http::Response;
use std::fmt;
use std::time::Duration;

/// Failure below HTTP: the request never produced a status code.
#[derive(Debug)]
pub enum TransportError {
    /// Curl reported an error (bad URL, connection refused, DNS, timeout, etc.).
    Curl(curl::Error),
    /// The transfer was stopped because the caller's cancel token fired.
    Aborted,
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Curl(e) if e.is_operation_timedout())
    }
}

impl From<curl::Error> for TransportError {
    fn from(e: curl::Error) -> Self {
        TransportError::Curl(e)
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Curl(e) => write!(f, "{}", e),
            TransportError::Aborted => write!(f, "transfer aborted"),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransportError::Curl(e) => Some(e),
            TransportError::Aborted => None,
        }
    }
}

/// Terminal outcome of the attempt loop other than a final response.
#[derive(Debug)]
pub enum ExecuteError {
    /// Request construction or send failed. Never retried.
    Transport(TransportError),
    /// The server kept answering with a retriable status until the elapsed-time
    /// ceiling was reached. `last` is the final response received.
    RetriesExhausted {
        attempts: u32,
        elapsed: Duration,
        last: Response,
    },
    /// The caller's cancel token fired before a final response was obtained.
    Cancelled,
}

impl fmt::Display for ExecuteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecuteError::Transport(e) => write!(f, "transport: {}", e),
            ExecuteError::RetriesExhausted {
                attempts,
                elapsed,
                last,
            } => write!(
                f,
                "gave up after {} attempts in {:?}: last status HTTP {}",
                attempts, elapsed, last.status
            ),
            ExecuteError::Cancelled => write!(f, "request cancelled"),
        }
    }
}

impl std::error::Error for ExecuteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExecuteError::Transport(e) => Some(e),
            ExecuteError::RetriesExhausted { .. } | ExecuteError::Cancelled => None,
        }
    }
}
