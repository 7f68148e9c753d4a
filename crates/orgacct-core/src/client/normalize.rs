//! Turn non-success responses and executor failures into domain errors.

use crate::error::{Error, Result};
use crate::http::Response;
use crate::model::ErrorEnvelope;
use crate::retry::ExecuteError;

/// `Ok(())` for 2xx statuses; otherwise the domain error the server's
/// `error_message` describes.
///
/// An error body that is not a valid envelope is reported as `Error::Decode`,
/// distinct from any domain error.
pub fn check_response(response: &Response) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }
    let message = error_message(response)?;
    Err(domain_error(response.status, message))
}

/// Map a status code and verbatim server message to the error taxonomy.
pub fn domain_error(status: u16, message: String) -> Error {
    match status {
        400 => Error::Validation(message),
        404 => Error::NotFound(message),
        409 => Error::VersionConflict(message),
        _ => Error::Server { status, message },
    }
}

/// Map an executor failure. For exhaustion the last response's message is kept
/// when it decodes, otherwise its raw body text.
pub fn execute_error(e: ExecuteError) -> Error {
    match e {
        ExecuteError::Transport(t) => t.into(),
        ExecuteError::Cancelled => Error::Cancelled,
        ExecuteError::RetriesExhausted { attempts, last, .. } => {
            let message = error_message(&last)
                .unwrap_or_else(|_| String::from_utf8_lossy(&last.body).trim().to_string());
            Error::RetriesExhausted {
                attempts,
                status: last.status,
                message,
            }
        }
    }
}

fn error_message(response: &Response) -> Result<String> {
    serde_json::from_slice::<ErrorEnvelope>(&response.body)
        .map(|env| env.error_message)
        .map_err(|source| Error::Decode {
            what: "error envelope",
            source,
        })
}
