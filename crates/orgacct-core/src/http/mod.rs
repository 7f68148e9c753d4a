//! HTTP request/response values and the transport seam.
//!
//! A `Request` owns its encoded body as a byte buffer, so the same request can
//! be sent any number of times by the retry loop without re-encoding.

mod curl;

pub use self::curl::CurlTransport;

use crate::cancel::CancelToken;
use crate::retry::TransportError;
use std::fmt;

/// HTTP methods used by the accounts API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logical request. The body is fully buffered before any attempt is made.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub body: Option<Vec<u8>>,
}

impl Request {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
        }
    }

    /// Attach an already-encoded JSON body.
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }
}

/// A complete response: status code plus the whole body read off the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a single physical request. Implementations never retry.
///
/// `cancel`, when given, must be observed during network I/O so a cancelled call
/// returns promptly with `TransportError::Aborted`.
pub trait Transport: Send + Sync {
    fn send(&self, request: &Request, cancel: Option<&CancelToken>)
        -> Result<Response, TransportError>;
}
