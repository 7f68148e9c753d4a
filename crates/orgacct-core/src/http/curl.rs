//! libcurl transport: one `Easy` handle per physical attempt.

use super::{Method, Request, Response, Transport};
use crate::cancel::CancelToken;
use crate::retry::TransportError;
use std::time::Duration;

const CONTENT_TYPE: &str = "application/vnd.api+json";

/// Blocking transport backed by the curl crate.
///
/// Holds only immutable timeouts, so it can be shared freely between threads.
#[derive(Debug, Clone, Copy)]
pub struct CurlTransport {
    /// Wall-clock limit for one physical attempt.
    pub request_timeout: Duration,
    /// Limit for establishing the TCP connection.
    pub connect_timeout: Duration,
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl CurlTransport {
    pub fn new(request_timeout: Duration, connect_timeout: Duration) -> Self {
        Self {
            request_timeout,
            connect_timeout,
        }
    }
}

impl Transport for CurlTransport {
    fn send(
        &self,
        request: &Request,
        cancel: Option<&CancelToken>,
    ) -> Result<Response, TransportError> {
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(&request.url)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.request_timeout)?;

        match request.method {
            Method::Get => easy.get(true)?,
            Method::Post => easy.post(true)?,
            Method::Delete => easy.custom_request(Method::Delete.as_str())?,
        }

        let mut list = curl::easy::List::new();
        list.append(&format!("Accept: {}", CONTENT_TYPE))?;
        if let Some(payload) = &request.body {
            list.append(&format!("Content-Type: {}", CONTENT_TYPE))?;
            // Send the buffered body in one go instead of waiting on 100-continue.
            list.append("Expect:")?;
            easy.post_fields_copy(payload)?;
        }
        easy.http_headers(list)?;

        if cancel.is_some() {
            easy.progress(true)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            if let Some(token) = cancel {
                // Returning false from the progress callback aborts the transfer.
                transfer.progress_function(|_, _, _, _| !token.is_cancelled())?;
            }
            if let Err(e) = transfer.perform() {
                if e.is_aborted_by_callback() {
                    return Err(TransportError::Aborted);
                }
                return Err(TransportError::Curl(e));
            }
        }

        let status = easy.response_code()? as u16;
        Ok(Response { status, body })
    }
}
