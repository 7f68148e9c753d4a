//! Shared helpers for integration tests: tiny blocking HTTP servers and fixtures.

#![allow(dead_code)]

pub mod accounts_server;
pub mod status_server;

use orgacct_core::config::{ClientConfig, RetryConfig};
use orgacct_core::{AccountAttributes, OrganisationAccount};
use std::io::{Read, Write};
use std::net::TcpStream;
use std::time::Duration;
use uuid::Uuid;

pub const ORGANISATION_ID: &str = "eb0bd6f5-c3f5-44b2-b677-acd23cdde73c";

const FIXTURE_IDS: [&str; 5] = [
    "a9e3b971-a241-4930-a09f-a7c04bf394fe",
    "3c76048a-2024-4917-b911-1b3e88fccfb3",
    "5e4a1d3c-8f1b-4d7a-9b0e-2f6c1a7d9e10",
    "7b2f9c44-61d3-4e8a-8a55-0c9d3e2b1f6a",
    "c1d8e2f3-4a5b-4c6d-8e7f-9a0b1c2d3e4f",
];

/// Five valid accounts in creation order.
pub fn fixtures() -> Vec<OrganisationAccount> {
    FIXTURE_IDS
        .iter()
        .enumerate()
        .map(|(i, id)| account(id, &format!("Holder {}", i + 1)))
        .collect()
}

pub fn account(id: &str, holder: &str) -> OrganisationAccount {
    OrganisationAccount::new(
        Uuid::parse_str(id).unwrap(),
        Uuid::parse_str(ORGANISATION_ID).unwrap(),
        AccountAttributes {
            country: "GB".into(),
            base_currency: Some("GBP".into()),
            bank_id: Some("400300".into()),
            bank_id_code: Some("GBDSC".into()),
            bic: Some("NWBKGB22".into()),
            name: vec![holder.to_string()],
            joint_account: Some(false),
            ..Default::default()
        },
    )
}

/// Config pointing at `base_url` with millisecond backoff and the given ceiling.
pub fn fast_config(base_url: &str, max_elapsed_ms: u64) -> ClientConfig {
    ClientConfig {
        base_url: base_url.to_string(),
        request_timeout_secs: 5,
        connect_timeout_secs: 2,
        retry: Some(RetryConfig {
            initial_interval_ms: 10,
            multiplier: 2.0,
            randomization_factor: 0.0,
            max_interval_ms: 100,
            max_elapsed_ms,
            ..RetryConfig::default()
        }),
    }
}

/// A parsed HTTP/1.1 request: method, path, raw query (if any) and body.
pub struct HttpRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub body: Vec<u8>,
}

impl HttpRequest {
    pub fn query_param(&self, name: &str) -> Option<String> {
        let query = self.query.as_deref()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }
}

/// Reads one request (head plus Content-Length body). None if the peer hung up.
pub fn read_request(stream: &mut TcpStream) -> Option<HttpRequest> {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    let head_end = loop {
        if let Some(pos) = find(&data, b"\r\n\r\n") {
            break pos;
        }
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return None,
            Ok(n) => data.extend_from_slice(&buf[..n]),
        }
    };

    let head = std::str::from_utf8(&data[..head_end]).ok()?.to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let target = request_line.next()?.to_string();

    let content_length = lines
        .filter_map(|l| l.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = data[head_end + 4..].to_vec();
    while body.len() < content_length {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return None,
            Ok(n) => body.extend_from_slice(&buf[..n]),
        }
    }
    body.truncate(content_length);

    let (path, query) = match target.split_once('?') {
        Some((p, q)) => (p.to_string(), Some(q.to_string())),
        None => (target, None),
    };
    Some(HttpRequest {
        method,
        path,
        query,
        body,
    })
}

pub fn write_response(stream: &mut TcpStream, status: u16, body: &[u8]) {
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/vnd.api+json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        reason(status),
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
    let _ = stream.flush();
}

pub fn error_body(message: &str) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({ "error_message": message })).unwrap()
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        409 => "Conflict",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => "Unknown",
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
