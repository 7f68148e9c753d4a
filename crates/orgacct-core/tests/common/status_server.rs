//! Server that answers with a scripted sequence of statuses, for retry tests.

use super::{error_body, read_request, write_response};
use std::collections::VecDeque;
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

pub struct StatusServer {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    bodies: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl StatusServer {
    /// Number of requests received so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Request bodies in arrival order, one per hit.
    pub fn bodies(&self) -> Vec<Vec<u8>> {
        self.bodies.lock().unwrap().clone()
    }
}

/// Answers with each status in `script` once, then with `fallback` forever.
/// Success responses echo the request body, or carry an empty `{"data": []}`
/// when there was none; failures carry
/// `{"error_message": "Service Unavailable"}`.
pub fn start(script: &[u16], fallback: u16) -> StatusServer {
    start_with_delay(script, fallback, Duration::ZERO)
}

/// Like `start` but holds every response for `delay` before writing it.
pub fn start_with_delay(script: &[u16], fallback: u16, delay: Duration) -> StatusServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let hits = Arc::new(AtomicUsize::new(0));
    let script = Arc::new(Mutex::new(script.iter().copied().collect::<VecDeque<u16>>()));
    let server_hits = Arc::clone(&hits);
    let bodies = Arc::new(Mutex::new(Vec::new()));
    let server_bodies = Arc::clone(&bodies);
    thread::spawn(move || {
        for mut stream in listener.incoming().flatten() {
            let hits = Arc::clone(&server_hits);
            let script = Arc::clone(&script);
            let bodies = Arc::clone(&server_bodies);
            thread::spawn(move || {
                let Some(req) = read_request(&mut stream) else {
                    return;
                };
                bodies.lock().unwrap().push(req.body.clone());
                hits.fetch_add(1, Ordering::SeqCst);
                let status = script.lock().unwrap().pop_front().unwrap_or(fallback);
                thread::sleep(delay);
                let body = if !(200..300).contains(&status) {
                    error_body("Service Unavailable")
                } else if req.body.is_empty() {
                    br#"{"data": []}"#.to_vec()
                } else {
                    req.body
                };
                write_response(&mut stream, status, &body);
            });
        }
    });
    StatusServer {
        base_url: format!("http://127.0.0.1:{}", port),
        hits,
        bodies,
    }
}

/// URL of a local port with nothing listening on it.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
