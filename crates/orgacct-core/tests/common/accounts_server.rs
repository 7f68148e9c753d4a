//! In-memory organisation accounts API: create, fetch, zero-indexed paging and
//! versioned delete, with the same error messages the real service sends.

use super::{error_body, read_request, write_response, HttpRequest};
use orgacct_core::model::Envelope;
use orgacct_core::OrganisationAccount;
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

const COLLECTION: &str = "/v1/organisation/accounts";
const DEFAULT_PAGE_SIZE: usize = 100;

type Store = Arc<Mutex<Vec<OrganisationAccount>>>;

/// Starts the server in a background thread and returns its base URL
/// (e.g. "http://127.0.0.1:12345"). The server runs until the process exits.
pub fn start() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let store: Store = Arc::new(Mutex::new(Vec::new()));
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let store = Arc::clone(&store);
            thread::spawn(move || handle(stream, &store));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

fn handle(mut stream: TcpStream, store: &Store) {
    let Some(req) = read_request(&mut stream) else {
        return;
    };
    let (status, body) = route(&req, store);
    write_response(&mut stream, status, &body);
}

fn route(req: &HttpRequest, store: &Store) -> (u16, Vec<u8>) {
    if req.path == COLLECTION {
        return match req.method.as_str() {
            "GET" => list(req, store),
            "POST" => create(req, store),
            _ => (405, error_body("method not allowed")),
        };
    }
    let Some(id) = req
        .path
        .strip_prefix(COLLECTION)
        .and_then(|rest| rest.strip_prefix('/'))
    else {
        return (404, error_body("not found"));
    };
    match req.method.as_str() {
        "GET" => fetch(id, store),
        "DELETE" => delete(id, req, store),
        _ => (405, error_body("method not allowed")),
    }
}

fn list(req: &HttpRequest, store: &Store) -> (u16, Vec<u8>) {
    let accounts = store.lock().unwrap();
    let number = req
        .query_param("page[number]")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0);
    let size = req
        .query_param("page[size]")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(DEFAULT_PAGE_SIZE);
    let page: Vec<&OrganisationAccount> =
        accounts.iter().skip(number * size).take(size).collect();
    (200, serde_json::to_vec(&serde_json::json!({ "data": page })).unwrap())
}

fn create(req: &HttpRequest, store: &Store) -> (u16, Vec<u8>) {
    let env: Envelope<OrganisationAccount> = match serde_json::from_slice(&req.body) {
        Ok(env) => env,
        Err(e) => return (400, error_body(&format!("invalid request body: {}", e))),
    };
    let account = env.data;
    let country = &account.attributes.country;
    if country.len() != 2 || !country.chars().all(|c| c.is_ascii_uppercase()) {
        return (
            400,
            error_body("validation failure list:\n\tcountry in body should match '^[A-Z]{2}$'"),
        );
    }
    let mut accounts = store.lock().unwrap();
    if accounts.iter().any(|a| a.id == account.id) {
        return (
            400,
            error_body("Account cannot be created as it violates a duplicate constraint"),
        );
    }
    accounts.push(account.clone());
    (201, serde_json::to_vec(&Envelope { data: account }).unwrap())
}

fn fetch(id: &str, store: &Store) -> (u16, Vec<u8>) {
    let accounts = store.lock().unwrap();
    match accounts.iter().find(|a| a.id.to_string() == id) {
        Some(a) => (200, serde_json::to_vec(&Envelope { data: a }).unwrap()),
        None => (404, error_body(&format!("record {} does not exist", id))),
    }
}

fn delete(id: &str, req: &HttpRequest, store: &Store) -> (u16, Vec<u8>) {
    let Some(version) = req
        .query_param("version")
        .and_then(|v| v.parse::<i64>().ok())
    else {
        return (400, error_body("version is required"));
    };
    let mut accounts = store.lock().unwrap();
    let Some(pos) = accounts.iter().position(|a| a.id.to_string() == id) else {
        return (404, error_body(&format!("record {} does not exist", id)));
    };
    if accounts[pos].version != version {
        return (409, error_body("invalid version"));
    }
    accounts.remove(pos);
    (204, Vec::new())
}
