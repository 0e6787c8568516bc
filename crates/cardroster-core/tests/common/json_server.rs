//! Minimal HTTP/1.1 server answering GETs with canned JSON, for integration tests.
//!
//! Each route has a status and body; a route can be told to fail its first N
//! requests with 503 to exercise retries. Every request is counted per path.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
struct Route {
    status: u16,
    body: String,
    fail_first: usize,
}

#[derive(Debug, Default)]
struct State {
    routes: HashMap<String, Route>,
    hits: HashMap<String, usize>,
}

/// Handle to a running server. The server lives until the process exits.
#[derive(Clone)]
pub struct JsonServer {
    base: String,
    state: Arc<Mutex<State>>,
}

impl JsonServer {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let state = Arc::new(Mutex::new(State::default()));
        let server_state = Arc::clone(&state);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let state = Arc::clone(&server_state);
                thread::spawn(move || handle(stream, &state));
            }
        });
        Self {
            base: format!("http://127.0.0.1:{}", port),
            state,
        }
    }

    /// Base URL without trailing slash, e.g. `http://127.0.0.1:12345`.
    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn route(&self, path: &str, status: u16, body: &str) -> &Self {
        self.route_flaky(path, status, body, 0)
    }

    /// Like `route`, but the first `fail_first` requests get 503.
    pub fn route_flaky(&self, path: &str, status: u16, body: &str, fail_first: usize) -> &Self {
        self.state.lock().unwrap().routes.insert(
            path.to_string(),
            Route {
                status,
                body: body.to_string(),
                fail_first,
            },
        );
        self
    }

    pub fn hits(&self, path: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .hits
            .get(path)
            .copied()
            .unwrap_or(0)
    }
}

fn handle(mut stream: TcpStream, state: &Mutex<State>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let Ok(request) = std::str::from_utf8(&buf[..n]) else {
        return;
    };
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("").to_string();

    let (status, body) = if !method.eq_ignore_ascii_case("GET") {
        (405, String::new())
    } else {
        let mut state = state.lock().unwrap();
        let hit = {
            let count = state.hits.entry(path.clone()).or_insert(0);
            *count += 1;
            *count
        };
        match state.routes.get(&path) {
            Some(route) if hit <= route.fail_first => (503, String::new()),
            Some(route) => (route.status, route.body.clone()),
            None => (404, r#"{"error":"not found"}"#.to_string()),
        }
    };

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason(status),
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        405 => "Method Not Allowed",
        503 => "Service Unavailable",
        _ => "Status",
    }
}
