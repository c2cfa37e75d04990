//! Minimal HTTP/1.1 server answering canned GitHub REST responses.
//!
//! Routes are matched on the exact request target (path and query).
//! Unknown targets answer 404 like the real API.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

#[derive(Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CannedResponse {
    pub fn json(body: &str) -> Self {
        Self {
            status: 200,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: body.to_string(),
        }
    }

    pub fn raw(body: &str) -> Self {
        Self {
            status: 200,
            headers: vec![("Content-Type".to_string(), "text/plain".to_string())],
            body: body.to_string(),
        }
    }

    pub fn rate_limited(reset_epoch: i64) -> Self {
        Self {
            status: 403,
            headers: vec![
                ("x-ratelimit-remaining".to_string(), "0".to_string()),
                ("x-ratelimit-reset".to_string(), reset_epoch.to_string()),
            ],
            body: r#"{"message": "API rate limit exceeded"}"#.to_string(),
        }
    }
}

#[derive(Default)]
pub struct FakeGitHub {
    routes: HashMap<String, CannedResponse>,
}

impl FakeGitHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, target: &str, response: CannedResponse) -> Self {
        self.routes.insert(target.to_string(), response);
        self
    }

    /// Starts serving on an ephemeral port and returns the base URL.
    ///
    /// The server thread lives until the test process exits.
    pub fn start(self) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();
        let routes = self.routes;

        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                handle(stream, &routes);
            }
        });

        format!("http://{}", address)
    }
}

fn handle(mut stream: TcpStream, routes: &HashMap<String, CannedResponse>) {
    let mut request = Vec::new();
    let mut buffer = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buffer) {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&buffer[..n]),
        }
    }

    let request = String::from_utf8_lossy(&request);
    let target = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/");

    let response = routes.get(target).cloned().unwrap_or(CannedResponse {
        status: 404,
        headers: vec![("Content-Type".to_string(), "application/json".to_string())],
        body: r#"{"message": "Not Found"}"#.to_string(),
    });

    let mut head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        response.status,
        reason(response.status),
        response.body.len()
    );
    for (name, value) in &response.headers {
        head.push_str(&format!("{}: {}\r\n", name, value));
    }
    head.push_str("\r\n");

    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(response.body.as_bytes());
    let _ = stream.flush();
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        403 => "Forbidden",
        404 => "Not Found",
        429 => "Too Many Requests",
        _ => "Internal Server Error",
    }
}
