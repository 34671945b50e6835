//! Scripted transport for tests

use std::collections::HashMap;
use std::sync::Mutex;

use super::transport::{HttpRequest, HttpResponse, Method, Transport, TransportError};

/// Answers from a route table and records every request it sees.
/// Unknown routes answer 404.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<(Method, String), (u16, String)>>,
    offline: Mutex<bool>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` (path includes any query string)
    pub fn respond(&self, method: Method, path: &str, status: u16, body: &str) {
        self.routes
            .lock()
            .unwrap()
            .insert((method, path.to_string()), (status, body.to_string()));
    }

    /// Answer with a JSON value
    pub fn respond_json(&self, method: Method, path: &str, status: u16, body: &serde_json::Value) {
        self.respond(method, path, status, &body.to_string());
    }

    /// Every request fails as if the server were unreachable
    pub fn go_offline(&self) {
        *self.offline.lock().unwrap() = true;
    }

    /// Requests seen so far
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Transport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let key = (request.method, request.path().to_string());
        self.requests.lock().unwrap().push(request);

        if *self.offline.lock().unwrap() {
            return Err(TransportError("connection refused".to_string()));
        }

        let (status, body) = self
            .routes
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or((404, String::new()));

        Ok(HttpResponse {
            status,
            reason: reason(status).to_string(),
            body,
        })
    }
}

const fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        409 => "Conflict",
        500 => "Internal Server Error",
        _ => "",
    }
}
