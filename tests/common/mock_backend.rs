//! Scripted backend: answers each request with the next queued response.
//!
//! Used where a test needs an exact status or body the stateful fake
//! would never produce.

#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use serde_json::json;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::{watch, Mutex};

/// What the client sent, for assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub body: String,
}

impl MockResponse {
    pub fn json(body: &str) -> Self {
        Self {
            status: 200,
            content_type: Some("application/json"),
            body: body.to_string(),
        }
    }

    /// `{"error": message}` with the given status.
    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            content_type: Some("application/json"),
            body: json!({ "error": message }).to_string(),
        }
    }

    /// `{"error": message, "code": code}` with the given status.
    pub fn with_code(status: u16, message: &str, code: &str) -> Self {
        Self {
            status,
            content_type: Some("application/json"),
            body: json!({ "error": message, "code": code }).to_string(),
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: Some("text/plain"),
            body: body.to_string(),
        }
    }

    pub fn empty(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            body: String::new(),
        }
    }
}

#[derive(Clone, Default)]
struct Script {
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
}

pub struct MockBackend {
    pub addr: SocketAddr,
    script: Script,
    shutdown: watch::Sender<bool>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let script = Script::default();
        let app = Router::new()
            .route("/{*path}", any(answer))
            .with_state(script.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().unwrap();
        let (shutdown, mut stop) = watch::channel(false);
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = stop.changed().await;
                })
                .await
                .ok();
        });

        Self {
            addr,
            script,
            shutdown,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn enqueue_response(&self, response: MockResponse) {
        self.script.responses.lock().await.push_back(response);
    }

    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.script.requests.lock().await.clone()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

async fn answer(State(script): State<Script>, request: Request) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let body = to_bytes(request.into_body(), 1024 * 1024)
        .await
        .map(|bytes| bytes.to_vec())
        .unwrap_or_default();
    script.requests.lock().await.push(CapturedRequest { method, path, body });

    let Some(scripted) = script.responses.lock().await.pop_front() else {
        return (StatusCode::INTERNAL_SERVER_ERROR, "no scripted response").into_response();
    };

    let status = StatusCode::from_u16(scripted.status).unwrap();
    let mut response = Response::builder().status(status);
    if let Some(content_type) = scripted.content_type {
        response = response.header(header::CONTENT_TYPE, content_type);
    }
    response.body(Body::from(scripted.body)).unwrap()
}
