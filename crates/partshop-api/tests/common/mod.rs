#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use tokio::net::TcpListener;

use partshop_core::config::ApiSettings;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> serde_json::Value { serde_json::from_str(&self.body).expect("request body is json") }
}

#[derive(Default)]
struct Canned {
    responses: Mutex<VecDeque<(u16, String)>>,
    seen: Mutex<Vec<Recorded>>,
}

/// Handle on a running mock backend.
pub struct Backend {
    pub base_url: String,
    state: Arc<Canned>,
}

impl Backend {
    /// Requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<Recorded> { self.state.seen.lock().expect("seen lock").clone() }
}

/// Answer each incoming request with the next canned `(status, body)`,
/// whatever its path, and record what the client sent.
pub async fn serve(responses: Vec<(u16, String)>) -> Backend {
    let state = Arc::new(Canned { responses: Mutex::new(responses.into()), seen: Mutex::default() });
    let app = Router::new().fallback(reply).with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock backend");
    });
    Backend { base_url: format!("http://{addr}"), state }
}

async fn reply(State(state): State<Arc<Canned>>, method: Method, uri: Uri, headers: HeaderMap, body: String) -> impl IntoResponse {
    let headers = headers
        .iter()
        .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or_default().to_string()))
        .collect();
    state.seen.lock().expect("seen lock").push(Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        headers,
        body,
    });

    let (status, body) = state
        .responses
        .lock()
        .expect("responses lock")
        .pop_front()
        .unwrap_or((500, r#"{"success":false,"message":"no canned response left"}"#.to_string()));
    let status = StatusCode::from_u16(status).expect("valid status");
    (status, [(header::CONTENT_TYPE, "application/json")], body)
}

pub fn settings(base_url: &str) -> ApiSettings {
    ApiSettings { base_url: base_url.to_string(), timeout_secs: 5, auth_token: Some("tok-123".to_string()) }
}
