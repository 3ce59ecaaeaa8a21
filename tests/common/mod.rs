//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use api_proxy::config::ProxyConfig;
use api_proxy::http::HttpServer;
use api_proxy::lifecycle::Shutdown;
use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    Router,
};
use tokio::net::TcpListener;

/// One request as the mock backend received it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path_and_query: String,
    pub content_type: Option<String>,
    pub request_id: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

type Reply = Arc<dyn Fn(&Recorded) -> (u16, String) + Send + Sync>;

#[derive(Clone)]
struct BackendState {
    log: Arc<Mutex<Vec<Recorded>>>,
    reply: Reply,
    delay: Duration,
}

/// Handle to a running mock backend.
pub struct MockBackend {
    pub addr: SocketAddr,
    log: Arc<Mutex<Vec<Recorded>>>,
}

impl MockBackend {
    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<Recorded> {
        self.log.lock().unwrap().clone()
    }

    pub fn last(&self) -> Recorded {
        self.requests().pop().expect("backend received no request")
    }
}

/// Start a backend that records each request and answers with `reply`.
pub async fn start_mock_backend<F>(reply: F) -> MockBackend
where
    F: Fn(&Recorded) -> (u16, String) + Send + Sync + 'static,
{
    start_slow_backend(Duration::ZERO, reply).await
}

/// Like [`start_mock_backend`], but waits `delay` before answering.
pub async fn start_slow_backend<F>(delay: Duration, reply: F) -> MockBackend
where
    F: Fn(&Recorded) -> (u16, String) + Send + Sync + 'static,
{
    let log = Arc::new(Mutex::new(Vec::new()));
    let state = BackendState {
        log: log.clone(),
        reply: Arc::new(reply),
        delay,
    };
    let app = Router::new().fallback(record).with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockBackend { addr, log }
}

async fn record(State(state): State<BackendState>, request: Request<Body>) -> (StatusCode, String) {
    let (parts, body) = request.into_parts();
    let header = |name: &str| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    let recorded = Recorded {
        method: parts.method.to_string(),
        path_and_query: parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_default(),
        content_type: header("content-type"),
        request_id: header("x-request-id"),
        authorization: header("authorization"),
        body: String::from_utf8_lossy(&bytes).into_owned(),
    };

    let (status, body) = (state.reply)(&recorded);
    state.log.lock().unwrap().push(recorded);
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    (StatusCode::from_u16(status).unwrap(), body)
}

/// An address nothing is listening on.
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Proxy config pointed at `backend`, listening on an ephemeral port.
pub fn proxy_config(backend: SocketAddr) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.backend.origin = backend.to_string();
    config
}

/// Start the proxy and return its address plus the shutdown handle.
pub async fn start_proxy(config: ProxyConfig) -> (SocketAddr, Shutdown) {
    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
