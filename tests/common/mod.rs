use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use imgrelay::api::Context;
use imgrelay::config::Config;
use imgrelay::search::{ImageSearch, SearchError};
use imgrelay::server::router;
pub use imgrelay::test_support::serve_stub;
use reqwest::Client;
use tower::ServiceExt;

pub enum Canned {
    Urls(Vec<String>),
    Fail,
}

/// Search backend that hands back a fixed answer and remembers how it was called
pub struct StubSearch {
    pub answer: Canned,
    pub calls: AtomicUsize,
    pub last_count: AtomicUsize,
}

impl StubSearch {
    pub fn new(answer: Canned) -> Arc<Self> {
        Arc::new(StubSearch {
            answer,
            calls: AtomicUsize::new(0),
            last_count: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_count(&self) -> usize {
        self.last_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageSearch for StubSearch {
    async fn search(&self, _query: &str, count: usize) -> Result<Vec<String>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.last_count.store(count, Ordering::SeqCst);
        match &self.answer {
            Canned::Urls(urls) => Ok(urls.iter().take(count).cloned().collect()),
            Canned::Fail => Err(SearchError::Url(url::ParseError::EmptyHost)),
        }
    }
}

pub fn config(base_path: Option<PathBuf>) -> Config {
    Config {
        port: 0,
        base_path,
        unsplash_access_key: "test-key".to_owned(),
        unsplash_api_root: "http://127.0.0.1:1".to_owned(),
        user_agent: "imgrelay-tests".to_owned(),
    }
}

pub fn app(base_path: Option<PathBuf>, search: Arc<StubSearch>) -> Router {
    router(Arc::new(Context {
        config: Arc::new(config(base_path)),
        client: Client::new(),
        search,
    }))
}

pub async fn send(app: Router, request: Request<Body>) -> (u16, String) {
    let response: Response<Body> = app.oneshot(request).await.unwrap();
    let status = response.status().as_u16();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, json: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(json.to_owned()))
        .unwrap()
}
