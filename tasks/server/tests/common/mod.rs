use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use std::sync::Arc;
use tasks_server::task::repository::{SeaOrmTaskRepository, TaskRepository};
use tasks_server::web::create_app;
use tower::ServiceExt;

/// Opens a fresh in-memory database with the task table in place.
pub async fn setup_repository() -> anyhow::Result<SeaOrmTaskRepository> {
    // Allow multiple calls to init for tests.
    let _ = tracing_subscriber::fmt().with_env_filter("debug").try_init();
    let repository = SeaOrmTaskRepository::connect("sqlite::memory:").await?;
    repository.init().await?;
    Ok(repository)
}

/// Builds the full application router on a fresh in-memory database.
#[allow(dead_code)] // not every test binary drives the router
pub async fn setup_app() -> anyhow::Result<Router> {
    let repository = setup_repository().await?;
    Ok(create_app(Arc::new(repository)))
}

/// Status, headers and raw body of a response.
#[allow(dead_code)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[allow(dead_code)]
impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("response body should be JSON")
    }

    pub fn text(&self) -> &str {
        std::str::from_utf8(&self.body).expect("response body should be UTF-8")
    }
}

/// Sends a single request through the router.
#[allow(dead_code)]
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> TestResponse {
    let body = match body {
        Some(json) => Body::from(json.to_string()),
        None => Body::empty(),
    };
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    TestResponse {
        status,
        headers,
        body,
    }
}
