// ABOUTME: Shared test helpers - temp databases, test resources, mock upstream servers
// ABOUTME: Used by the integration test suites via `mod common`
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(dead_code)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use axum::body::Body;
use axum::routing::post;
use axum::{Json, Router};
use http::{Request, StatusCode};
use nutriplan_server::auth::AuthManager;
use nutriplan_server::config::{AuthConfig, ServerConfig};
use nutriplan_server::database::Database;
use nutriplan_server::prediction::{PredictionClient, PredictionServiceConfig};
use nutriplan_server::routes;
use nutriplan_server::server::ServerResources;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub const TEST_JWT_SECRET: &[u8] = b"nutriplan-test-secret-nutriplan-test-secret";

/// A router wired to a throwaway database, plus the resources behind it
pub struct TestApp {
    pub app: Router,
    pub resources: Arc<ServerResources>,
    _tempdir: TempDir,
}

/// Fresh on-disk SQLite database in a temp directory
pub async fn test_database() -> (Database, TempDir) {
    let tempdir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}/test.db", tempdir.path().display());
    let database = Database::new(&url).await.unwrap();
    (database, tempdir)
}

/// Build the full application router against a fresh database, pointing the
/// prediction client at `prediction_base_url`
pub async fn spawn_app(prediction_base_url: &str) -> TestApp {
    let (database, tempdir) = test_database().await;

    let config = ServerConfig {
        http_port: 0,
        database_url: String::new(),
        auth: AuthConfig {
            jwt_secret: TEST_JWT_SECRET.to_vec(),
            token_expiry_hours: 24,
        },
        prediction: PredictionServiceConfig {
            base_url: prediction_base_url.to_owned(),
            timeout: Duration::from_secs(2),
        },
    };

    let auth_manager = AuthManager::new(TEST_JWT_SECRET, 24);
    let prediction = PredictionClient::new(config.prediction.clone()).unwrap();
    let resources = Arc::new(ServerResources::new(
        database,
        auth_manager,
        prediction,
        config,
    ));

    TestApp {
        app: routes::router(Arc::clone(&resources)),
        resources,
        _tempdir: tempdir,
    }
}

/// Spin up a stub prediction service answering every request with the given
/// status and body; returns its base URL
pub async fn spawn_prediction_stub(status: StatusCode, body: Value) -> String {
    let app = Router::new().route(
        "/predict/recommendation",
        post(move |Json(_request): Json<Value>| {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    );
    serve_stub(app).await
}

/// Stub prediction service that echoes the received payload back under
/// an `echo` key
pub async fn spawn_echo_prediction_stub() -> String {
    let app = Router::new().route(
        "/predict/recommendation",
        post(|Json(request): Json<Value>| async move {
            Json(serde_json::json!({ "echo": request }))
        }),
    );
    serve_stub(app).await
}

/// Stub prediction service that sleeps before answering, for timeout tests
pub async fn spawn_slow_prediction_stub(delay: Duration) -> String {
    let app = Router::new().route(
        "/predict/recommendation",
        post(move |Json(_request): Json<Value>| async move {
            tokio::time::sleep(delay).await;
            Json(serde_json::json!({ "late": true }))
        }),
    );
    serve_stub(app).await
}

async fn serve_stub(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Build a JSON request with an optional bearer token
pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Build a bodyless request with an optional bearer token
pub fn bare_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

/// Read a response body as JSON
pub async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
