//! Common test utilities for integration tests
//!
//! Each test builds a fresh router over empty in-memory state, so tests are
//! fully isolated without any external setup or teardown.

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt as _;

use ticklist_api::app::{build_router, AppState};
use ticklist_api::config::Config;

/// Test context wrapping a router over fresh state
pub struct TestContext {
    pub app: Router,
}

impl TestContext {
    /// Creates a new context with empty identity and task tables
    pub fn new() -> Self {
        let state = AppState::new(Config::default());
        Self {
            app: build_router(state),
        }
    }

    /// Sends a request and returns the raw response
    pub async fn send(&self, request: Request<Body>) -> Response<axum::body::Body> {
        self.app
            .clone()
            .oneshot(request)
            .await
            .expect("request should not fail at the transport level")
    }

    /// Sends a JSON request with an optional bearer token
    pub async fn send_json(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response<axum::body::Body> {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    /// Registers a user and returns their session token
    pub async fn register(&self, username: &str, email: &str, password: &str) -> String {
        let response = self
            .send_json(
                "POST",
                "/register",
                None,
                Some(json!({
                    "username": username,
                    "email": email,
                    "password": password,
                })),
            )
            .await;

        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        body["access_token"]
            .as_str()
            .expect("register response should carry a token")
            .to_string()
    }

    /// Creates a task and returns its JSON representation
    pub async fn create_task(&self, token: &str, body: Value) -> Value {
        let response = self.send_json("POST", "/todos", Some(token), Some(body)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }
}

/// Reads a response body as JSON
pub async fn body_json(response: Response<axum::body::Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}
