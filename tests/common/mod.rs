#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde_json::Value;
use coffee_shop_api::{app_router, config::AppConfig, db, AppState};
use tower::ServiceExt;

/// Helper harness for spinning up the application backed by an in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.auto_migrate = true;
        // a single connection keeps every query on the same in-memory database
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations");

        let state = AppState::new(Arc::new(pool), cfg);
        let router = app_router(state.clone());

        Self { router, state }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.state.db
    }

    /// Executes raw SQL against the test database.
    pub async fn execute_sql(&self, sql: &str) {
        self.db()
            .execute(Statement::from_string(
                self.db().get_database_backend(),
                sql.to_string(),
            ))
            .await
            .expect("failed to execute sql");
    }

    /// Send a JSON request against the router.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> axum::response::Response {
        let body = match body {
            Some(json) => {
                Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
            }
            None => Body::empty(),
        };
        self.request_raw(method, uri, body).await
    }

    /// Send an arbitrary body, for malformed-input cases.
    pub async fn request_raw(
        &self,
        method: Method,
        uri: &str,
        body: impl Into<Body>,
    ) -> axum::response::Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.into())
            .expect("failed to build request");

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Sends a request and decodes the JSON response body.
    pub async fn request_json(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let response = self.request(method, uri, body).await;
        let status = response.status();
        (status, response_json(response).await)
    }

    pub async fn list_orders(&self) -> Vec<Value> {
        let (status, body) = self.request_json(Method::GET, "/api/orders", None).await;
        assert_eq!(status, StatusCode::OK);
        body.as_array().cloned().expect("order list should be an array")
    }
}

pub async fn response_json(response: axum::response::Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).expect("parse response body")
}
