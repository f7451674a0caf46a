/*!
 * # Health Check Module
 *
 * - Liveness (`/health`): the process is serving requests
 * - Readiness (`/health/ready`): the database answers a ping
 */

use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};
use utoipa::ToSchema;

/// Basic health status
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Up,
    Down,
}

impl HealthStatus {
    fn status_code(&self) -> StatusCode {
        match self {
            HealthStatus::Up => StatusCode::OK,
            HealthStatus::Down => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Health check detail
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct HealthDetail {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct HealthInfo {
    pub status: HealthStatus,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub details: HashMap<String, HealthDetail>,
}

impl HealthInfo {
    fn new(status: HealthStatus) -> Self {
        Self {
            status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            details: HashMap::new(),
        }
    }
}

/// Liveness endpoint; never touches the database
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthInfo)),
    tag = "health"
)]
pub async fn simple_health_check() -> impl IntoResponse {
    debug!("Health check endpoint called");
    (StatusCode::OK, Json(HealthInfo::new(HealthStatus::Up)))
}

/// Readiness endpoint
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Database reachable", body = HealthInfo),
        (status = 503, description = "Database unreachable", body = HealthInfo),
    ),
    tag = "health"
)]
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = match crate::db::check_connection(&state.db).await {
        Ok(()) => HealthDetail {
            status: HealthStatus::Up,
            message: None,
        },
        Err(e) => {
            warn!("Readiness check failed: {}", e);
            HealthDetail {
                status: HealthStatus::Down,
                message: Some("database unreachable".to_string()),
            }
        }
    };

    let mut health = HealthInfo::new(database.status.clone());
    health.details.insert("database".to_string(), database);

    (health.status.status_code(), Json(health))
}

pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(simple_health_check))
        .route("/ready", get(readiness_check))
}
