//! Coffee Shop API Library
//!
//! Order intake and administration for the coffee storefront: the `/api/orders`
//! endpoint, the menu catalog, health probes and the admin HTTP client.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod client;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod health;
pub mod menu;
pub mod middleware_helpers;
pub mod openapi;
pub mod repositories;
pub mod tracing;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::menu::MenuCatalog;
use crate::repositories::{OrderRepository, OrderStore};

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub orders: Arc<dyn OrderStore>,
    pub menu: Arc<MenuCatalog>,
}

impl AppState {
    /// Wires the sea-orm backed order repository and the default menu.
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        Self {
            orders: Arc::new(OrderRepository::new(db.clone())),
            menu: Arc::new(MenuCatalog::default()),
            db,
            config,
        }
    }
}

/// Routes mounted under `/api`
pub fn api_routes() -> Router<AppState> {
    let orders = get(handlers::orders::list_orders)
        .post(handlers::orders::create_order)
        .put(handlers::orders::update_order)
        .delete(handlers::orders::delete_order)
        .fallback(handlers::orders::method_not_allowed);

    Router::new()
        .route("/orders", orders)
        .route("/menu", get(handlers::menu::list_menu))
        .route("/menu/:id", get(handlers::menu::get_menu_item))
        .route("/menu/:id/order", post(handlers::menu::quick_order))
}

/// Full application router with tracing and request-id layers applied
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .nest("/health", health::health_routes())
        .nest("/api", api_routes())
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .layer(crate::tracing::configure_http_tracing())
        .layer(middleware::from_fn(
            middleware_helpers::request_id_middleware,
        ))
        .with_state(state)
}
