//! HTTP API server for the inventory and order system.
//!
//! Exposes product and order endpoints over axum, with structured logging
//! (tracing) and Prometheus metrics. Handlers are generic over the store so
//! the same router runs against PostgreSQL or the in-memory store.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::get;
use domain::{OrderService, ProductService};
use inventory_store::InventoryStore;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use config::Config;

/// Request bodies larger than this are rejected with 400.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Shared application state accessible from all handlers.
pub struct AppState<S: InventoryStore> {
    pub products: ProductService<S>,
    pub orders: OrderService<S, S>,
}

/// Builds the application state, wiring both workflows to one store.
pub fn create_state<S: InventoryStore>(store: S) -> Arc<AppState<S>> {
    Arc::new(AppState {
        products: ProductService::new(store.clone()),
        orders: OrderService::new(store.clone(), store),
    })
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: InventoryStore>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
    config: &Config,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            "/products",
            get(routes::products::list::<S>).post(routes::products::create::<S>),
        )
        .route(
            "/products/{id}",
            get(routes::products::get::<S>).patch(routes::products::update_stock::<S>),
        )
        .route(
            "/orders",
            get(routes::orders::list::<S>).post(routes::orders::create::<S>),
        )
        .route("/orders/{id}", get(routes::orders::get::<S>))
        .with_state(state)
        .merge(metrics_router)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
