//! Top-level router combining the price API, health check and admin panel.
//!
//! # Route Structure
//!
//! - `/price-m2/*` - Public price API and its documentation
//! - `GET /health` - Database and cache health
//! - `/admin/*`    - Admin panel (HTTP Basic)
//!
//! Trailing slashes are trimmed before routing.

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use crate::web::middleware::admin_auth;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the application router.
///
/// `behind_proxy` makes rate limiting key on forwarded client IPs; enable
/// only behind a trusted reverse proxy.
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let price_router = api::routes::public_routes().layer(rate_limit::layer(behind_proxy));

    let admin_router = web::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth::layer,
        ))
        .layer(rate_limit::secure_layer(behind_proxy));

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/price-m2", price_router)
        .nest("/admin", admin_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
