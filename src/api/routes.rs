//! Public API route configuration, nested under `/price-m2`.

use crate::api::handlers::{
    aggregate_handler, get_borough_handler, get_construction_type_handler,
    list_boroughs_handler, list_construction_types_handler, redoc_handler, schema_handler,
    swagger_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// # Endpoints
///
/// - `GET /zip-codes/{zip_code}/aggregate/{aggregate}` - Aggregated price per m2
/// - `GET /completion/alcaldia[/{id}]` - Boroughs
/// - `GET /completion/uso_construccion[/{id}]` - Construction types
/// - `GET /doc/schema/download` - OpenAPI document
/// - `GET /doc/schema/swagger-ui`, `GET /doc/schema/redoc` - Documentation pages
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/zip-codes/{zip_code}/aggregate/{aggregate}",
            get(aggregate_handler),
        )
        .route("/completion/alcaldia", get(list_boroughs_handler))
        .route("/completion/alcaldia/{id}", get(get_borough_handler))
        .route(
            "/completion/uso_construccion",
            get(list_construction_types_handler),
        )
        .route(
            "/completion/uso_construccion/{id}",
            get(get_construction_type_handler),
        )
        .route("/doc/schema/download", get(schema_handler))
        .route("/doc/schema/swagger-ui", get(swagger_handler))
        .route("/doc/schema/redoc", get(redoc_handler))
}
