//! Admin panel route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    boroughs_handler, construction_types_handler, overview_handler, records_handler,
};
use axum::{Router, routing::get};

/// Read-only admin pages, protected by
/// [`crate::web::middleware::admin_auth`].
///
/// - `GET /` - Table counts
/// - `GET /boroughs` - Borough list
/// - `GET /construction-types` - Construction type list
/// - `GET /records` - Paginated records, optional `zip_code` filter
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(overview_handler))
        .route("/boroughs", get(boroughs_handler))
        .route("/construction-types", get(construction_types_handler))
        .route("/records", get(records_handler))
}
