//! HTTP request handlers for API endpoints.

pub mod aggregate;
pub mod completion;
pub mod docs;
pub mod health;

pub use aggregate::aggregate_handler;
pub use completion::{
    get_borough_handler, get_construction_type_handler, list_boroughs_handler,
    list_construction_types_handler,
};
pub use docs::{redoc_handler, schema_handler, swagger_handler};
pub use health::health_handler;
