//! Borough (alcaldía) reference entity.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Name of the only borough currently loaded by the ingestion command.
pub const ALVARO_OBREGON: &str = "Álvaro Obregón";

/// A municipal borough referenced by cadastral records.
///
/// Boroughs are seeded by migration and treated as read-only reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Borough {
    pub id: i64,
    pub name: String,
}

impl Borough {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
