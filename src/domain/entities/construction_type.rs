//! Construction type (uso de construcción) reference entity.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Construction type used for rows whose CSV `uso_construccion` column is empty.
pub const UNZONED: &str = "Sin Zonificación";

/// Number of construction types the current deployment is seeded with.
pub const EXPECTED_CONSTRUCTION_TYPES: i64 = 7;

/// A land-use classification of a cadastral record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct ConstructionType {
    pub id: i64,
    pub name: String,
}

impl ConstructionType {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_type_creation() {
        let ctype = ConstructionType::new(7, UNZONED);

        assert_eq!(ctype.id, 7);
        assert_eq!(ctype.name, "Sin Zonificación");
    }
}
