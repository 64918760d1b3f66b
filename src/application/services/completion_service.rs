//! Completion (autocomplete) service over the reference tables.

use std::sync::Arc;

use crate::domain::entities::{Borough, ConstructionType};
use crate::domain::repositories::{BoroughRepository, ConstructionTypeRepository};
use crate::error::AppError;
use serde_json::json;

/// Number of boroughs at which listing starts logging a warning.
pub const BOROUGH_LIMIT_WARNING: i64 = 1000;
/// Hard cap on the number of boroughs returned.
pub const BOROUGH_ACTUAL_LIMIT: i64 = 1700;

/// Number of construction types at which listing starts logging a warning.
pub const CONSTRUCTION_TYPE_LIMIT_WARNING: i64 = 20;
/// Hard cap on the number of construction types returned.
pub const CONSTRUCTION_TYPE_ACTUAL_LIMIT: i64 = 50;

pub const NOT_FOUND_MESSAGE: &str = "No encontrado.";

/// Read-only listings used by front-end selectors.
///
/// Listings are capped; reaching the warning threshold is logged so the caps
/// can be revisited before data starts being cut off.
pub struct CompletionService<B: BoroughRepository, C: ConstructionTypeRepository> {
    boroughs: Arc<B>,
    construction_types: Arc<C>,
}

impl<B: BoroughRepository, C: ConstructionTypeRepository> CompletionService<B, C> {
    /// Creates a new completion service.
    pub fn new(boroughs: Arc<B>, construction_types: Arc<C>) -> Self {
        Self {
            boroughs,
            construction_types,
        }
    }

    /// Lists up to [`BOROUGH_ACTUAL_LIMIT`] boroughs.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_boroughs(&self) -> Result<Vec<Borough>, AppError> {
        let boroughs = self.boroughs.list(BOROUGH_ACTUAL_LIMIT).await?;

        if boroughs.len() as i64 >= BOROUGH_LIMIT_WARNING {
            tracing::warn!(
                current = boroughs.len(),
                warning_limit = BOROUGH_LIMIT_WARNING,
                "Borough listing is approaching its limit"
            );
        }

        Ok(boroughs)
    }

    /// Retrieves one borough.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the borough does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_borough(&self, id: i64) -> Result<Borough, AppError> {
        self.boroughs
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(NOT_FOUND_MESSAGE, json!({ "borough": id })))
    }

    /// Lists up to [`CONSTRUCTION_TYPE_ACTUAL_LIMIT`] construction types.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_construction_types(&self) -> Result<Vec<ConstructionType>, AppError> {
        let types = self
            .construction_types
            .list(CONSTRUCTION_TYPE_ACTUAL_LIMIT)
            .await?;

        if types.len() as i64 >= CONSTRUCTION_TYPE_LIMIT_WARNING {
            tracing::warn!(
                current = types.len(),
                warning_limit = CONSTRUCTION_TYPE_LIMIT_WARNING,
                "Construction type listing is approaching its limit"
            );
        }

        Ok(types)
    }

    /// Retrieves one construction type.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the construction type does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_construction_type(&self, id: i64) -> Result<ConstructionType, AppError> {
        self.construction_types
            .find_by_id(id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(NOT_FOUND_MESSAGE, json!({ "construction_type": id }))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockBoroughRepository, MockConstructionTypeRepository};

    fn service(
        boroughs: MockBoroughRepository,
        types: MockConstructionTypeRepository,
    ) -> CompletionService<MockBoroughRepository, MockConstructionTypeRepository> {
        CompletionService::new(Arc::new(boroughs), Arc::new(types))
    }

    #[tokio::test]
    async fn test_list_boroughs_uses_actual_limit() {
        let mut boroughs = MockBoroughRepository::new();
        boroughs
            .expect_list()
            .withf(|limit| *limit == BOROUGH_ACTUAL_LIMIT)
            .times(1)
            .returning(|_| Ok(vec![Borough::new(1, "Álvaro Obregón")]));

        let result = service(boroughs, MockConstructionTypeRepository::new())
            .list_boroughs()
            .await
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Álvaro Obregón");
    }

    #[tokio::test]
    async fn test_list_construction_types_over_warning_still_returns_all() {
        let mut types = MockConstructionTypeRepository::new();
        types
            .expect_list()
            .withf(|limit| *limit == CONSTRUCTION_TYPE_ACTUAL_LIMIT)
            .times(1)
            .returning(|_| {
                Ok((1..=25)
                    .map(|i| ConstructionType::new(i, format!("Tipo {i}")))
                    .collect())
            });

        let result = service(MockBoroughRepository::new(), types)
            .list_construction_types()
            .await
            .unwrap();

        assert_eq!(result.len(), 25);
    }

    #[tokio::test]
    async fn test_get_construction_type_not_found() {
        let mut types = MockConstructionTypeRepository::new();
        types.expect_find_by_id().times(1).returning(|_| Ok(None));

        let result = service(MockBoroughRepository::new(), types)
            .get_construction_type(42)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_borough_success() {
        let mut boroughs = MockBoroughRepository::new();
        boroughs
            .expect_find_by_id()
            .withf(|id| *id == 1)
            .times(1)
            .returning(|id| Ok(Some(Borough::new(id, "Álvaro Obregón"))));

        let borough = service(boroughs, MockConstructionTypeRepository::new())
            .get_borough(1)
            .await
            .unwrap();

        assert_eq!(borough.id, 1);
    }
}
