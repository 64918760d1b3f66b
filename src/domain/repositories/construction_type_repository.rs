//! Repository trait for construction types.

use crate::domain::entities::ConstructionType;
use crate::error::StoreError;
use async_trait::async_trait;

/// Read-only access to the construction type reference table.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgConstructionTypeRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConstructionTypeRepository: Send + Sync {
    /// Lists at most `limit` construction types ordered by id.
    async fn list(&self, limit: i64) -> Result<Vec<ConstructionType>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<ConstructionType>, StoreError>;

    async fn count(&self) -> Result<i64, StoreError>;
}
