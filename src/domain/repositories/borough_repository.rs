//! Repository trait for boroughs.

use crate::domain::entities::Borough;
use crate::error::StoreError;
use async_trait::async_trait;

/// Read-only access to the borough reference table.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgBoroughRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoroughRepository: Send + Sync {
    /// Lists at most `limit` boroughs ordered by id.
    async fn list(&self, limit: i64) -> Result<Vec<Borough>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Borough>, StoreError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Borough>, StoreError>;

    async fn count(&self) -> Result<i64, StoreError>;
}
