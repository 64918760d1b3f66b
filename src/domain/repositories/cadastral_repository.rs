//! Repository trait for the cadastral record store.

use crate::domain::entities::{AggregationKind, CadastralRecord, NewCadastralRecord};
use crate::error::StoreError;
use async_trait::async_trait;

/// Reduced price columns plus the number of contributing records.
#[derive(Debug, Clone, PartialEq, Default, sqlx::FromRow)]
pub struct AggregateRow {
    pub price_unit: Option<f64>,
    pub price_unit_construction: Option<f64>,
    pub elements: i64,
}

/// Filter criteria for listing records.
#[derive(Debug, Clone)]
pub struct RecordFilter {
    pub zip_code: Option<String>,
    pub construction_type_id: Option<i64>,
    pub offset: i64,
    pub limit: i64,
}

impl RecordFilter {
    /// Creates a new filter with pagination parameters.
    pub fn new(offset: i64, limit: i64) -> Self {
        Self {
            zip_code: None,
            construction_type_id: None,
            offset,
            limit,
        }
    }

    /// Restricts the listing to one zip code.
    pub fn with_zip_code(mut self, zip_code: Option<String>) -> Self {
        self.zip_code = zip_code;
        self
    }

    /// Restricts the listing to one construction type.
    pub fn with_construction_type(mut self, construction_type_id: Option<i64>) -> Self {
        self.construction_type_id = construction_type_id;
        self
    }
}

/// Read and bulk-replace access to cadastral records.
///
/// The first three methods are everything the price-per-area engine needs:
/// two independent existence checks and one grouped aggregate.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCadastralRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryCadastralStore`] - in-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CadastralRepository: Send + Sync {
    /// Whether a construction type with this id exists, regardless of records.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on database errors.
    async fn construction_type_exists(&self, construction_type_id: i64) -> Result<bool, StoreError>;

    /// Whether any record carries this zip code, regardless of construction type.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on database errors.
    async fn zip_code_exists(&self, zip_code: &str) -> Result<bool, StoreError>;

    /// Applies `kind` to both derived price expressions over the records
    /// matching `zip_code` and `construction_type_id`, and counts them.
    ///
    /// The reducer runs over the per-record formula values, not over raw fields.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on database errors.
    async fn aggregate(
        &self,
        zip_code: &str,
        construction_type_id: i64,
        kind: AggregationKind,
    ) -> Result<AggregateRow, StoreError>;

    /// Counts records matching the filter (pagination is ignored).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on database errors.
    async fn count(&self, filter: RecordFilter) -> Result<i64, StoreError>;

    /// Lists one page of records ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on database errors.
    async fn list(&self, filter: RecordFilter) -> Result<Vec<CadastralRecord>, StoreError>;

    /// Deletes every record and inserts `records` in their place.
    ///
    /// Not safe to run concurrently with itself. Returns the number of rows
    /// inserted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on database errors; nothing is replaced then.
    async fn replace_all(&self, records: Vec<NewCadastralRecord>) -> Result<u64, StoreError>;
}
