//! Read-only queries backing the admin panel.

use std::sync::Arc;

use crate::domain::entities::{Borough, CadastralRecord, ConstructionType};
use crate::domain::repositories::{
    BoroughRepository, CadastralRepository, ConstructionTypeRepository, RecordFilter,
};
use crate::error::AppError;

/// Row counts of the three cadastral tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSummary {
    pub boroughs: i64,
    pub construction_types: i64,
    pub records: i64,
}

/// One page of cadastral records with the total matching the filter.
#[derive(Debug, Clone)]
pub struct RecordPage {
    pub items: Vec<CadastralRecord>,
    pub total: i64,
}

/// Browses the cadastral tables for the admin panel.
pub struct AdminService<B, C, R>
where
    B: BoroughRepository,
    C: ConstructionTypeRepository,
    R: CadastralRepository,
{
    boroughs: Arc<B>,
    construction_types: Arc<C>,
    records: Arc<R>,
}

impl<B, C, R> AdminService<B, C, R>
where
    B: BoroughRepository,
    C: ConstructionTypeRepository,
    R: CadastralRepository,
{
    pub fn new(boroughs: Arc<B>, construction_types: Arc<C>, records: Arc<R>) -> Self {
        Self {
            boroughs,
            construction_types,
            records,
        }
    }

    /// Counts boroughs, construction types and records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn summary(&self) -> Result<CatalogSummary, AppError> {
        Ok(CatalogSummary {
            boroughs: self.boroughs.count().await?,
            construction_types: self.construction_types.count().await?,
            records: self.records.count(RecordFilter::new(0, 0)).await?,
        })
    }

    pub async fn boroughs(&self, limit: i64) -> Result<Vec<Borough>, AppError> {
        Ok(self.boroughs.list(limit).await?)
    }

    pub async fn construction_types(&self, limit: i64) -> Result<Vec<ConstructionType>, AppError> {
        Ok(self.construction_types.list(limit).await?)
    }

    /// Lists one page of records and counts every record matching the filter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn records(&self, filter: RecordFilter) -> Result<RecordPage, AppError> {
        let total = self.records.count(filter.clone()).await?;
        let items = self.records.list(filter).await?;

        Ok(RecordPage { items, total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{
        MockBoroughRepository, MockCadastralRepository, MockConstructionTypeRepository,
    };

    #[tokio::test]
    async fn test_summary_counts_every_table() {
        let mut boroughs = MockBoroughRepository::new();
        boroughs.expect_count().times(1).returning(|| Ok(1));
        let mut types = MockConstructionTypeRepository::new();
        types.expect_count().times(1).returning(|| Ok(7));
        let mut records = MockCadastralRepository::new();
        records
            .expect_count()
            .withf(|f| f.zip_code.is_none())
            .times(1)
            .returning(|_| Ok(1_800_000));

        let service = AdminService::new(Arc::new(boroughs), Arc::new(types), Arc::new(records));

        let summary = service.summary().await.unwrap();

        assert_eq!(
            summary,
            CatalogSummary {
                boroughs: 1,
                construction_types: 7,
                records: 1_800_000,
            }
        );
    }

    #[tokio::test]
    async fn test_records_page_forwards_filter() {
        let mut records = MockCadastralRepository::new();
        records
            .expect_count()
            .withf(|f| f.zip_code.as_deref() == Some("1430"))
            .times(1)
            .returning(|_| Ok(3));
        records
            .expect_list()
            .withf(|f| f.zip_code.as_deref() == Some("1430") && f.offset == 0 && f.limit == 25)
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = AdminService::new(
            Arc::new(MockBoroughRepository::new()),
            Arc::new(MockConstructionTypeRepository::new()),
            Arc::new(records),
        );

        let filter = RecordFilter::new(0, 25).with_zip_code(Some("1430".to_string()));
        let page = service.records(filter).await.unwrap();

        assert_eq!(page.total, 3);
        assert!(page.items.is_empty());
    }
}
