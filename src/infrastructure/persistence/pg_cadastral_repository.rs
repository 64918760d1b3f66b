//! PostgreSQL implementation of the cadastral record store.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::sync::Arc;

use crate::domain::entities::{AggregationKind, CadastralRecord, NewCadastralRecord};
use crate::domain::repositories::{AggregateRow, CadastralRepository, RecordFilter};
use crate::error::StoreError;

/// Rows per `INSERT` statement during a bulk replace.
pub const INSERT_CHUNK_SIZE: usize = 5000;

/// PostgreSQL repository for cadastral records.
pub struct PgCadastralRepository {
    pool: Arc<PgPool>,
}

impl PgCadastralRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Builds the grouped aggregate query for one reducer.
///
/// The reducer name comes from [`AggregationKind::sql_function`], never from
/// user input.
fn aggregate_sql(kind: AggregationKind) -> String {
    let function = kind.sql_function();
    format!(
        r#"
        SELECT
            {function}(land_area / NULLIF(land_value, 0) - subsidy) AS price_unit,
            {function}(construction_area / NULLIF(land_value, 0) - subsidy) AS price_unit_construction,
            COUNT(*) AS elements
        FROM cadastral_records
        WHERE zip_code = $1 AND construction_type_id = $2
        "#
    )
}

#[async_trait]
impl CadastralRepository for PgCadastralRepository {
    async fn construction_type_exists(&self, construction_type_id: i64) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM construction_types WHERE id = $1)",
        )
        .bind(construction_type_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn zip_code_exists(&self, zip_code: &str) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM cadastral_records WHERE zip_code = $1)",
        )
        .bind(zip_code)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn aggregate(
        &self,
        zip_code: &str,
        construction_type_id: i64,
        kind: AggregationKind,
    ) -> Result<AggregateRow, StoreError> {
        let row = sqlx::query_as::<_, AggregateRow>(&aggregate_sql(kind))
            .bind(zip_code)
            .bind(construction_type_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row)
    }

    async fn count(&self, filter: RecordFilter) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM cadastral_records
            WHERE ($1::text IS NULL OR zip_code = $1)
              AND ($2::bigint IS NULL OR construction_type_id = $2)
            "#,
        )
        .bind(filter.zip_code)
        .bind(filter.construction_type_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn list(&self, filter: RecordFilter) -> Result<Vec<CadastralRecord>, StoreError> {
        let rows = sqlx::query_as::<_, CadastralRecord>(
            r#"
            SELECT id, borough_id, construction_type_id, zip_code,
                   land_area, construction_area, land_value, subsidy
            FROM cadastral_records
            WHERE ($1::text IS NULL OR zip_code = $1)
              AND ($2::bigint IS NULL OR construction_type_id = $2)
            ORDER BY id
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(filter.zip_code)
        .bind(filter.construction_type_id)
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }

    async fn replace_all(&self, records: Vec<NewCadastralRecord>) -> Result<u64, StoreError> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM cadastral_records")
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let mut inserted = 0;
        for chunk in records.chunks(INSERT_CHUNK_SIZE) {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO cadastral_records \
                 (borough_id, construction_type_id, zip_code, land_area, construction_area, land_value, subsidy) ",
            );
            builder.push_values(chunk, |mut row, record| {
                row.push_bind(record.borough_id)
                    .push_bind(record.construction_type_id)
                    .push_bind(&record.zip_code)
                    .push_bind(record.land_area)
                    .push_bind(record.construction_area)
                    .push_bind(record.land_value)
                    .push_bind(record.subsidy);
            });

            inserted += builder.build().execute(&mut *tx).await?.rows_affected();
            tracing::debug!(inserted, total = records.len(), "Inserted record chunk");
        }

        tx.commit().await?;

        tracing::info!(deleted, inserted, "Replaced cadastral records");
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_sql_uses_reducer_and_zero_guard() {
        let sql = aggregate_sql(AggregationKind::Max);

        assert!(sql.contains("MAX(land_area / NULLIF(land_value, 0) - subsidy)"));
        assert!(sql.contains("MAX(construction_area / NULLIF(land_value, 0) - subsidy)"));
        assert!(sql.contains("COUNT(*) AS elements"));
        assert!(!sql.contains("AVG"));
    }
}
