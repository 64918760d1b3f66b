//! PostgreSQL implementations of the reference table repositories.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Borough, ConstructionType};
use crate::domain::repositories::{BoroughRepository, ConstructionTypeRepository};
use crate::error::StoreError;

pub struct PgBoroughRepository {
    pool: Arc<PgPool>,
}

impl PgBoroughRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BoroughRepository for PgBoroughRepository {
    async fn list(&self, limit: i64) -> Result<Vec<Borough>, StoreError> {
        let rows = sqlx::query_as::<_, Borough>(
            "SELECT id, name FROM boroughs ORDER BY id LIMIT $1",
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Borough>, StoreError> {
        let row = sqlx::query_as::<_, Borough>("SELECT id, name FROM boroughs WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Borough>, StoreError> {
        let row = sqlx::query_as::<_, Borough>("SELECT id, name FROM boroughs WHERE name = $1")
            .bind(name)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM boroughs")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}

pub struct PgConstructionTypeRepository {
    pool: Arc<PgPool>,
}

impl PgConstructionTypeRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConstructionTypeRepository for PgConstructionTypeRepository {
    async fn list(&self, limit: i64) -> Result<Vec<ConstructionType>, StoreError> {
        let rows = sqlx::query_as::<_, ConstructionType>(
            "SELECT id, name FROM construction_types ORDER BY id LIMIT $1",
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ConstructionType>, StoreError> {
        let row = sqlx::query_as::<_, ConstructionType>(
            "SELECT id, name FROM construction_types WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM construction_types")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
