//! In-process cadastral record store.
//!
//! Evaluates the price formulas row by row in Rust. Used to exercise the
//! engine without a database and to check the SQL store against.

use async_trait::async_trait;
use std::collections::HashSet;
use tokio::sync::RwLock;

use crate::domain::entities::{AggregationKind, CadastralRecord, NewCadastralRecord};
use crate::domain::repositories::{AggregateRow, CadastralRepository, RecordFilter};
use crate::error::StoreError;

#[derive(Default)]
struct Tables {
    construction_types: HashSet<i64>,
    records: Vec<CadastralRecord>,
    next_id: i64,
}

#[derive(Default)]
pub struct MemoryCadastralStore {
    tables: RwLock<Tables>,
}

impl MemoryCadastralStore {
    /// Creates a store knowing the given construction type ids.
    pub fn new(construction_types: impl IntoIterator<Item = i64>) -> Self {
        Self {
            tables: RwLock::new(Tables {
                construction_types: construction_types.into_iter().collect(),
                records: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Appends records without touching existing ones.
    pub async fn insert(&self, records: impl IntoIterator<Item = NewCadastralRecord>) {
        let mut tables = self.tables.write().await;
        for record in records {
            let id = tables.next_id;
            tables.next_id += 1;
            tables.records.push(materialize(id, record));
        }
    }
}

fn materialize(id: i64, r: NewCadastralRecord) -> CadastralRecord {
    CadastralRecord {
        id,
        borough_id: r.borough_id,
        construction_type_id: r.construction_type_id,
        zip_code: r.zip_code,
        land_area: r.land_area,
        construction_area: r.construction_area,
        land_value: r.land_value,
        subsidy: r.subsidy,
    }
}

fn matches(record: &CadastralRecord, filter: &RecordFilter) -> bool {
    filter.zip_code.as_ref().is_none_or(|z| &record.zip_code == z)
        && filter
            .construction_type_id
            .is_none_or(|t| record.construction_type_id == t)
}

#[async_trait]
impl CadastralRepository for MemoryCadastralStore {
    async fn construction_type_exists(&self, construction_type_id: i64) -> Result<bool, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .construction_types
            .contains(&construction_type_id))
    }

    async fn zip_code_exists(&self, zip_code: &str) -> Result<bool, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .records
            .iter()
            .any(|r| r.zip_code == zip_code))
    }

    async fn aggregate(
        &self,
        zip_code: &str,
        construction_type_id: i64,
        kind: AggregationKind,
    ) -> Result<AggregateRow, StoreError> {
        let tables = self.tables.read().await;
        let matching: Vec<&CadastralRecord> = tables
            .records
            .iter()
            .filter(|r| r.zip_code == zip_code && r.construction_type_id == construction_type_id)
            .collect();

        Ok(AggregateRow {
            price_unit: kind.reduce(matching.iter().filter_map(|r| r.price_unit())),
            price_unit_construction: kind
                .reduce(matching.iter().filter_map(|r| r.price_unit_construction())),
            elements: matching.len() as i64,
        })
    }

    async fn count(&self, filter: RecordFilter) -> Result<i64, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.records.iter().filter(|r| matches(r, &filter)).count() as i64)
    }

    async fn list(&self, filter: RecordFilter) -> Result<Vec<CadastralRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .records
            .iter()
            .filter(|r| matches(r, &filter))
            .skip(filter.offset.max(0) as usize)
            .take(filter.limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn replace_all(&self, records: Vec<NewCadastralRecord>) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;
        let inserted = records.len() as u64;
        let start = tables.next_id;

        tables.records = records
            .into_iter()
            .zip(start..)
            .map(|(record, id)| materialize(id, record))
            .collect();
        tables.next_id = start + inserted as i64;

        Ok(inserted)
    }
}
