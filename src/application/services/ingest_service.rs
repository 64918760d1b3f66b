//! Loading of the cadastral CSV into the record store.
//!
//! The flow is split so the CLI can report and confirm between steps:
//! [`IngestService::prepare`] resolves reference data, [`parse_catastro`]
//! turns CSV bytes into records plus failed rows, and
//! [`IngestService::replace`] swaps the stored records.

use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::application::services::completion_service::CONSTRUCTION_TYPE_ACTUAL_LIMIT;
use crate::domain::entities::{
    ALVARO_OBREGON, Borough, EXPECTED_CONSTRUCTION_TYPES, NewCadastralRecord, UNZONED,
};
use crate::domain::repositories::{
    BoroughRepository, CadastralRepository, ConstructionTypeRepository,
};
use crate::error::StoreError;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("borough '{0}' not found, verify that migrations were applied")]
    BoroughMissing(String),

    #[error("construction type '{0}' not found, verify that migrations were applied")]
    UnzonedTypeMissing(String),

    #[error("could not read CSV header: {0}")]
    Header(#[from] csv::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Reference data resolved before parsing.
#[derive(Debug, Clone)]
pub struct IngestContext {
    pub borough: Borough,
    /// Construction type name to id; the empty name maps to the unzoned type.
    pub construction_types: HashMap<String, i64>,
}

/// A CSV row that could not be turned into a record.
#[derive(Debug, Clone, PartialEq)]
pub struct FailedRow {
    pub error: String,
    pub row: String,
}

#[derive(Debug, Default)]
pub struct ParsedCatastro {
    pub records: Vec<NewCadastralRecord>,
    pub failed: Vec<FailedRow>,
}

impl ParsedCatastro {
    pub fn processed(&self) -> usize {
        self.records.len() + self.failed.len()
    }
}

/// Outcome of a completed ingestion.
#[derive(Debug, Clone)]
pub struct IngestReport {
    pub processed: usize,
    pub inserted: u64,
    pub failed: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct CatastroRow {
    uso_construccion: String,
    codigo_postal: String,
    superficie_terreno: String,
    superficie_construccion: String,
    valor_suelo: String,
    subsidio: String,
}

pub struct IngestService<B, C, R>
where
    B: BoroughRepository,
    C: ConstructionTypeRepository,
    R: CadastralRepository,
{
    boroughs: Arc<B>,
    construction_types: Arc<C>,
    records: Arc<R>,
}

impl<B, C, R> IngestService<B, C, R>
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

    /// Resolves the target borough and the construction type lookup table.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::BoroughMissing`] or
    /// [`IngestError::UnzonedTypeMissing`] when reference data is absent.
    pub async fn prepare(&self) -> Result<IngestContext, IngestError> {
        let borough = self
            .boroughs
            .find_by_name(ALVARO_OBREGON)
            .await?
            .ok_or_else(|| IngestError::BoroughMissing(ALVARO_OBREGON.to_string()))?;

        let types = self
            .construction_types
            .list(CONSTRUCTION_TYPE_ACTUAL_LIMIT)
            .await?;

        if types.len() as i64 != EXPECTED_CONSTRUCTION_TYPES {
            tracing::warn!(
                found = types.len(),
                expected = EXPECTED_CONSTRUCTION_TYPES,
                "Unexpected number of construction types"
            );
        }

        let mut construction_types: HashMap<String, i64> =
            types.into_iter().map(|t| (t.name, t.id)).collect();

        let unzoned = *construction_types
            .get(UNZONED)
            .ok_or_else(|| IngestError::UnzonedTypeMissing(UNZONED.to_string()))?;
        construction_types.insert(String::new(), unzoned);

        Ok(IngestContext {
            borough,
            construction_types,
        })
    }

    /// Replaces every stored record with `parsed.records`.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Store`] if the replace fails; the previous
    /// records are kept then.
    pub async fn replace(
        &self,
        parsed: ParsedCatastro,
        started_at: DateTime<Utc>,
    ) -> Result<IngestReport, IngestError> {
        let processed = parsed.processed();
        let failed = parsed.failed.len();
        let inserted = self.records.replace_all(parsed.records).await?;

        tracing::info!(processed, inserted, failed, "Cadastral records replaced");

        Ok(IngestReport {
            processed,
            inserted,
            failed,
            started_at,
            finished_at: Utc::now(),
        })
    }
}

/// Parses the cadastral CSV.
///
/// Rows that fail are collected with their raw content and skipped.
///
/// # Errors
///
/// Returns [`IngestError::Header`] if the header row cannot be read.
pub fn parse_catastro<Rd: Read>(
    context: &IngestContext,
    reader: Rd,
) -> Result<ParsedCatastro, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut parsed = ParsedCatastro::default();

    for result in csv_reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let row = e
                    .position()
                    .map(|p| format!("line {}", p.line()))
                    .unwrap_or_default();
                parsed.failed.push(FailedRow {
                    error: e.to_string(),
                    row,
                });
                continue;
            }
        };

        let outcome = record
            .deserialize::<CatastroRow>(Some(&headers))
            .map_err(|e| e.to_string())
            .and_then(|row| to_record(context, row));

        match outcome {
            Ok(new_record) => parsed.records.push(new_record),
            Err(error) => parsed.failed.push(FailedRow {
                error,
                row: raw_row(&headers, &record),
            }),
        }
    }

    Ok(parsed)
}

fn to_record(context: &IngestContext, row: CatastroRow) -> Result<NewCadastralRecord, String> {
    let construction_type_id = *context
        .construction_types
        .get(&row.uso_construccion)
        .ok_or_else(|| format!("unknown construction type '{}'", row.uso_construccion))?;

    let land_value = parse_number("valor_suelo", &row.valor_suelo)?;
    if land_value == 0.0 {
        return Err("valor_suelo must not be zero".to_string());
    }

    Ok(NewCadastralRecord {
        borough_id: context.borough.id,
        construction_type_id,
        zip_code: row.codigo_postal,
        land_area: parse_number("superficie_terreno", &row.superficie_terreno)?,
        construction_area: parse_number("superficie_construccion", &row.superficie_construccion)?,
        land_value,
        subsidy: parse_number("subsidio", &row.subsidio)?,
    })
}

fn parse_number(column: &str, value: &str) -> Result<f64, String> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("{column}: could not convert '{value}' to a number"))
}

fn raw_row(headers: &csv::StringRecord, record: &csv::StringRecord) -> String {
    let map: serde_json::Map<String, serde_json::Value> = headers
        .iter()
        .zip(record.iter())
        .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
        .collect();
    serde_json::Value::Object(map).to_string()
}

/// Renders failed rows for the report file, separated by blank lines.
pub fn format_failed_rows(failed: &[FailedRow]) -> String {
    failed
        .iter()
        .map(|f| format!("{}\n{}\n", f.error, f.row))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ConstructionType;
    use crate::domain::repositories::{
        MockBoroughRepository, MockCadastralRepository, MockConstructionTypeRepository,
    };

    const HEADER: &str = "fid,uso_construccion,codigo_postal,superficie_terreno,superficie_construccion,valor_suelo,subsidio\n";

    fn context() -> IngestContext {
        let mut construction_types = HashMap::new();
        construction_types.insert("Habitacional".to_string(), 4);
        construction_types.insert(UNZONED.to_string(), 7);
        construction_types.insert(String::new(), 7);

        IngestContext {
            borough: Borough::new(1, ALVARO_OBREGON),
            construction_types,
        }
    }

    fn seeded_types() -> Vec<ConstructionType> {
        vec![
            ConstructionType::new(4, "Habitacional"),
            ConstructionType::new(7, UNZONED),
        ]
    }

    #[test]
    fn test_parse_valid_rows() {
        let csv = format!(
            "{HEADER}1,Habitacional,01430,1000,600,10,23\n2,,01500,1500.5,900,17,31\n"
        );

        let parsed = parse_catastro(&context(), csv.as_bytes()).unwrap();

        assert!(parsed.failed.is_empty());
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].construction_type_id, 4);
        assert_eq!(parsed.records[0].zip_code, "01430");
        assert_eq!(parsed.records[1].construction_type_id, 7);
        assert_eq!(parsed.records[1].land_area, 1500.5);
        assert_eq!(parsed.records[1].borough_id, 1);
    }

    #[test]
    fn test_parse_collects_failed_rows() {
        let csv = format!(
            "{HEADER}1,Industrial,01430,1000,600,10,23\n2,Habitacional,01430,abc,600,10,23\n3,Habitacional,01430,1000,600,0,23\n4,Habitacional,01430,1000,600,10,23\n"
        );

        let parsed = parse_catastro(&context(), csv.as_bytes()).unwrap();

        assert_eq!(parsed.processed(), 4);
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.failed.len(), 3);
        assert!(parsed.failed[0].error.contains("Industrial"));
        assert!(parsed.failed[1].error.starts_with("superficie_terreno"));
        assert!(parsed.failed[2].error.contains("valor_suelo"));
        assert!(parsed.failed[1].row.contains("\"superficie_terreno\":\"abc\""));
    }

    #[test]
    fn test_parse_missing_column_fails_row() {
        let csv = "uso_construccion,codigo_postal\nHabitacional,01430\n";

        let parsed = parse_catastro(&context(), csv.as_bytes()).unwrap();

        assert!(parsed.records.is_empty());
        assert_eq!(parsed.failed.len(), 1);
    }

    #[test]
    fn test_format_failed_rows_separates_with_blank_line() {
        let failed = vec![
            FailedRow {
                error: "e1".to_string(),
                row: "r1".to_string(),
            },
            FailedRow {
                error: "e2".to_string(),
                row: "r2".to_string(),
            },
        ];

        assert_eq!(format_failed_rows(&failed), "e1\nr1\n\ne2\nr2\n");
    }

    #[tokio::test]
    async fn test_prepare_maps_empty_name_to_unzoned() {
        let mut boroughs = MockBoroughRepository::new();
        boroughs
            .expect_find_by_name()
            .withf(|name| name == ALVARO_OBREGON)
            .times(1)
            .returning(|name| Ok(Some(Borough::new(1, name))));
        let mut types = MockConstructionTypeRepository::new();
        types.expect_list().times(1).returning(|_| Ok(seeded_types()));

        let service = IngestService::new(
            Arc::new(boroughs),
            Arc::new(types),
            Arc::new(MockCadastralRepository::new()),
        );

        let context = service.prepare().await.unwrap();

        assert_eq!(context.borough.id, 1);
        assert_eq!(context.construction_types.get(""), Some(&7));
        assert_eq!(context.construction_types.get("Habitacional"), Some(&4));
    }

    #[tokio::test]
    async fn test_prepare_without_borough_aborts() {
        let mut boroughs = MockBoroughRepository::new();
        boroughs.expect_find_by_name().returning(|_| Ok(None));

        let service = IngestService::new(
            Arc::new(boroughs),
            Arc::new(MockConstructionTypeRepository::new()),
            Arc::new(MockCadastralRepository::new()),
        );

        let result = service.prepare().await;

        assert!(matches!(result.unwrap_err(), IngestError::BoroughMissing(_)));
    }

    #[tokio::test]
    async fn test_prepare_without_unzoned_type_aborts() {
        let mut boroughs = MockBoroughRepository::new();
        boroughs
            .expect_find_by_name()
            .returning(|name| Ok(Some(Borough::new(1, name))));
        let mut types = MockConstructionTypeRepository::new();
        types
            .expect_list()
            .returning(|_| Ok(vec![ConstructionType::new(4, "Habitacional")]));

        let service = IngestService::new(
            Arc::new(boroughs),
            Arc::new(types),
            Arc::new(MockCadastralRepository::new()),
        );

        let result = service.prepare().await;

        assert!(matches!(result.unwrap_err(), IngestError::UnzonedTypeMissing(_)));
    }

    #[tokio::test]
    async fn test_replace_reports_counts() {
        let mut records = MockCadastralRepository::new();
        records
            .expect_replace_all()
            .withf(|r| r.len() == 1)
            .times(1)
            .returning(|r| Ok(r.len() as u64));

        let service = IngestService::new(
            Arc::new(MockBoroughRepository::new()),
            Arc::new(MockConstructionTypeRepository::new()),
            Arc::new(records),
        );

        let csv = format!("{HEADER}1,Habitacional,01430,1000,600,10,23\n2,Otro,01430,1,1,1,1\n");
        let parsed = parse_catastro(&context(), csv.as_bytes()).unwrap();

        let report = service.replace(parsed, Utc::now()).await.unwrap();

        assert_eq!(report.processed, 2);
        assert_eq!(report.inserted, 1);
        assert_eq!(report.failed, 1);
        assert!(report.finished_at >= report.started_at);
    }
}
