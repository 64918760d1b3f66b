//! Validation and aggregation shared by every dispatch shape of the engine.

use std::sync::Arc;

use crate::domain::diagnostics::{Diagnostic, DiagnosticSink};
use crate::domain::entities::{AggregationKind, AggregationResult};
use crate::domain::repositories::CadastralRepository;
use crate::error::PriceM2Error;

/// Validation + formula capability behind [`super::PriceM2Service`] and the
/// fixed-kind calculators.
///
/// Holds no mutable state; cloning shares the repository and sink.
pub struct PriceM2Core<R: CadastralRepository> {
    repository: Arc<R>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl<R: CadastralRepository> Clone for PriceM2Core<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            diagnostics: Arc::clone(&self.diagnostics),
        }
    }
}

impl<R: CadastralRepository> PriceM2Core<R> {
    pub fn new(repository: Arc<R>, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            repository,
            diagnostics,
        }
    }

    /// Checks that the construction type exists, then that the zip code has at
    /// least one record. Stops at the first failure.
    ///
    /// Both checks run against the unfiltered store: a valid type and a valid
    /// zip code that never co-occur pass and later aggregate zero rows.
    ///
    /// # Errors
    ///
    /// Returns [`PriceM2Error::ConstructionTypeNotFound`],
    /// [`PriceM2Error::ZipCodeNotFound`] or [`PriceM2Error::Store`].
    pub async fn validate(
        &self,
        zip_code: &str,
        aggregate: &str,
        construction_type: i64,
    ) -> Result<(), PriceM2Error> {
        if !self
            .repository
            .construction_type_exists(construction_type)
            .await?
        {
            self.diagnostics.emit(&Diagnostic::ConstructionTypeNotFound {
                construction_type,
                zip_code: zip_code.to_string(),
                aggregate: aggregate.to_string(),
            });
            return Err(PriceM2Error::ConstructionTypeNotFound);
        }

        if !self.repository.zip_code_exists(zip_code).await? {
            self.diagnostics.emit(&Diagnostic::ZipCodeNotFound {
                zip_code: zip_code.to_string(),
                aggregate: aggregate.to_string(),
                construction_type,
            });
            return Err(PriceM2Error::ZipCodeNotFound);
        }

        Ok(())
    }

    /// Reports an aggregation kind outside `avg|max|min`.
    ///
    /// Callers are expected to reject such values before reaching the engine.
    pub fn reject_aggregate(&self, aggregate: &str) -> PriceM2Error {
        self.diagnostics.emit(&Diagnostic::UnsupportedAggregate {
            aggregate: aggregate.to_string(),
        });
        PriceM2Error::UnsupportedAggregate(aggregate.to_string())
    }

    /// Runs the reduction query for already-validated inputs.
    ///
    /// # Errors
    ///
    /// Returns [`PriceM2Error::Store`] on database errors.
    pub async fn aggregate(
        &self,
        zip_code: &str,
        construction_type: i64,
        kind: AggregationKind,
    ) -> Result<AggregationResult, PriceM2Error> {
        let row = self
            .repository
            .aggregate(zip_code, construction_type, kind)
            .await?;

        Ok(AggregationResult {
            kind,
            price_unit: row.price_unit,
            price_unit_construction: row.price_unit_construction,
            elements: row.elements,
        })
    }

    /// Validates and aggregates with a kind fixed by the caller.
    pub async fn calculate_fixed(
        &self,
        zip_code: &str,
        construction_type: i64,
        kind: AggregationKind,
    ) -> Result<AggregationResult, PriceM2Error> {
        self.validate(zip_code, kind.as_str(), construction_type)
            .await?;
        self.aggregate(zip_code, construction_type, kind).await
    }
}
