//! Single-entry price-per-area service.

use std::sync::Arc;

use crate::domain::diagnostics::DiagnosticSink;
use crate::domain::entities::{AggregationKind, AggregationResult};
use crate::domain::repositories::CadastralRepository;
use crate::error::PriceM2Error;

use super::base::PriceM2Core;

/// Aggregated price per square meter for a zip code and construction type.
///
/// Applies the following formulas to every matching record and then reduces
/// each column with the requested aggregate (`avg`, `max` or `min`):
///
/// ```text
/// price_unit              = land_area / land_value - subsidy
/// price_unit_construction = construction_area / land_value - subsidy
/// ```
pub struct PriceM2Service<R: CadastralRepository> {
    core: PriceM2Core<R>,
}

impl<R: CadastralRepository> PriceM2Service<R> {
    /// Creates a new price service.
    pub fn new(repository: Arc<R>, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            core: PriceM2Core::new(repository, diagnostics),
        }
    }

    /// Evaluates `aggregate` over the records filtered by `zip_code` and
    /// `construction_type`.
    ///
    /// # Example
    ///
    /// With the records `(1000, 600, 10, 23)` and `(1500, 900, 17, 31)` under
    /// zip code `"10101"` and construction type `1`, `avg` yields
    /// `price_unit ≈ 67.1176`, `price_unit_construction ≈ 29.4706`,
    /// `elements = 2`.
    ///
    /// # Errors
    ///
    /// Returns, checked in this order:
    /// - [`PriceM2Error::ConstructionTypeNotFound`] if the construction type does not exist
    /// - [`PriceM2Error::ZipCodeNotFound`] if no record has the zip code
    /// - [`PriceM2Error::UnsupportedAggregate`] if `aggregate` is not `avg`, `max` or `min`
    /// - [`PriceM2Error::Store`] on database errors
    pub async fn calculate(
        &self,
        zip_code: &str,
        aggregate: &str,
        construction_type: i64,
    ) -> Result<AggregationResult, PriceM2Error> {
        self.core
            .validate(zip_code, aggregate, construction_type)
            .await?;

        let kind = match aggregate {
            "avg" => AggregationKind::Avg,
            "max" => AggregationKind::Max,
            "min" => AggregationKind::Min,
            other => return Err(self.core.reject_aggregate(other)),
        };

        self.core.aggregate(zip_code, construction_type, kind).await
    }
}
