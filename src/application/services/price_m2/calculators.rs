//! Fixed-kind calculators and the factory that selects them.
//!
//! Equivalent to [`super::PriceM2Service`]: each calculator is bound to one
//! reducer and shares validation and querying through [`PriceM2Core`]. An
//! unknown kind still gets a calculator, which validates the other inputs
//! before rejecting the kind, so errors surface in the same order.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::diagnostics::DiagnosticSink;
use crate::domain::entities::{AggregationKind, AggregationResult};
use crate::domain::repositories::CadastralRepository;
use crate::error::PriceM2Error;

use super::base::PriceM2Core;

/// A price-per-area calculation with its aggregation kind fixed.
#[async_trait]
pub trait PriceM2Calculator: Send + Sync {
    /// `None` for a calculator built from an unsupported kind.
    fn kind(&self) -> Option<AggregationKind>;

    /// Validates the inputs and reduces the matching records.
    ///
    /// # Errors
    ///
    /// Same as [`super::PriceM2Service::calculate`].
    async fn calculate(
        &self,
        zip_code: &str,
        construction_type: i64,
    ) -> Result<AggregationResult, PriceM2Error>;
}

/// Arithmetic mean of the derived prices.
pub struct AvgPriceM2<R: CadastralRepository> {
    core: PriceM2Core<R>,
}

/// Maximum of the derived prices.
pub struct MaxPriceM2<R: CadastralRepository> {
    core: PriceM2Core<R>,
}

/// Minimum of the derived prices.
pub struct MinPriceM2<R: CadastralRepository> {
    core: PriceM2Core<R>,
}

/// Placeholder for a kind outside `avg|max|min`; never queries the reduction.
pub struct UnsupportedPriceM2<R: CadastralRepository> {
    core: PriceM2Core<R>,
    aggregate: String,
}

#[async_trait]
impl<R: CadastralRepository> PriceM2Calculator for AvgPriceM2<R> {
    fn kind(&self) -> Option<AggregationKind> {
        Some(AggregationKind::Avg)
    }

    async fn calculate(
        &self,
        zip_code: &str,
        construction_type: i64,
    ) -> Result<AggregationResult, PriceM2Error> {
        self.core
            .calculate_fixed(zip_code, construction_type, AggregationKind::Avg)
            .await
    }
}

#[async_trait]
impl<R: CadastralRepository> PriceM2Calculator for MaxPriceM2<R> {
    fn kind(&self) -> Option<AggregationKind> {
        Some(AggregationKind::Max)
    }

    async fn calculate(
        &self,
        zip_code: &str,
        construction_type: i64,
    ) -> Result<AggregationResult, PriceM2Error> {
        self.core
            .calculate_fixed(zip_code, construction_type, AggregationKind::Max)
            .await
    }
}

#[async_trait]
impl<R: CadastralRepository> PriceM2Calculator for MinPriceM2<R> {
    fn kind(&self) -> Option<AggregationKind> {
        Some(AggregationKind::Min)
    }

    async fn calculate(
        &self,
        zip_code: &str,
        construction_type: i64,
    ) -> Result<AggregationResult, PriceM2Error> {
        self.core
            .calculate_fixed(zip_code, construction_type, AggregationKind::Min)
            .await
    }
}

#[async_trait]
impl<R: CadastralRepository> PriceM2Calculator for UnsupportedPriceM2<R> {
    fn kind(&self) -> Option<AggregationKind> {
        None
    }

    async fn calculate(
        &self,
        zip_code: &str,
        construction_type: i64,
    ) -> Result<AggregationResult, PriceM2Error> {
        self.core
            .validate(zip_code, &self.aggregate, construction_type)
            .await?;
        Err(self.core.reject_aggregate(&self.aggregate))
    }
}

/// Builds the calculator for an aggregation kind given as a string.
pub struct PriceM2CalculatorFactory<R: CadastralRepository> {
    core: PriceM2Core<R>,
}

impl<R: CadastralRepository + 'static> PriceM2CalculatorFactory<R> {
    pub fn new(repository: Arc<R>, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            core: PriceM2Core::new(repository, diagnostics),
        }
    }

    /// Returns the calculator registered under `aggregate`.
    ///
    /// Anything other than `avg`, `max` or `min` yields an
    /// [`UnsupportedPriceM2`] whose `calculate` fails with
    /// [`PriceM2Error::UnsupportedAggregate`] once the other inputs validate.
    pub fn create(&self, aggregate: &str) -> Box<dyn PriceM2Calculator> {
        let core = self.core.clone();

        match aggregate {
            "avg" => Box::new(AvgPriceM2 { core }),
            "max" => Box::new(MaxPriceM2 { core }),
            "min" => Box::new(MinPriceM2 { core }),
            other => Box::new(UnsupportedPriceM2 {
                core,
                aggregate: other.to_string(),
            }),
        }
    }
}
