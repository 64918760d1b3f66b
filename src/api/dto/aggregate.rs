//! DTOs for the aggregation endpoint.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::entities::AggregationResult;

/// Message returned when `construction_type` is missing or not an integer.
pub const INVALID_CONSTRUCTION_TYPE_MESSAGE: &str =
    "Query-parameter `construction_type` inválido: Uso: '?construction_type={1-7}'";

static AGGREGATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(avg|max|min)$").expect("valid aggregate pattern"));

/// Path segments of `/zip-codes/{zip_code}/aggregate/{aggregate}`.
///
/// A value outside these constraints means the route does not match.
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct AggregatePath {
    /// Zip code of the Álvaro Obregón borough.
    #[validate(length(min = 1, max = 10))]
    #[param(example = "1430", pattern = "^.{1,10}$")]
    pub zip_code: String,

    /// One of `avg`, `max` or `min`.
    #[validate(regex(path = "*AGGREGATE_REGEX"))]
    #[param(example = "avg", pattern = "^(avg|max|min)$")]
    pub aggregate: String,
}

/// Raw query string; `construction_type` is parsed by the handler so a bad
/// value yields the documented message instead of a generic rejection.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AggregateQuery {
    /// Construction type id, an integer from 1 to 7.
    #[param(value_type = i64, example = 4)]
    pub construction_type: Option<String>,
}

impl AggregateQuery {
    /// Parses `construction_type` as an integer.
    pub fn construction_type(&self) -> Option<i64> {
        self.construction_type.as_deref()?.trim().parse().ok()
    }
}

/// Success envelope of the aggregation endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "status": true,
    "payload": {"type": "avg", "price_unit": 1420.0, "price_unit_construction": 3120.0, "elements": 100}
}))]
pub struct AggregateResponse {
    pub status: bool,
    pub payload: AggregationResult,
}

impl From<AggregationResult> for AggregateResponse {
    fn from(payload: AggregationResult) -> Self {
        Self {
            status: true,
            payload,
        }
    }
}

/// Error envelope shared by every endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"status": false, "errors": ["No se halló el código zip solicitado"]}))]
pub struct ErrorResponse {
    pub status: bool,
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(zip_code: &str, aggregate: &str) -> AggregatePath {
        AggregatePath {
            zip_code: zip_code.to_string(),
            aggregate: aggregate.to_string(),
        }
    }

    #[test]
    fn test_path_validation() {
        assert!(path("1430", "avg").validate().is_ok());
        assert!(path("1234567890", "min").validate().is_ok());
        assert!(path("12345678901", "avg").validate().is_err());
        assert!(path("", "avg").validate().is_err());
        assert!(path("1430", "median").validate().is_err());
        assert!(path("1430", "avgx").validate().is_err());
    }

    #[test]
    fn test_construction_type_parsing() {
        let query = |v: Option<&str>| AggregateQuery {
            construction_type: v.map(str::to_string),
        };

        assert_eq!(query(Some("4")).construction_type(), Some(4));
        assert_eq!(query(Some("cuatro")).construction_type(), None);
        assert_eq!(query(Some("4.5")).construction_type(), None);
        assert_eq!(query(None).construction_type(), None);
    }
}
