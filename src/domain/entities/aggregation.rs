//! Aggregation kinds and the aggregation result value object.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::error::PriceM2Error;

/// Reducer applied to the derived price columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AggregationKind {
    Avg,
    Max,
    Min,
}

impl AggregationKind {
    pub const ALL: [AggregationKind; 3] = [Self::Avg, Self::Max, Self::Min];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Avg => "avg",
            Self::Max => "max",
            Self::Min => "min",
        }
    }

    /// SQL aggregate function implementing this reducer.
    pub fn sql_function(&self) -> &'static str {
        match self {
            Self::Avg => "AVG",
            Self::Max => "MAX",
            Self::Min => "MIN",
        }
    }

    /// Reduces a column of per-record values.
    ///
    /// Returns `None` for an empty column, like SQL aggregates over zero rows.
    pub fn reduce<I>(&self, values: I) -> Option<f64>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut iter = values.into_iter();
        let first = iter.next()?;

        match self {
            Self::Avg => {
                let (sum, count) = iter.fold((first, 1usize), |(sum, n), v| (sum + v, n + 1));
                Some(sum / count as f64)
            }
            Self::Max => Some(iter.fold(first, f64::max)),
            Self::Min => Some(iter.fold(first, f64::min)),
        }
    }
}

impl fmt::Display for AggregationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregationKind {
    type Err = PriceM2Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "avg" => Ok(Self::Avg),
            "max" => Ok(Self::Max),
            "min" => Ok(Self::Min),
            other => Err(PriceM2Error::UnsupportedAggregate(other.to_string())),
        }
    }
}

/// Outcome of a price-per-area aggregation.
///
/// Prices are `None` only when no record matched both the zip code and the
/// construction type (`elements == 0`), or every matching record had a zero
/// land value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AggregationResult {
    #[serde(rename = "type")]
    pub kind: AggregationKind,
    pub price_unit: Option<f64>,
    pub price_unit_construction: Option<f64>,
    pub elements: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_kinds() {
        assert_eq!("avg".parse::<AggregationKind>().unwrap(), AggregationKind::Avg);
        assert_eq!("max".parse::<AggregationKind>().unwrap(), AggregationKind::Max);
        assert_eq!("min".parse::<AggregationKind>().unwrap(), AggregationKind::Min);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        let err = "AVG".parse::<AggregationKind>().unwrap_err();
        assert!(matches!(err, PriceM2Error::UnsupportedAggregate(ref s) if s == "AVG"));
    }

    #[test]
    fn test_reduce_avg_max_min() {
        let values = [77.0, 57.0, 61.0];

        assert_eq!(AggregationKind::Avg.reduce(values), Some(65.0));
        assert_eq!(AggregationKind::Max.reduce(values), Some(77.0));
        assert_eq!(AggregationKind::Min.reduce(values), Some(57.0));
    }

    #[test]
    fn test_reduce_empty_is_none() {
        for kind in AggregationKind::ALL {
            assert_eq!(kind.reduce(Vec::<f64>::new()), None);
        }
    }

    #[test]
    fn test_result_serializes_kind_as_type() {
        let result = AggregationResult {
            kind: AggregationKind::Max,
            price_unit: Some(77.0),
            price_unit_construction: Some(37.0),
            elements: 2,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["type"], "max");
        assert_eq!(json["price_unit"], 77.0);
        assert_eq!(json["elements"], 2);
    }

    #[test]
    fn test_empty_result_serializes_nulls() {
        let result = AggregationResult {
            kind: AggregationKind::Avg,
            price_unit: None,
            price_unit_construction: None,
            elements: 0,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert!(json["price_unit"].is_null());
        assert!(json["price_unit_construction"].is_null());
    }
}
