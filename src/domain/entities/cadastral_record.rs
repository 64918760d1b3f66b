//! Cadastral record entity and the per-parcel price formulas.

use serde::Serialize;

/// One parcel entry of the cadastral dataset.
///
/// Holds the four numeric fields the price formulas are computed from. Multiple
/// records may share a zip code and construction type.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct CadastralRecord {
    pub id: i64,
    pub borough_id: i64,
    pub construction_type_id: i64,
    pub zip_code: String,
    pub land_area: f64,
    pub construction_area: f64,
    pub land_value: f64,
    pub subsidy: f64,
}

impl CadastralRecord {
    /// Price per unit of land area: `land_area / land_value - subsidy`.
    ///
    /// `None` when `land_value` is zero.
    pub fn price_unit(&self) -> Option<f64> {
        price_per_area(self.land_area, self.land_value, self.subsidy)
    }

    /// Price per unit of construction area: `construction_area / land_value - subsidy`.
    ///
    /// `None` when `land_value` is zero.
    pub fn price_unit_construction(&self) -> Option<f64> {
        price_per_area(self.construction_area, self.land_value, self.subsidy)
    }
}

/// Input data for inserting a cadastral record.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCadastralRecord {
    pub borough_id: i64,
    pub construction_type_id: i64,
    pub zip_code: String,
    pub land_area: f64,
    pub construction_area: f64,
    pub land_value: f64,
    pub subsidy: f64,
}

/// Shared formula behind both derived metrics.
///
/// A zero land value yields `None`, matching the `NULLIF(land_value, 0)` guard
/// used by the SQL store, so reducers skip the row instead of producing infinity.
pub fn price_per_area(area: f64, land_value: f64, subsidy: f64) -> Option<f64> {
    if land_value == 0.0 {
        return None;
    }
    Some(area / land_value - subsidy)
}
