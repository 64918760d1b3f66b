//! Core domain entities of the cadastral dataset.
//!
//! # Entity Types
//!
//! - [`Borough`] - A municipal borough (alcaldía)
//! - [`ConstructionType`] - A land-use classification (uso de construcción)
//! - [`CadastralRecord`] - One parcel entry with areas, land value and subsidy
//! - [`AggregationResult`] - Transient output of a price-per-area aggregation
//!
//! Records to be inserted use the separate [`NewCadastralRecord`] struct.

pub mod aggregation;
pub mod borough;
pub mod cadastral_record;
pub mod construction_type;

pub use aggregation::{AggregationKind, AggregationResult};
pub use borough::{ALVARO_OBREGON, Borough};
pub use cadastral_record::{CadastralRecord, NewCadastralRecord, price_per_area};
pub use construction_type::{ConstructionType, EXPECTED_CONSTRUCTION_TYPES, UNZONED};
