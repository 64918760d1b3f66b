//! Price-per-area calculation engine.
//!
//! Two interchangeable dispatch shapes over the same [`PriceM2Core`]:
//!
//! - [`PriceM2Service`] - one entry point switching on the aggregation kind
//! - [`PriceM2CalculatorFactory`] - one [`PriceM2Calculator`] per kind
//!
//! Both validate in the same order, run the same query and produce identical
//! results for identical inputs.

mod base;
mod calculators;
mod service;

pub use base::PriceM2Core;
pub use calculators::{
    AvgPriceM2, MaxPriceM2, MinPriceM2, PriceM2Calculator, PriceM2CalculatorFactory,
    UnsupportedPriceM2,
};
pub use service::PriceM2Service;
