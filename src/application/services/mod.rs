//! Business logic services for the application layer.

pub mod admin_service;
pub mod completion_service;
pub mod ingest_service;
pub mod price_m2;

pub use admin_service::{AdminService, CatalogSummary, RecordPage};
pub use completion_service::CompletionService;
pub use ingest_service::{IngestError, IngestReport, IngestService, ParsedCatastro};
pub use price_m2::{PriceM2Calculator, PriceM2CalculatorFactory, PriceM2Service};
