//! Application layer services implementing business logic.
//!
//! Services consume repository traits and give HTTP handlers and the admin
//! CLI a narrow API.
//!
//! # Available Services
//!
//! - [`services::price_m2::PriceM2Service`] - Price-per-area aggregation by zip code
//! - [`services::completion_service::CompletionService`] - Borough and construction type listings
//! - [`services::admin_service::AdminService`] - Admin panel browsing
//! - [`services::ingest_service::IngestService`] - Cadastral CSV loading

pub mod services;
