//! Domain layer containing business entities and repository contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Boroughs, construction types, cadastral records, aggregation results
//! - [`repositories`] - Data access trait definitions
//! - [`diagnostics`] - Events the price engine reports about rejected inputs
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by the infrastructure layer
//! - Business logic lives in services (see [`crate::application::services`])

pub mod diagnostics;
pub mod entities;
pub mod repositories;
