//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data access; implementations live in
//! `crate::infrastructure::persistence` and mocks are generated with `mockall`
//! for service tests.
//!
//! # Available Repositories
//!
//! - [`CadastralRepository`] - Record existence checks, aggregation, bulk replace
//! - [`BoroughRepository`] - Borough reference data
//! - [`ConstructionTypeRepository`] - Construction type reference data
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod borough_repository;
pub mod cadastral_repository;
pub mod construction_type_repository;

pub use borough_repository::BoroughRepository;
pub use cadastral_repository::{AggregateRow, CadastralRepository, RecordFilter};
pub use construction_type_repository::ConstructionTypeRepository;

#[cfg(test)]
pub use borough_repository::MockBoroughRepository;
#[cfg(test)]
pub use cadastral_repository::MockCadastralRepository;
#[cfg(test)]
pub use construction_type_repository::MockConstructionTypeRepository;
