//! Cadastral store implementations.
//!
//! # Repositories
//!
//! - [`PgCadastralRepository`] - Record checks, aggregation and bulk replace
//! - [`PgBoroughRepository`] - Borough reference table
//! - [`PgConstructionTypeRepository`] - Construction type reference table
//! - [`MemoryCadastralStore`] - In-process record store

pub mod memory_store;
pub mod pg_cadastral_repository;
pub mod pg_reference_repository;

pub use memory_store::MemoryCadastralStore;
pub use pg_cadastral_repository::PgCadastralRepository;
pub use pg_reference_repository::{PgBoroughRepository, PgConstructionTypeRepository};
