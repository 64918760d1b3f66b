//! Infrastructure layer for external integrations.
//!
//! # Modules
//!
//! - [`cache`] - Caching abstractions (Redis and no-op implementations)
//! - [`catastro`] - Download and extraction of the cadastral archive
//! - [`persistence`] - PostgreSQL and in-process record stores

pub mod cache;
pub mod catastro;
pub mod persistence;
