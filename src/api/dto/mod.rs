//! Data Transfer Objects for API requests and responses.

pub mod aggregate;
pub mod health;
pub mod pagination;
