//! Admin panel rendered with Askama templates.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`middleware`] - HTTP Basic authentication
//! - [`routes`] - Admin route configuration

pub mod handlers;
pub mod middleware;
pub mod routes;
