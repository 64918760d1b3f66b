//! Admin panel middleware.

pub mod admin_auth;
