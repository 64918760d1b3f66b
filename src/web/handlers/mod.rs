//! Admin panel page handlers.

pub mod admin;

pub use admin::{
    boroughs_handler, construction_types_handler, overview_handler, records_handler,
};
