//! Status Module
//!
//! `GET /api/status`: configured providers and available features.

pub mod handlers;

pub use handlers::get_status;
