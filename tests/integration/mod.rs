//! Integration tests
//!
//! End-to-end tests that exercise the full router.

pub mod api;
