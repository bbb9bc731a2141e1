//! API integration tests

pub mod auth_test;
pub mod chat_test;
pub mod status_test;
