//! Test suite for Alungu AI
//!
//! This module organizes the integration tests. Every test drives the real
//! router over the in-memory user store; providers are wiremock servers.

pub mod common;
pub mod integration;
