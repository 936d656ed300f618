//! Integration test utilities for the Dreams server
//!
//! This crate provides helpers for running end-to-end tests against
//! the REST API, each test on its own in-memory server.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
