//! Server unit and integration tests.
//!
//! Tests are organized into modules by feature area:
//! - `common` - Shared test helpers and utilities
//! - `update_service` - Update/ownership-check service tests
//! - `handlers` - REST handler integration tests

pub mod common;

mod handlers;
