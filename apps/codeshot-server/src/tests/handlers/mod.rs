//! REST handler integration tests.
//!
//! These tests drive requests through the real router with
//! `tower::ServiceExt::oneshot`. They are organized by resource.

mod presets;
mod users;
