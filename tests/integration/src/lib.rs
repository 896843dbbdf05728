//! Integration test utilities for the API client
//!
//! This crate provides helpers for running the client end to end against a
//! mock REST server.

pub mod fixtures;

pub use fixtures::*;
pub use helpers::*;
