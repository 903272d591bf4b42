//! Shared helpers for the crate-level tests.

pub mod fixtures;
