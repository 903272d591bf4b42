//! Cross-module tests.
//!
//! Flow tests drive the core state machines against the mockall-generated
//! `MockLaunchApi`; property tests cover the pure helpers.

mod common;
mod flows;
mod property;
