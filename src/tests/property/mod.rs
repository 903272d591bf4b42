//! Property-based tests for the pure helpers.

mod keyword_props;
mod milestone_props;
mod route_props;
