//! LaunchDeck - terminal client for product launch campaigns.
//!
//! Describe a product, refine it in a chat with the launch assistant, and
//! generate multi-channel post drafts to review and copy.

pub mod config;
pub mod core;
pub mod tui;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
