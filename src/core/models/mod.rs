//! Records exchanged with the launch backend.
//!
//! These are plain data: the client enforces no invariants beyond optional
//! field defaults for display.

mod campaign;
mod chat;
mod product;
pub mod serde_helpers;

pub use campaign::*;
pub use chat::*;
pub use product::*;

/// Records addressed by a backend `_id`.
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for Product {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Campaign {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for LaunchScript {
    fn id(&self) -> &str {
        &self.id
    }
}
