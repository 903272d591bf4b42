//! Reusable widgets shared by the views.

pub mod input_buffer;

pub use input_buffer::InputBuffer;
