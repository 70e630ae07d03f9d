//! Image decoding and preprocessing building blocks.

pub mod channels;
pub mod loader;
pub mod transform;

pub use channels::*;
pub use loader::*;
pub use transform::*;
