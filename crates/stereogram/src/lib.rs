//! Umbrella crate for the `stereogram` workspace.
//!
//! Re-exports the pixel containers, registration, compositing and session
//! crates so applications need a single dependency.

pub use sg_align::*;
pub use sg_composite::*;
pub use sg_core::*;
pub use sg_session::*;
