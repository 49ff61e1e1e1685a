//! Umbrella crate for the `mipstore` workspace.
//!
//! Re-exports the buffer and layout types together with the mip routines.

pub use ms_core::*;
pub use ms_mip::*;
