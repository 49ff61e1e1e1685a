//! Packed RGBA mip chain generation.
//!
//! `ms-mip` builds every level of a chain inside one buffer using a fixed
//! 2x2 mean downsample (box filter).
//!
//! Drop-odd policy:
//! - Level `n + 1` is `floor(width_n / 2)` pixels wide.
//! - If a level's width is odd, its last column and row do not contribute.
//!
//! Representational meaning:
//! - Each destination channel is the arithmetic mean of the same channel in
//!   one 2x2 source block.
//! - Levels must be generated in order; each one reads only the level above.
//!
//! Every routine is written once against [`ms_core::ChannelBuffer`]. Buffers
//! that expose a contiguous slice take a slice-based path; anything else is
//! handled through indexed reads and writes.

mod chain;
mod downsample;
mod init;
mod level;

pub use chain::{MipChain, generate_mip_chain};
pub use downsample::downsample_level;
pub use init::{gradient_pixel, init_buffer};
pub use level::{level_channels, level_pixel};
