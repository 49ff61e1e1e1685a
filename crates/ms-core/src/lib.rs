//! Foundational types for packed RGBA mip chains.
//!
//! ## Packed layout
//! One buffer holds the base image followed by every smaller level, each
//! level stored row-major with interleaved RGBA channels. Level `n + 1` is
//! `floor(width_n / 2)` pixels wide and starts right after level `n`; the
//! chain stops at width 1. [`level_info`] and [`MipLayout`] compute offsets
//! arithmetically, nothing about the layout is stored in the buffer.
//!
//! ## Storage
//! [`ChannelBuffer`] is the capability the mip routines need: length,
//! indexed read and indexed write. It is implemented for slices, stack
//! arrays, `Vec`, the boxed [`FixedChannelBuffer`] and the manually
//! allocated [`RawChannelBuffer`].

mod buffer;
mod error;
mod fixed;
mod layout;
mod raw;

pub use buffer::ChannelBuffer;
pub use error::Error;
pub use fixed::FixedChannelBuffer;
pub use layout::{MipLayout, MipLevel, level_count, level_info, total_channels, total_pixels};
pub use raw::RawChannelBuffer;

/// Numeric type of one color/alpha component.
pub type Channel = f32;

/// RGBA.
pub const CHANNELS_PER_PIXEL: usize = 4;

/// Base width used when nothing else is configured.
pub const DEFAULT_BASE_WIDTH: usize = 512;
