use core::ops::Range;

use crate::{CHANNELS_PER_PIXEL, Error};

/// Position and size of one level inside a packed mip buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MipLevel {
    /// Index of the level's first channel value.
    pub offset: usize,
    /// Square width in pixels.
    pub width: usize,
}

impl MipLevel {
    pub const fn pixel_count(&self) -> usize {
        self.width * self.width
    }

    pub const fn channel_count(&self) -> usize {
        self.pixel_count() * CHANNELS_PER_PIXEL
    }

    /// Element range of this level inside the packed buffer.
    pub const fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.channel_count()
    }

    /// Channel index of pixel `(x, y)` relative to the start of the buffer.
    #[inline]
    pub const fn pixel_index(&self, x: usize, y: usize) -> usize {
        self.offset + (y * self.width + x) * CHANNELS_PER_PIXEL
    }
}

/// Returns offset and width of `level_index` for a chain starting at
/// `base_width`.
///
/// No bounds check: indices past the last level give width 0 at offset
/// `total_channels(base_width)`, so `offset + width² * 4` of one level is
/// always the offset of the next.
pub const fn level_info(base_width: usize, level_index: usize) -> MipLevel {
    let mut offset = 0;
    let mut width = base_width;
    let mut i = 0;
    while i < level_index {
        offset += width * width * CHANNELS_PER_PIXEL;
        width /= 2;
        i += 1;
    }
    MipLevel { offset, width }
}

/// Number of materialized levels, halving down to and including width 1.
pub const fn level_count(base_width: usize) -> usize {
    let mut count = 0;
    let mut width = base_width;
    while width > 0 {
        count += 1;
        width /= 2;
    }
    count
}

pub const fn total_pixels(base_width: usize) -> usize {
    let mut total = 0;
    let mut width = base_width;
    while width > 0 {
        total += width * width;
        width /= 2;
    }
    total
}

/// Channel values needed to hold the base image and every level below it.
pub const fn total_channels(base_width: usize) -> usize {
    total_pixels(base_width) * CHANNELS_PER_PIXEL
}

/// Chain-wide sizes for one base width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MipLayout {
    base_width: usize,
    level_count: usize,
    total_channels: usize,
}

impl MipLayout {
    pub fn new(base_width: usize) -> Result<Self, Error> {
        if base_width == 0 {
            return Err(Error::ZeroWidth);
        }

        let total_channels = checked_total_channels(base_width).ok_or(Error::CapacityOverflow)?;
        Ok(Self {
            base_width,
            level_count: level_count(base_width),
            total_channels,
        })
    }

    pub fn base_width(&self) -> usize {
        self.base_width
    }

    pub fn level_count(&self) -> usize {
        self.level_count
    }

    pub fn total_channels(&self) -> usize {
        self.total_channels
    }

    pub fn level(&self, level_index: usize) -> Option<MipLevel> {
        if level_index >= self.level_count {
            return None;
        }
        Some(level_info(self.base_width, level_index))
    }

    pub fn levels(&self) -> impl Iterator<Item = MipLevel> + use<> {
        let base_width = self.base_width;
        (0..self.level_count).map(move |i| level_info(base_width, i))
    }

    /// Fails when a buffer of `len` channels cannot hold the whole chain.
    pub fn check_capacity(&self, len: usize) -> Result<(), Error> {
        if len < self.total_channels {
            return Err(Error::BufferTooSmall {
                required: self.total_channels,
                actual: len,
            });
        }
        Ok(())
    }
}

fn checked_total_channels(base_width: usize) -> Option<usize> {
    let mut total = 0usize;
    let mut width = base_width;
    while width > 0 {
        let level = width
            .checked_mul(width)?
            .checked_mul(CHANNELS_PER_PIXEL)?;
        total = total.checked_add(level)?;
        width /= 2;
    }
    Some(total)
}
