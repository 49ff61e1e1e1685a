use ms_core::{CHANNELS_PER_PIXEL, Channel, ChannelBuffer, Error, MipLayout};
use tracing::trace;

use crate::downsample::downsample_level;
use crate::init::init_buffer;
use crate::level::{level_channels, level_pixel};

/// Fills levels `1..level_count` from level 0, one level after another.
///
/// Level 0 must already hold the base image. Fails without touching the
/// buffer if it cannot hold the whole chain.
pub fn generate_mip_chain<B: ChannelBuffer + ?Sized>(
    buf: &mut B,
    layout: &MipLayout,
) -> Result<(), Error> {
    layout.check_capacity(buf.len())?;

    for level in 1..layout.level_count() {
        downsample_level(buf, layout, level);
        trace!(level, width = layout.base_width() >> level, "generated mip level");
    }
    Ok(())
}

/// A storage paired with the layout of the chain it holds.
///
/// Owns the buffer for its whole lifetime; dropping the chain releases it.
#[derive(Debug)]
pub struct MipChain<B> {
    layout: MipLayout,
    buf: B,
}

impl<B: ChannelBuffer> MipChain<B> {
    pub fn new(layout: MipLayout, buf: B) -> Result<Self, Error> {
        layout.check_capacity(buf.len())?;
        Ok(Self { layout, buf })
    }

    pub fn layout(&self) -> &MipLayout {
        &self.layout
    }

    pub fn buffer(&self) -> &B {
        &self.buf
    }

    /// Zeroes the chain and writes the synthetic gradient into level 0.
    pub fn init(&mut self) -> Result<(), Error> {
        init_buffer(&mut self.buf, &self.layout)
    }

    pub fn generate(&mut self) -> Result<(), Error> {
        generate_mip_chain(&mut self.buf, &self.layout)
    }

    pub fn pixel(&self, level: usize, x: usize, y: usize) -> Option<[Channel; CHANNELS_PER_PIXEL]> {
        level_pixel(&self.buf, &self.layout, level, x, y)
    }

    /// The 1x1 level at the end of the chain.
    pub fn top_pixel(&self) -> [Channel; CHANNELS_PER_PIXEL] {
        let last = self.layout.level_count() - 1;
        // `new` checked the capacity and layouts always end at width 1.
        self.pixel(last, 0, 0).unwrap_or([0.0; CHANNELS_PER_PIXEL])
    }

    pub fn level_channels(&self, level: usize) -> Option<Vec<Channel>> {
        level_channels(&self.buf, &self.layout, level)
    }

    pub fn into_inner(self) -> B {
        self.buf
    }
}
