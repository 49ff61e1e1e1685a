use ms_core::{CHANNELS_PER_PIXEL, Channel, ChannelBuffer, MipLayout};

/// Reads pixel `(x, y)` of `level`, or `None` if it is outside the chain or
/// the buffer.
pub fn level_pixel<B: ChannelBuffer + ?Sized>(
    buf: &B,
    layout: &MipLayout,
    level: usize,
    x: usize,
    y: usize,
) -> Option<[Channel; CHANNELS_PER_PIXEL]> {
    let info = layout.level(level)?;
    if x >= info.width || y >= info.width {
        return None;
    }

    let start = info.pixel_index(x, y);
    if start + CHANNELS_PER_PIXEL > buf.len() {
        return None;
    }
    Some(core::array::from_fn(|c| buf.read(start + c)))
}

/// Copies every channel of `level` out of the buffer.
pub fn level_channels<B: ChannelBuffer + ?Sized>(
    buf: &B,
    layout: &MipLayout,
    level: usize,
) -> Option<Vec<Channel>> {
    let range = layout.level(level)?.range();
    if range.end > buf.len() {
        return None;
    }

    if let Some(data) = buf.as_contiguous() {
        return Some(data[range].to_vec());
    }
    Some(range.map(|i| buf.read(i)).collect())
}
