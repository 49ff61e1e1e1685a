use ms_core::{CHANNELS_PER_PIXEL, Channel, ChannelBuffer, MipLayout, MipLevel};

/// Fills `target_level` with the 2x2 box-filtered image of the level above it.
///
/// Each destination channel is the mean of the same channel in the four
/// source pixels `(2x, 2y)`, `(2x + 1, 2y)`, `(2x, 2y + 1)`, `(2x + 1, 2y + 1)`.
/// Only the destination region is written.
///
/// # Panics
/// If `target_level` is 0 or not a level of `layout`, or if the buffer is
/// shorter than the destination region.
pub fn downsample_level<B: ChannelBuffer + ?Sized>(
    buf: &mut B,
    layout: &MipLayout,
    target_level: usize,
) {
    assert!(target_level >= 1, "level 0 has no source level");
    let (Some(src), Some(dst)) = (layout.level(target_level - 1), layout.level(target_level))
    else {
        panic!(
            "mip level {target_level} out of range for {} levels",
            layout.level_count()
        );
    };
    debug_assert_eq!(dst.width, src.width / 2);
    debug_assert_eq!(src.range().end, dst.offset);

    if let Some(data) = buf.as_contiguous_mut() {
        let (head, tail) = data.split_at_mut(dst.offset);
        downsample_contiguous(
            &head[src.range()],
            src.width,
            &mut tail[..dst.channel_count()],
            dst.width,
        );
        return;
    }

    downsample_indexed(buf, src, dst);
}

fn downsample_contiguous(src: &[Channel], src_w: usize, dst: &mut [Channel], dst_w: usize) {
    let src_stride = src_w * CHANNELS_PER_PIXEL;
    let dst_stride = dst_w * CHANNELS_PER_PIXEL;

    for y in 0..dst_w {
        let src_row0 = &src[(2 * y) * src_stride..][..src_stride];
        let src_row1 = &src[(2 * y + 1) * src_stride..][..src_stride];
        let dst_row = &mut dst[y * dst_stride..(y + 1) * dst_stride];
        for (x, out_px) in dst_row.chunks_exact_mut(CHANNELS_PER_PIXEL).enumerate() {
            let s0 = 2 * x * CHANNELS_PER_PIXEL;
            let s1 = s0 + CHANNELS_PER_PIXEL;
            for (c, out) in out_px.iter_mut().enumerate() {
                let sum = src_row0[s0 + c] + src_row0[s1 + c] + src_row1[s0 + c] + src_row1[s1 + c];
                *out = sum / 4.0;
            }
        }
    }
}

fn downsample_indexed<B: ChannelBuffer + ?Sized>(buf: &mut B, src: MipLevel, dst: MipLevel) {
    let mut out = dst.offset;
    for y in 0..dst.width {
        for x in 0..dst.width {
            let p00 = src.pixel_index(2 * x, 2 * y);
            let p10 = src.pixel_index(2 * x + 1, 2 * y);
            let p01 = src.pixel_index(2 * x, 2 * y + 1);
            let p11 = src.pixel_index(2 * x + 1, 2 * y + 1);
            for c in 0..CHANNELS_PER_PIXEL {
                let sum =
                    buf.read(p00 + c) + buf.read(p10 + c) + buf.read(p01 + c) + buf.read(p11 + c);
                buf.write(out, sum / 4.0);
                out += 1;
            }
        }
    }
}
