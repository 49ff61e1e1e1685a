use ms_core::{CHANNELS_PER_PIXEL, Channel, ChannelBuffer, Error, MipLayout};

/// Synthetic base-image pixel at `(x, y)`: `(x mod 256, y mod 256, 0, 255)`.
#[inline]
pub fn gradient_pixel(x: usize, y: usize) -> [Channel; CHANNELS_PER_PIXEL] {
    [(x % 256) as Channel, (y % 256) as Channel, 0.0, 255.0]
}

/// Zeroes the whole buffer and writes the gradient into level 0.
///
/// Levels below the base stay zero until the chain is generated.
pub fn init_buffer<B: ChannelBuffer + ?Sized>(
    buf: &mut B,
    layout: &MipLayout,
) -> Result<(), Error> {
    layout.check_capacity(buf.len())?;
    let base_w = layout.base_width();

    if let Some(data) = buf.as_contiguous_mut() {
        init_contiguous(data, base_w);
        return Ok(());
    }

    init_indexed(buf, base_w);
    Ok(())
}

fn init_contiguous(data: &mut [Channel], base_w: usize) {
    data.fill(0.0);

    let base = &mut data[..base_w * base_w * CHANNELS_PER_PIXEL];
    for (y, row) in base.chunks_exact_mut(base_w * CHANNELS_PER_PIXEL).enumerate() {
        for (x, px) in row.chunks_exact_mut(CHANNELS_PER_PIXEL).enumerate() {
            px.copy_from_slice(&gradient_pixel(x, y));
        }
    }
}

fn init_indexed<B: ChannelBuffer + ?Sized>(buf: &mut B, base_w: usize) {
    for i in 0..buf.len() {
        buf.write(i, 0.0);
    }

    let mut i = 0;
    for y in 0..base_w {
        for x in 0..base_w {
            for value in gradient_pixel(x, y) {
                buf.write(i, value);
                i += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ms_core::{Channel, ChannelBuffer, Error, MipLayout};

    use crate::init::{gradient_pixel, init_buffer};
    use crate::level_pixel;

    struct IndexOnly(Vec<Channel>);

    impl ChannelBuffer for IndexOnly {
        fn len(&self) -> usize {
            self.0.len()
        }

        fn read(&self, index: usize) -> Channel {
            self.0[index]
        }

        fn write(&mut self, index: usize, value: Channel) {
            self.0[index] = value;
        }
    }

    #[test]
    fn gradient_wraps_every_256_pixels() {
        assert_eq!(gradient_pixel(0, 0), [0.0, 0.0, 0.0, 255.0]);
        assert_eq!(gradient_pixel(255, 3), [255.0, 3.0, 0.0, 255.0]);
        assert_eq!(gradient_pixel(300, 257), [44.0, 1.0, 0.0, 255.0]);
    }

    #[test]
    fn base_level_holds_gradient_and_rest_is_zero() {
        let layout = MipLayout::new(512).expect("valid layout");
        let mut buf = vec![-1.0 as Channel; layout.total_channels()];
        init_buffer(&mut buf, &layout).expect("buffer fits");

        assert_eq!(level_pixel(&buf, &layout, 0, 300, 257), Some([44.0, 1.0, 0.0, 255.0]));
        assert_eq!(level_pixel(&buf, &layout, 0, 511, 0), Some([255.0, 0.0, 0.0, 255.0]));

        let base_len = 512 * 512 * 4;
        assert!(buf[base_len..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn init_is_idempotent() {
        let layout = MipLayout::new(16).expect("valid layout");
        let mut buf = vec![0.0 as Channel; layout.total_channels()];

        init_buffer(&mut buf, &layout).expect("buffer fits");
        let first = buf.clone();
        init_buffer(&mut buf, &layout).expect("buffer fits");
        assert_eq!(buf, first);
    }

    #[test]
    fn indexed_path_matches_contiguous() {
        let layout = MipLayout::new(8).expect("valid layout");
        let mut contiguous = vec![3.0 as Channel; layout.total_channels()];
        let mut indexed = IndexOnly(vec![3.0 as Channel; layout.total_channels()]);

        init_buffer(&mut contiguous, &layout).expect("buffer fits");
        init_buffer(&mut indexed, &layout).expect("buffer fits");
        assert_eq!(indexed.0, contiguous);
    }

    #[test]
    fn width_one_is_single_opaque_black_pixel() {
        let layout = MipLayout::new(1).expect("valid layout");
        let mut buf = [9.0 as Channel; 4];
        init_buffer(&mut buf, &layout).expect("buffer fits");
        assert_eq!(buf, [0.0, 0.0, 0.0, 255.0]);
    }

    #[test]
    fn undersized_buffer_is_rejected_untouched() {
        let layout = MipLayout::new(4).expect("valid layout");
        let mut buf = vec![5.0 as Channel; 83];
        let err = init_buffer(&mut buf, &layout).expect_err("too small");
        assert_eq!(
            err,
            Error::BufferTooSmall {
                required: 84,
                actual: 83
            }
        );
        assert!(buf.iter().all(|&v| v == 5.0));
    }
}
