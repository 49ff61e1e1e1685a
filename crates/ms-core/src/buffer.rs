use crate::Channel;

/// A contiguous, mutable run of channel values.
///
/// The mip routines only need indexed reads and writes plus the length.
/// Storages that own a plain slice also expose it through
/// [`ChannelBuffer::as_contiguous`] / [`ChannelBuffer::as_contiguous_mut`],
/// which lets callers take a faster slice-based path.
pub trait ChannelBuffer {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads one channel value. Panics if `index >= self.len()`.
    fn read(&self, index: usize) -> Channel;

    /// Writes one channel value. Panics if `index >= self.len()`.
    fn write(&mut self, index: usize, value: Channel);

    fn as_contiguous(&self) -> Option<&[Channel]> {
        None
    }

    fn as_contiguous_mut(&mut self) -> Option<&mut [Channel]> {
        None
    }
}

impl ChannelBuffer for [Channel] {
    fn len(&self) -> usize {
        <[Channel]>::len(self)
    }

    #[inline]
    fn read(&self, index: usize) -> Channel {
        self[index]
    }

    #[inline]
    fn write(&mut self, index: usize, value: Channel) {
        self[index] = value;
    }

    fn as_contiguous(&self) -> Option<&[Channel]> {
        Some(self)
    }

    fn as_contiguous_mut(&mut self) -> Option<&mut [Channel]> {
        Some(self)
    }
}

impl<const N: usize> ChannelBuffer for [Channel; N] {
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn read(&self, index: usize) -> Channel {
        self[index]
    }

    #[inline]
    fn write(&mut self, index: usize, value: Channel) {
        self[index] = value;
    }

    fn as_contiguous(&self) -> Option<&[Channel]> {
        Some(self.as_slice())
    }

    fn as_contiguous_mut(&mut self) -> Option<&mut [Channel]> {
        Some(self.as_mut_slice())
    }
}

impl ChannelBuffer for Vec<Channel> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn read(&self, index: usize) -> Channel {
        self[index]
    }

    #[inline]
    fn write(&mut self, index: usize, value: Channel) {
        self[index] = value;
    }

    fn as_contiguous(&self) -> Option<&[Channel]> {
        Some(self.as_slice())
    }

    fn as_contiguous_mut(&mut self) -> Option<&mut [Channel]> {
        Some(self.as_mut_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::ChannelBuffer;
    use crate::Channel;

    fn fill_ramp<B: ChannelBuffer + ?Sized>(buf: &mut B) {
        for i in 0..buf.len() {
            buf.write(i, i as Channel);
        }
    }

    #[test]
    fn stack_array_vec_and_slice_agree() {
        let mut array = [0.0 as Channel; 8];
        let mut vec = vec![0.0 as Channel; 8];
        let mut backing = [0.0 as Channel; 8];
        let slice: &mut [Channel] = &mut backing;

        fill_ramp(&mut array);
        fill_ramp(&mut vec);
        fill_ramp(&mut *slice);

        assert_eq!(ChannelBuffer::len(&array), 8);
        assert_eq!(array.read(5), 5.0);
        assert_eq!(vec.as_contiguous(), Some(&array[..]));
        assert_eq!(slice.as_contiguous(), Some(&array[..]));
    }

    #[test]
    fn empty_vec_is_empty() {
        let vec: Vec<Channel> = Vec::new();
        assert!(ChannelBuffer::is_empty(&vec));
    }

    #[test]
    #[should_panic]
    fn read_past_end_panics() {
        let vec = vec![0.0 as Channel; 4];
        let _ = vec.read(4);
    }
}
