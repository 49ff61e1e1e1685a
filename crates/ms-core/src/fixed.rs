use crate::{Channel, ChannelBuffer, Error, MipLayout};

/// Fixed-length storage whose size is part of the type.
///
/// The array lives behind a `Box`: chains for useful base widths are far
/// larger than a thread stack.
#[derive(Debug, PartialEq)]
pub struct FixedChannelBuffer<const N: usize> {
    data: Box<[Channel; N]>,
}

impl<const N: usize> FixedChannelBuffer<N> {
    pub fn new_zeroed() -> Self {
        // Built through a Vec so the array is never materialized on the stack.
        let data: Box<[Channel; N]> = vec![0.0; N]
            .into_boxed_slice()
            .try_into()
            .expect("boxed slice has exactly N elements");
        Self { data }
    }

    /// Allocates a buffer that exactly fits the chain described by `layout`.
    pub fn for_layout(layout: &MipLayout) -> Result<Self, Error> {
        if layout.total_channels() != N {
            return Err(Error::SizeMismatch {
                expected: layout.total_channels(),
                actual: N,
            });
        }
        Ok(Self::new_zeroed())
    }

    pub fn as_array(&self) -> &[Channel; N] {
        &self.data
    }

    pub fn as_array_mut(&mut self) -> &mut [Channel; N] {
        &mut self.data
    }
}

impl<const N: usize> ChannelBuffer for FixedChannelBuffer<N> {
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn read(&self, index: usize) -> Channel {
        self.data[index]
    }

    #[inline]
    fn write(&mut self, index: usize, value: Channel) {
        self.data[index] = value;
    }

    fn as_contiguous(&self) -> Option<&[Channel]> {
        Some(self.data.as_slice())
    }

    fn as_contiguous_mut(&mut self) -> Option<&mut [Channel]> {
        Some(self.data.as_mut_slice())
    }
}
