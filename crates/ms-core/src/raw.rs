use core::ptr::NonNull;
use std::alloc::{self, Layout};

use tracing::debug;

use crate::{Channel, ChannelBuffer, Error, MipLayout};

/// Channel storage obtained straight from the global allocator.
///
/// The allocation is released in `Drop`, so every exit path frees it.
/// A zero-length buffer never allocates.
#[derive(Debug)]
pub struct RawChannelBuffer {
    ptr: NonNull<Channel>,
    len: usize,
}

// SAFETY: the buffer uniquely owns its allocation; access follows the usual
// `&`/`&mut` rules through the methods below.
unsafe impl Send for RawChannelBuffer {}
// SAFETY: shared references only allow reads.
unsafe impl Sync for RawChannelBuffer {}

impl RawChannelBuffer {
    pub fn new_zeroed(len: usize) -> Result<Self, Error> {
        if len == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                len: 0,
            });
        }

        let layout = Layout::array::<Channel>(len).map_err(|_| Error::CapacityOverflow)?;
        // SAFETY: `len > 0`, so `layout` has a non-zero size.
        let raw = unsafe { alloc::alloc_zeroed(layout) };
        let ptr = NonNull::new(raw.cast::<Channel>()).ok_or(Error::AllocationFailed {
            bytes: layout.size(),
        })?;

        debug!(len, bytes = layout.size(), "allocated raw channel buffer");
        Ok(Self { ptr, len })
    }

    pub fn for_layout(layout: &MipLayout) -> Result<Self, Error> {
        Self::new_zeroed(layout.total_channels())
    }

    pub fn as_slice(&self) -> &[Channel] {
        // SAFETY: `ptr` is either dangling with `len == 0` or points to `len`
        // initialized (zeroed) channels owned by `self`.
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [Channel] {
        // SAFETY: as in `as_slice`; `&mut self` guarantees exclusive access.
        unsafe { core::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl Drop for RawChannelBuffer {
    fn drop(&mut self) {
        if self.len == 0 {
            return;
        }
        // Same computation succeeded in `new_zeroed`.
        if let Ok(layout) = Layout::array::<Channel>(self.len) {
            // SAFETY: `ptr` was returned by `alloc_zeroed` with this layout and
            // has not been freed.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), layout) };
            debug!(len = self.len, "released raw channel buffer");
        }
    }
}

impl ChannelBuffer for RawChannelBuffer {
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn read(&self, index: usize) -> Channel {
        self.as_slice()[index]
    }

    #[inline]
    fn write(&mut self, index: usize, value: Channel) {
        self.as_mut_slice()[index] = value;
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
    use super::RawChannelBuffer;
    use crate::{ChannelBuffer, Error, MipLayout};

    #[test]
    fn zeroed_and_writable() {
        let layout = MipLayout::new(8).expect("valid layout");
        let mut buf = RawChannelBuffer::for_layout(&layout).expect("allocation");

        assert_eq!(buf.len(), layout.total_channels());
        assert!(buf.as_slice().iter().all(|&v| v == 0.0));

        buf.write(3, 1.5);
        assert_eq!(buf.read(3), 1.5);
        assert_eq!(buf.as_contiguous().map(|s| s[3]), Some(1.5));
    }

    #[test]
    fn zero_length_never_allocates() {
        let buf = RawChannelBuffer::new_zeroed(0).expect("empty buffer");
        assert!(buf.is_empty());
        assert!(buf.as_slice().is_empty());
        drop(buf);
    }

    #[test]
    fn oversized_request_is_an_error() {
        let err = RawChannelBuffer::new_zeroed(usize::MAX).expect_err("cannot fit");
        assert_eq!(err, Error::CapacityOverflow);
    }

    #[test]
    fn many_buffers_release_on_scope_exit() {
        for len in [1usize, 4, 1024, 1 << 16] {
            let mut buf = RawChannelBuffer::new_zeroed(len).expect("allocation");
            buf.write(len - 1, 2.0);
            assert_eq!(buf.read(len - 1), 2.0);
        }
    }
}
