// SPDX-License-Identifier: MPL-2.0
//! The single reusable frame allocation.
//!
//! One region sized to exactly one decoded frame is acquired before the first
//! frame is read and overwritten in place every iteration. The 128-byte
//! alignment keeps the region friendly to the decoder's SIMD row copies.
//! Release happens exactly once, on drop, on every exit path.

use crate::error::{Error, Result};
use std::alloc::{alloc_zeroed, dealloc, Layout};
use std::ptr::NonNull;
use std::slice;

/// Alignment of the frame buffer in bytes.
pub const FRAME_ALIGNMENT: usize = 128;

/// An exclusively owned, alignment-guaranteed byte region holding at most one
/// decoded frame. Contents are only meaningful between a successful decode
/// and the next `read_frame` call.
#[derive(Debug)]
pub struct FrameBuffer {
    ptr: NonNull<u8>,
    layout: Layout,
}

impl FrameBuffer {
    /// Allocates a zero-initialized region of `size` bytes at `alignment`.
    ///
    /// Fails with [`Error::Allocation`] when the layout is invalid (zero
    /// size, non-power-of-two alignment) or the allocator refuses the
    /// request. The caller gets no buffer back in that case and must not
    /// release anything.
    pub fn acquire(size: usize, alignment: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::Allocation("zero-sized frame".to_string()));
        }
        let layout = Layout::from_size_align(size, alignment).map_err(|e| {
            Error::Allocation(format!("invalid layout ({size} bytes, align {alignment}): {e}"))
        })?;

        // SAFETY: layout has non-zero size, checked above.
        let raw = unsafe { alloc_zeroed(layout) };
        let ptr = NonNull::new(raw)
            .ok_or_else(|| Error::Allocation(format!("allocator refused {size} bytes")))?;

        Ok(Self { ptr, layout })
    }

    /// Number of bytes in the buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layout.size()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layout.size() == 0
    }

    /// Read view for the presentation pipeline.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        // SAFETY: ptr is valid for layout.size() bytes and zero-initialized.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.layout.size()) }
    }

    /// Write view for the decode source.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: exclusive borrow of self guarantees no aliasing view.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.layout.size()) }
    }
}

impl Drop for FrameBuffer {
    fn drop(&mut self) {
        // SAFETY: ptr was returned by alloc_zeroed with this exact layout.
        unsafe { dealloc(self.ptr.as_ptr(), self.layout) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_honors_alignment() {
        let buffer = FrameBuffer::acquire(4 * 4 * 4, FRAME_ALIGNMENT).unwrap();
        assert_eq!(buffer.as_slice().as_ptr() as usize % FRAME_ALIGNMENT, 0);
    }

    #[test]
    fn acquire_honors_size() {
        let buffer = FrameBuffer::acquire(1280 * 720 * 4, FRAME_ALIGNMENT).unwrap();
        assert_eq!(buffer.len(), 1280 * 720 * 4);
        assert!(!buffer.is_empty());
    }

    #[test]
    fn acquire_rejects_zero_size() {
        assert!(FrameBuffer::acquire(0, FRAME_ALIGNMENT).is_err());
    }

    #[test]
    fn acquire_rejects_bad_alignment() {
        assert!(FrameBuffer::acquire(64, 100).is_err());
    }

    #[test]
    fn buffer_starts_zeroed_and_is_reusable() {
        let mut buffer = FrameBuffer::acquire(64, FRAME_ALIGNMENT).unwrap();
        assert!(buffer.as_slice().iter().all(|&b| b == 0));

        buffer.as_mut_slice().fill(0xAB);
        assert!(buffer.as_slice().iter().all(|&b| b == 0xAB));

        // Overwritten in place, same allocation.
        let before = buffer.as_slice().as_ptr();
        buffer.as_mut_slice().fill(0xCD);
        assert_eq!(buffer.as_slice().as_ptr(), before);
        assert!(buffer.as_slice().iter().all(|&b| b == 0xCD));
    }
}
