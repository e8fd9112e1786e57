//! Native codec state memory.

use std::alloc::{self, Layout};
use std::ptr::NonNull;

use crate::error::{Lc3Error, Result};

/// Alignment of state blocks, matching what `malloc` guarantees.
pub const STATE_ALIGN: usize = 16;

/// Heap block holding one codec instance's state.
///
/// The block is allocated once, zeroed, and freed exactly once when the
/// `StateBlock` is dropped.
pub struct StateBlock {
    ptr: NonNull<u8>,
    layout: Layout,
}

// Safety: The block is plain memory owned by this value; access goes through &mut self.
unsafe impl Send for StateBlock {}

impl StateBlock {
    /// Allocates a zeroed block of `size` bytes.
    ///
    /// Zero-sized blocks are refused.
    pub fn allocate(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Lc3Error::OutOfMemory { size });
        }
        let layout = Layout::from_size_align(size, STATE_ALIGN)
            .map_err(|_| Lc3Error::OutOfMemory { size })?;

        // Safety: layout has a non-zero size.
        let raw = unsafe { alloc::alloc_zeroed(layout) };
        let ptr = NonNull::new(raw).ok_or(Lc3Error::OutOfMemory { size })?;

        Ok(Self { ptr, layout })
    }

    /// Returns the block size in bytes.
    pub fn len(&self) -> usize {
        self.layout.size()
    }

    /// Always false; empty blocks cannot be allocated.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the block start for handing to the codec.
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.ptr.as_ptr()
    }
}

impl Drop for StateBlock {
    fn drop(&mut self) {
        // Safety: ptr was returned by alloc_zeroed with this layout and is freed only here.
        unsafe { alloc::dealloc(self.ptr.as_ptr(), self.layout) };
    }
}

impl std::fmt::Debug for StateBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateBlock")
            .field("ptr", &self.ptr)
            .field("len", &self.len())
            .finish()
    }
}
