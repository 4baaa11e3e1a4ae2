//! Contiguous memory provider traits.

use crate::error::AllocError;
use std::sync::Arc;

/// A contiguous block of raw bytes obtained from a [`ContiguousAllocator`].
///
/// The block is freed when the last reference to it is dropped; there is no
/// explicit free call. The pool holds one reference for the arena's lifetime
/// and every granted handle holds another, so the bytes a handle points at
/// can never dangle, even if the pool is stopped while the handle is still
/// in flight.
///
/// # Safety
///
/// Implementations must ensure that:
/// - `as_ptr` stays valid and stable for the block's entire lifetime
/// - the memory is at least `len` bytes
/// - concurrent byte access is the caller's problem, not the block's
pub trait ContiguousBlock: Send + Sync {
    /// Get a raw pointer to the start of the block.
    fn as_ptr(&self) -> *const u8;

    /// Get a mutable pointer to the start of the block.
    ///
    /// Returns `None` if the block is read-only.
    fn as_mut_ptr(&self) -> Option<*mut u8>;

    /// Total size of the block in bytes.
    fn len(&self) -> usize;

    /// Returns true if the block has zero length.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invalidate CPU caches for `offset..offset + len` before reading data
    /// written by another agent (DSP, DMA engine).
    ///
    /// A no-op on cache-coherent backends; the hook exists so non-coherent
    /// providers can be dropped in without changing callers.
    fn invalidate(&self, offset: usize, len: usize) -> std::io::Result<()>;

    /// Write back CPU caches for `offset..offset + len` after writing data
    /// another agent will read.
    fn writeback(&self, offset: usize, len: usize) -> std::io::Result<()>;
}

/// The external contiguous memory provider, injected into
/// [`SlicePool::new`](crate::pool::SlicePool::new).
///
/// One allocation per pool start; the pool never asks for more memory after
/// that.
pub trait ContiguousAllocator: Send + Sync {
    /// Allocate a block of at least `size` bytes whose base address
    /// satisfies `align` (a power of two).
    fn alloc(&self, size: usize, align: usize) -> Result<Arc<dyn ContiguousBlock>, AllocError>;
}
