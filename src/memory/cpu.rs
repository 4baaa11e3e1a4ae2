//! memfd-backed contiguous memory (Linux).
//!
//! This is the production backend: a single anonymous memfd, sized once and
//! mapped `MAP_SHARED`. The fd can be handed to a hardware codec driver or
//! another process without copying, and the mapping is page-aligned, which
//! satisfies any power-of-two alignment request up to the page size.
//!
//! # Example
//!
//! ```rust,ignore
//! use carvepool::memory::{ContiguousAllocator, CpuAllocator};
//!
//! let allocator = CpuAllocator::with_name("encoder-output");
//! let block = allocator.alloc(4 * 1024 * 1024, 64)?;
//! ```

use super::{ContiguousAllocator, ContiguousBlock};
use crate::error::AllocError;
use rustix::fd::{AsFd, BorrowedFd, OwnedFd};
use rustix::mm::{MapFlags, MsyncFlags, ProtFlags};
use std::ffi::CString;
use std::os::unix::io::AsRawFd;
use std::ptr::NonNull;
use std::sync::Arc;

/// Standard page size; mmap alignment guarantee and msync granularity.
const PAGE_SIZE: usize = 4096;

/// A contiguous block backed by `memfd_create` + `mmap`.
pub struct CpuBlock {
    /// The memfd file descriptor.
    fd: OwnedFd,
    /// Base pointer of the mapping.
    ptr: NonNull<u8>,
    /// Size of the mapping in bytes.
    len: usize,
}

impl CpuBlock {
    /// Create a memfd-backed block directly, outside an allocator.
    ///
    /// `name` is the memfd debug name. Fails with
    /// [`AllocError::ProviderFailed`] when the kernel refuses the fd, the
    /// size, or the mapping.
    pub fn new(name: &str, size: usize) -> Result<Self, AllocError> {
        let cname =
            CString::new(name).map_err(|e| AllocError::ProviderFailed(e.to_string()))?;
        let fd = rustix::fs::memfd_create(&cname, rustix::fs::MemfdFlags::CLOEXEC)
            .map_err(|e| AllocError::ProviderFailed(e.to_string()))?;

        rustix::fs::ftruncate(&fd, size as u64)
            .map_err(|e| AllocError::ProviderFailed(e.to_string()))?;

        // MAP_SHARED so the pages are the same ones a codec driver or peer
        // process sees through the fd.
        let ptr = unsafe {
            rustix::mm::mmap(
                std::ptr::null_mut(),
                size,
                ProtFlags::READ | ProtFlags::WRITE,
                MapFlags::SHARED,
                &fd,
                0,
            )
            .map_err(|e| AllocError::ProviderFailed(e.to_string()))?
        };

        let ptr = NonNull::new(ptr.cast::<u8>())
            .ok_or_else(|| AllocError::ProviderFailed("mmap returned null".into()))?;

        Ok(Self { fd, ptr, len: size })
    }

    /// Get the file descriptor backing this block.
    ///
    /// Hand this to a codec driver or send it over a Unix socket via
    /// `SCM_RIGHTS`.
    #[inline]
    pub fn fd(&self) -> BorrowedFd<'_> {
        self.fd.as_fd()
    }

    /// Pre-fault every page so no page faults happen on the encode path.
    pub fn prefault(&self) {
        let ptr = self.ptr.as_ptr();
        for offset in (0..self.len).step_by(PAGE_SIZE) {
            unsafe {
                std::ptr::read_volatile(ptr.add(offset));
            }
        }
    }
}

impl ContiguousBlock for CpuBlock {
    #[inline]
    fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }

    #[inline]
    fn as_mut_ptr(&self) -> Option<*mut u8> {
        Some(self.ptr.as_ptr())
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    fn invalidate(&self, offset: usize, len: usize) -> std::io::Result<()> {
        assert!(offset + len <= self.len, "range exceeds block bounds");
        // CPU mappings are cache-coherent; nothing to do.
        Ok(())
    }

    fn writeback(&self, offset: usize, len: usize) -> std::io::Result<()> {
        assert!(offset + len <= self.len, "range exceeds block bounds");
        if len == 0 {
            return Ok(());
        }
        // msync requires a page-aligned start address.
        let begin = offset & !(PAGE_SIZE - 1);
        let span = offset + len - begin;
        unsafe {
            rustix::mm::msync(
                self.ptr.as_ptr().add(begin).cast(),
                span,
                MsyncFlags::SYNC,
            )?;
        }
        Ok(())
    }
}

impl Drop for CpuBlock {
    fn drop(&mut self) {
        // Unmap before the fd closes.
        unsafe {
            let _ = rustix::mm::munmap(self.ptr.as_ptr().cast(), self.len);
        }
    }
}

// SAFETY: CpuBlock is Send + Sync because:
// - the mapping can be accessed from any thread
// - the fd is reference-counted by the kernel
// - concurrent byte access requires external synchronization, same as any
//   shared memory
unsafe impl Send for CpuBlock {}
unsafe impl Sync for CpuBlock {}

impl std::fmt::Debug for CpuBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuBlock")
            .field("fd", &self.fd.as_raw_fd())
            .field("len", &self.len)
            .finish()
    }
}

/// Allocator producing [`CpuBlock`]s.
#[derive(Debug, Clone)]
pub struct CpuAllocator {
    /// Debug name for the memfd, visible in `/proc/self/fd/`.
    name: String,
}

impl CpuAllocator {
    /// Create an allocator with the default memfd name.
    pub fn new() -> Self {
        Self::with_name("carvepool")
    }

    /// Create an allocator whose memfds carry a debug name.
    pub fn with_name(name: &str) -> Self {
        Self { name: name.to_string() }
    }
}

impl Default for CpuAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl ContiguousAllocator for CpuAllocator {
    fn alloc(&self, size: usize, align: usize) -> Result<Arc<dyn ContiguousBlock>, AllocError> {
        if size == 0 {
            return Err(AllocError::ProviderFailed("size must be > 0".into()));
        }
        if !align.is_power_of_two() {
            return Err(AllocError::ProviderFailed(format!(
                "alignment must be a power of two, got {align}"
            )));
        }
        if align > PAGE_SIZE {
            return Err(AllocError::ProviderFailed(format!(
                "alignment {align} exceeds the page-alignment guarantee of mmap"
            )));
        }
        Ok(Arc::new(CpuBlock::new(&self.name, size)?))
    }
}
