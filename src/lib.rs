//! # carvepool
//!
//! A fixed-capacity slice-buffer pool for hardware encode pipelines.
//!
//! Encoders must reserve a worst-case-sized output buffer before compression
//! runs, and only learn the true (smaller) produced size once the hardware
//! finishes. carvepool is built around that shape: it reserves one
//! contiguous arena up front, hands out variably-sized regions of it, and
//! lets the unused tail of a region go back to the free list in place: no
//! copy, no fragmentation growth under steady-state load.
//!
//! ## Features
//!
//! - **Front carve-out**: allocation bumps the front of the first fitting
//!   free slice, keeping the remainder adjacent to where a later trim needs
//!   it
//! - **Coalescing free list**: releases merge with free neighbors on both
//!   sides; the list is always sorted and fully coalesced
//! - **In-place trim**: shrink a granted region after the hardware reports
//!   the real size; the suffix is immediately reusable
//! - **Injected memory provider**: memfd-backed [`memory::CpuAllocator`]
//!   for codec/IPC use, [`memory::HeapAllocator`] for tests
//!
//! ## Quick Start
//!
//! ```rust
//! use carvepool::memory::HeapAllocator;
//! use carvepool::{PoolConfig, SlicePool};
//! use std::sync::Arc;
//!
//! let pool = SlicePool::new(Arc::new(HeapAllocator::new()));
//! pool.configure(PoolConfig::new(256 * 1024, 64, 64))?;
//! pool.start()?;
//!
//! // Worst case in, true size out.
//! let mut handle = pool.acquire(256 * 1024)?;
//! // ... hardware encode writes through handle.as_mut_ptr() ...
//! pool.resize(&mut handle, 18_000)?;
//! pool.release(handle);
//!
//! pool.stop();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_op_in_unsafe_fn)]

mod arena;
pub mod error;
mod freelist;
pub mod memory;
pub mod pool;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{AllocError, ConfigError, ResizeError};
    pub use crate::memory::{ContiguousAllocator, ContiguousBlock};
    pub use crate::pool::{PoolConfig, PoolStats, SliceHandle, SlicePool};
}

pub use error::{AllocError, ConfigError, ResizeError};
pub use pool::{PoolConfig, PoolStats, SliceHandle, SlicePool};
