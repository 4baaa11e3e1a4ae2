//! Error types for carvepool.
//!
//! Each failure family gets its own enum so callers can match on exactly the
//! outcomes an operation can produce: configuration mistakes surface before
//! the pool ever starts, allocation failures carry the recoverable/fatal
//! distinction, and trim failures are non-fatal by contract.

use thiserror::Error;

/// Errors from [`SlicePool::configure`](crate::pool::SlicePool::configure).
///
/// These are caller bugs, not runtime conditions: every variant means the
/// configuration could never have produced a working pool.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The pool is already started; configuration is fixed until `stop`.
    #[error("pool is already started; stop it before reconfiguring")]
    AlreadyStarted,

    /// The per-buffer size ceiling was zero.
    #[error("buffer size must be greater than 0")]
    ZeroBufferSize,

    /// The maximum concurrent-buffer count was zero.
    #[error("max buffer count must be greater than 0")]
    ZeroMaxBuffers,

    /// The alignment was not a power of two.
    #[error("alignment must be a power of two, got {0}")]
    BadAlignment(usize),

    /// `buffer_size * max_buffers` overflowed `usize`.
    #[error("arena size overflows usize ({buffer_size} x {max_buffers})")]
    ArenaTooLarge {
        /// The configured per-buffer ceiling.
        buffer_size: usize,
        /// The configured buffer count.
        max_buffers: usize,
    },
}

/// Errors from [`SlicePool::start`](crate::pool::SlicePool::start) and
/// [`SlicePool::acquire`](crate::pool::SlicePool::acquire).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocError {
    /// The contiguous memory provider refused the arena block.
    ///
    /// Fatal to `start`: the pool remains unstarted and unusable.
    #[error("contiguous memory provider failed: {0}")]
    ProviderFailed(String),

    /// The free list is empty; no region of any size can be granted.
    ///
    /// Recoverable: the caller backs off or drops the work item. The pool
    /// never blocks or retries internally.
    #[error("arena exhausted: no free space available")]
    Exhausted,

    /// `start` was called before `configure`.
    #[error("pool has no configuration; call configure first")]
    NotConfigured,

    /// The operation requires a started pool.
    #[error("pool is not started")]
    NotStarted,
}

/// Errors from [`SlicePool::resize`](crate::pool::SlicePool::resize).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResizeError {
    /// No free slice begins exactly where the granted region ends, so there
    /// is nothing to extend the unused suffix into.
    ///
    /// This happens when the original acquire consumed its source slice
    /// exactly. Non-fatal: the handle simply keeps its full granted size
    /// until released.
    #[error("no free slice adjacent to the granted region")]
    NoAdjacentFreeSpace,

    /// The operation requires a started pool.
    #[error("pool is not started")]
    NotStarted,
}
