//! Contiguous memory collaborators.
//!
//! The pool never allocates raw bytes itself: it is handed a single
//! contiguous block by an injected [`ContiguousAllocator`] at start and
//! subdivides that block with its own bookkeeping. This module defines the
//! provider traits and two implementations:
//!
//! - [`CpuAllocator`]: memfd-backed memory (Linux), shareable by fd and
//!   suitable for handing to a hardware codec
//! - [`HeapAllocator`]: plain aligned heap memory for tests and
//!   single-process use
//!
//! Cache maintenance (`invalidate` before reading what another agent wrote,
//! `writeback` after writing what another agent will read) lives on the
//! block, but is invoked by the *callers* of the pool around their hardware
//! access. The pool itself only does range bookkeeping.

mod block;
mod cpu;
mod heap;

pub use block::{ContiguousAllocator, ContiguousBlock};
pub use cpu::{CpuAllocator, CpuBlock};
pub use heap::{HeapAllocator, HeapBlock};
