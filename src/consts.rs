//! VM parameters

use core::mem;

/// Memory offset of the instruction pointer cell.
pub const IP_OFFSET: u32 = 0;

/// Width of the instruction pointer cell, in bytes.
pub const IP_SIZE: u32 = mem::size_of::<u32>() as u32;

/// Default ceiling for memory growth, in bytes.
pub const VM_MEM_MAX: u32 = 4 * 1024 * 1024;

/// Bytes the loader grows and reads per iteration.
pub const LOAD_CHUNK_SIZE: u32 = 4096;
