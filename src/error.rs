//! Runtime interpreter error implementation
//!
//! Every variant is fatal: the machine has no trap handler, so programs
//! cannot catch or observe errors. Conditions a program wants to survive
//! must be encoded as explicit checks in the program itself.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while growing or moving bytes in [`crate::memory::Memory`].
#[derive(Debug, Error)]
pub enum MemoryError {
    /// The requested break exceeds the configured ceiling.
    #[error("requested break {requested} exceeds the memory ceiling {max}")]
    OutOfMemory {
        /// Break the access needed.
        requested: u64,
        /// Configured ceiling.
        max: u32,
    },
    /// Growth within the ceiling failed at the allocator.
    #[error("allocation failed growing memory to {requested} bytes")]
    AllocFailure {
        /// Break the access needed.
        requested: u32,
    },
    /// A byte range leaves the current break.
    #[error("range at {addr} with length {len} is not addressable")]
    OutOfBounds {
        /// Start of the range.
        addr: u32,
        /// Length of the range in bytes.
        len: u64,
    },
}

/// Interpreter runtime error variants.
#[derive(Debug, Error)]
pub enum VmError {
    /// Opcode byte outside the known set.
    #[error("Invalid operation at {addr}: {op}")]
    InvalidOp {
        /// Memory offset of the opcode byte.
        addr: u32,
        /// The offending byte.
        op: char,
    },
    /// Type-tag byte outside the known set.
    #[error("Invalid type at {addr}: {tag}")]
    InvalidType {
        /// Memory offset of the tag byte.
        addr: u32,
        /// The offending byte.
        tag: char,
    },
    /// Bitwise operator with a floating destination type.
    #[error("Invalid type at {addr}: {tag}. Floating type cannot be used with bitwise operator {op}")]
    InvalidTypeForOp {
        /// Memory offset of the destination tag byte.
        addr: u32,
        /// The floating destination tag.
        tag: char,
        /// The rejected operator.
        op: char,
    },
    /// A cell referenced by the operand at `addr` could not be made
    /// addressable.
    #[error("Could not create memory for address at {addr}: {source}")]
    InvalidAddress {
        /// Memory offset of the referring operand field.
        addr: u32,
        /// What the growth attempt reported.
        #[source]
        source: MemoryError,
    },
    /// The instruction pointer does not identify a loadable instruction.
    #[error("Invalid IP: {ip}")]
    InvalidIp {
        /// The rejected instruction pointer.
        ip: u32,
        /// What the growth attempt reported.
        #[source]
        source: MemoryError,
    },
    /// Growth demanded outside instruction context (preload, block moves).
    #[error(transparent)]
    Memory(#[from] MemoryError),
    /// A file could not be opened or read during preload.
    #[error("Couldn't load file {path:?}: {source}")]
    Load {
        /// Path handed to the loader.
        path: PathBuf,
        /// Underlying io failure.
        #[source]
        source: io::Error,
    },
    /// Trace-stream and other io failures.
    #[error("Unrecoverable error: {0}")]
    Io(#[from] io::Error),
}

impl VmError {
    /// Memory offset of the offending byte, when the error names one.
    pub const fn location(&self) -> Option<u32> {
        match self {
            Self::InvalidOp { addr, .. }
            | Self::InvalidType { addr, .. }
            | Self::InvalidTypeForOp { addr, .. }
            | Self::InvalidAddress { addr, .. } => Some(*addr),
            Self::InvalidIp { ip, .. } => Some(*ip),
            _ => None,
        }
    }
}
