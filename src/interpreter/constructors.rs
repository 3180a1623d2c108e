//! Exposed constructors API for the [`Interpreter`]

use std::io;

use super::{Interpreter, VmParams};
use crate::memory::Memory;

impl Interpreter {
    /// Create a new interpreter instance with the provided parameters.
    pub fn with_params(params: VmParams) -> Self {
        Self {
            memory: Memory::new(params.brk_max),
            params,
            trace: None,
        }
    }

    /// Emit a byte-for-byte dump of the memory image to `sink` between
    /// cycles. Informational only; the dump is not part of the machine's
    /// contract.
    pub fn with_trace(mut self, sink: Box<dyn io::Write>) -> Self {
        self.trace = Some(sink);
        self
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::with_params(VmParams::default())
    }
}
