//! Instruction cycle: fetch, validate, advance, dispatch.

use std::convert::identity;

use super::Interpreter;
use crate::cell::{Bits, Numeric};
use crate::consts::{IP_OFFSET, IP_SIZE};
use crate::error::VmError;
use crate::instruction::{Instruction, Opcode, TypeTag};
use crate::state::ExecuteState;

/// Select the evaluation type from the destination tag and run a generic
/// helper with the given operator.
macro_rules! typed {
    ($self:ident, $ip:ident, $inst:ident, $helper:ident, $f:path) => {
        match $inst.dst().tag() {
            TypeTag::LitUnsigned | TypeTag::Unsigned => $self.$helper::<u32, _>($ip, &$inst, $f),
            TypeTag::LitSigned | TypeTag::Signed => $self.$helper::<i32, _>($ip, &$inst, $f),
            TypeTag::LitFloat | TypeTag::Float => $self.$helper::<f32, _>($ip, &$inst, $f),
            TypeTag::UnsignedLong => $self.$helper::<u64, _>($ip, &$inst, $f),
            TypeTag::SignedLong => $self.$helper::<i64, _>($ip, &$inst, $f),
            TypeTag::Double => $self.$helper::<f64, _>($ip, &$inst, $f),
            TypeTag::UnsignedShort => $self.$helper::<u16, _>($ip, &$inst, $f),
            TypeTag::SignedShort => $self.$helper::<i16, _>($ip, &$inst, $f),
            TypeTag::UnsignedByte => $self.$helper::<u8, _>($ip, &$inst, $f),
            TypeTag::SignedByte => $self.$helper::<i8, _>($ip, &$inst, $f),
        }
    };
}

/// Same selection restricted to integer destinations. The validator has
/// already rejected floating destinations for bitwise operators; the
/// error arms keep the executor total without a panic path.
macro_rules! typed_bits {
    ($self:ident, $ip:ident, $inst:ident, $helper:ident, $f:path) => {
        match $inst.dst().tag() {
            TypeTag::LitUnsigned | TypeTag::Unsigned => Ok($self.$helper::<u32, _>($ip, &$inst, $f)),
            TypeTag::LitSigned | TypeTag::Signed => Ok($self.$helper::<i32, _>($ip, &$inst, $f)),
            TypeTag::UnsignedLong => Ok($self.$helper::<u64, _>($ip, &$inst, $f)),
            TypeTag::SignedLong => Ok($self.$helper::<i64, _>($ip, &$inst, $f)),
            TypeTag::UnsignedShort => Ok($self.$helper::<u16, _>($ip, &$inst, $f)),
            TypeTag::SignedShort => Ok($self.$helper::<i16, _>($ip, &$inst, $f)),
            TypeTag::UnsignedByte => Ok($self.$helper::<u8, _>($ip, &$inst, $f)),
            TypeTag::SignedByte => Ok($self.$helper::<i8, _>($ip, &$inst, $f)),
            TypeTag::LitFloat | TypeTag::Float | TypeTag::Double => {
                Err(VmError::InvalidTypeForOp {
                    addr: $ip + 1,
                    tag: char::from($inst.dst().tag()),
                    op: char::from($inst.op()),
                })
            }
        }
    };
}

impl Interpreter {
    /// Run one fetch–validate–dispatch–execute cycle.
    pub fn execute(&mut self) -> Result<ExecuteState, VmError> {
        self.memory
            .ensure_span(IP_OFFSET, IP_SIZE as u64)
            .map_err(|source| VmError::InvalidIp { ip: IP_OFFSET, source })?;
        let ip = self.memory.load::<u32>(IP_OFFSET);

        self.memory
            .ensure_span(ip, Instruction::LEN as u64)
            .map_err(|source| VmError::InvalidIp { ip, source })?;

        let inst = Instruction::fetch(&self.memory, ip)?;
        self.validate(ip, &inst)?;

        // Advance before dispatch: an operator that writes cell 0 wins,
        // and its target takes effect on the next fetch.
        self.memory.store::<u32>(IP_OFFSET, ip + Instruction::LEN);

        tracing::trace!(ip, op = %inst.op(), "dispatch");
        self.dispatch(ip, inst)
    }

    /// Run until halt, optionally dumping the memory image between
    /// cycles.
    pub fn run(&mut self) -> Result<(), VmError> {
        loop {
            if let Some(sink) = self.trace.as_mut() {
                sink.write_all(self.memory.as_slice())?;
            }
            if !self.execute()?.should_continue() {
                return Ok(());
            }
        }
    }

    fn dispatch(&mut self, ip: u32, inst: Instruction) -> Result<ExecuteState, VmError> {
        match inst.op() {
            Opcode::Noop => {}

            Opcode::Assign => typed!(self, ip, inst, op_unary, identity),

            Opcode::BlockCopy => self.block_copy(ip, &inst)?,

            Opcode::Not => typed_bits!(self, ip, inst, op_unary, Bits::not)?,

            Opcode::And => typed_bits!(self, ip, inst, op_binary, Bits::and)?,

            Opcode::Or => typed_bits!(self, ip, inst, op_binary, Bits::or)?,

            Opcode::Xor => typed_bits!(self, ip, inst, op_binary, Bits::xor)?,

            Opcode::Shl => typed_bits!(self, ip, inst, op_binary, Bits::shl)?,

            Opcode::Shr => typed_bits!(self, ip, inst, op_binary, Bits::shr)?,

            Opcode::Neg => typed!(self, ip, inst, op_unary, Numeric::neg),

            Opcode::Add => typed!(self, ip, inst, op_binary, Numeric::add),

            Opcode::Sub => typed!(self, ip, inst, op_binary, Numeric::sub),

            Opcode::Mul => typed!(self, ip, inst, op_binary, Numeric::mul),

            Opcode::Div => typed!(self, ip, inst, op_binary, Numeric::div),

            Opcode::Rem => typed!(self, ip, inst, op_binary, Numeric::rem),

            Opcode::Halt => return Ok(ExecuteState::Halted),
        }

        Ok(ExecuteState::Proceed)
    }

    /// Overlap-safe move of `width(dst) * src2` bytes. The length is
    /// re-read here rather than reused from validation, and the copy
    /// re-checks bounds: both reads go through live memory.
    fn block_copy(&mut self, ip: u32, inst: &Instruction) -> Result<(), VmError> {
        let count = self.source::<u32>(inst.src2());
        let len = inst.dst().tag().width() as u64 * count as u64;
        self.memory
            .copy(inst.dst().address(ip), inst.src1().address(ip), len)?;
        Ok(())
    }
}
