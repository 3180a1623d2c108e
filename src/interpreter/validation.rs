//! Per-cycle instruction validation.
//!
//! Re-run before every dispatch: the machine is self-modifying, so no
//! check survives across cycles.

use super::Interpreter;
use crate::error::VmError;
use crate::instruction::{Instruction, Opcode, Operand};

impl Interpreter {
    /// Check every precondition of `inst`, growing memory for indirect
    /// operands as needed. On success, every cell the instruction will
    /// read or write lies below the break.
    pub(crate) fn validate(&mut self, ip: u32, inst: &Instruction) -> Result<(), VmError> {
        for operand in [inst.dst(), inst.src1(), inst.src2()] {
            self.validate_operand(ip, operand)?;
        }

        match inst.op() {
            // Both ranges are sized in destination-width units, matching
            // what the block copy will actually move.
            Opcode::BlockCopy => {
                let count = self.source::<u32>(inst.src2());
                let len = inst.dst().tag().width() as u64 * count as u64;
                for operand in [inst.dst(), inst.src1()] {
                    self.memory
                        .ensure_span(operand.address(ip), len)
                        .map_err(|source| VmError::InvalidAddress {
                            addr: operand.field_address(ip),
                            source,
                        })?;
                }
            }
            op if op.is_bitwise() && inst.dst().tag().is_float() => {
                return Err(VmError::InvalidTypeForOp {
                    addr: ip + 1,
                    tag: char::from(inst.dst().tag()),
                    op: char::from(op),
                });
            }
            _ => {}
        }

        Ok(())
    }

    fn validate_operand(&mut self, ip: u32, operand: Operand) -> Result<(), VmError> {
        if operand.tag().is_immediate() {
            return Ok(());
        }
        self.memory
            .ensure_span(operand.raw(), operand.tag().width() as u64)
            .map_err(|source| VmError::InvalidAddress {
                addr: operand.field_address(ip),
                source,
            })
    }
}
