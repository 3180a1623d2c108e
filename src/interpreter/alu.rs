//! Typed operand evaluation helpers.

use super::Interpreter;
use crate::cell::{cast, Numeric};
use crate::instruction::{Instruction, Operand, TypeTag};

impl Interpreter {
    /// Value of an operand converted into the evaluation type `T`.
    ///
    /// Immediates are taken at face value in their tag's 32-bit kind;
    /// indirects are loaded from memory at their native width. Either way
    /// the result goes through a single numeric cast into `T`.
    pub(crate) fn source<T: Numeric>(&self, operand: Operand) -> T {
        use TypeTag::*;
        match operand.tag() {
            LitUnsigned => cast(operand.raw()),
            LitSigned => cast(operand.raw() as i32),
            LitFloat => cast(f32::from_bits(operand.raw())),
            Unsigned => cast(self.memory.load::<u32>(operand.raw())),
            Signed => cast(self.memory.load::<i32>(operand.raw())),
            Float => cast(self.memory.load::<f32>(operand.raw())),
            UnsignedLong => cast(self.memory.load::<u64>(operand.raw())),
            SignedLong => cast(self.memory.load::<i64>(operand.raw())),
            Double => cast(self.memory.load::<f64>(operand.raw())),
            UnsignedShort => cast(self.memory.load::<u16>(operand.raw())),
            SignedShort => cast(self.memory.load::<i16>(operand.raw())),
            UnsignedByte => cast(self.memory.load::<u8>(operand.raw())),
            SignedByte => cast(self.memory.load::<i8>(operand.raw())),
        }
    }

    /// Evaluate a one-source operator in `T` and store through the
    /// destination. Sources are read after the instruction pointer has
    /// advanced, so a source cell inside the IP word sees the new value.
    pub(crate) fn op_unary<T, F>(&mut self, ip: u32, inst: &Instruction, f: F)
    where
        T: Numeric,
        F: FnOnce(T) -> T,
    {
        let value = f(self.source::<T>(inst.src1()));
        self.memory.store(inst.dst().address(ip), value);
    }

    /// Evaluate a two-source operator in `T` and store through the
    /// destination.
    pub(crate) fn op_binary<T, F>(&mut self, ip: u32, inst: &Instruction, f: F)
    where
        T: Numeric,
        F: FnOnce(T, T) -> T,
    {
        let lhs = self.source::<T>(inst.src1());
        let rhs = self.source::<T>(inst.src2());
        self.memory.store(inst.dst().address(ip), f(lhs, rhs));
    }
}
