//! Typed memory cells and the numeric casts between them.
//!
//! The machine evaluates every operator in the destination operand's type.
//! Source values are loaded at their native width and converted with a
//! single plain cast, so conversion semantics are exactly Rust's `as`:
//! truncation and sign-extension between integers, rounding on int→float,
//! saturation on float→int, NaN/Inf propagation on float→float.

use byteorder::{ByteOrder, LittleEndian};

mod sealed {
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for i8 {}
    impl Sealed for u16 {}
    impl Sealed for i16 {}
    impl Sealed for u32 {}
    impl Sealed for i32 {}
    impl Sealed for u64 {}
    impl Sealed for i64 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// A fixed-width numeric type stored in memory as little-endian bytes.
pub trait Cell: Copy + sealed::Sealed {
    /// Cell width in bytes.
    const WIDTH: u32;

    /// Read a cell from the first `WIDTH` bytes of `buf`.
    fn read(buf: &[u8]) -> Self;

    /// Write the cell into the first `WIDTH` bytes of `buf`.
    fn write(self, buf: &mut [u8]);
}

macro_rules! impl_cell {
    ($($t:ty: $read:path, $write:path);+ $(;)?) => {
        $(impl Cell for $t {
            const WIDTH: u32 = core::mem::size_of::<$t>() as u32;

            fn read(buf: &[u8]) -> Self {
                $read(buf)
            }

            fn write(self, buf: &mut [u8]) {
                $write(buf, self)
            }
        })+
    };
}

impl Cell for u8 {
    const WIDTH: u32 = 1;

    fn read(buf: &[u8]) -> Self {
        buf[0]
    }

    fn write(self, buf: &mut [u8]) {
        buf[0] = self;
    }
}

impl Cell for i8 {
    const WIDTH: u32 = 1;

    fn read(buf: &[u8]) -> Self {
        buf[0] as i8
    }

    fn write(self, buf: &mut [u8]) {
        buf[0] = self as u8;
    }
}

impl_cell! {
    u16: LittleEndian::read_u16, LittleEndian::write_u16;
    i16: LittleEndian::read_i16, LittleEndian::write_i16;
    u32: LittleEndian::read_u32, LittleEndian::write_u32;
    i32: LittleEndian::read_i32, LittleEndian::write_i32;
    u64: LittleEndian::read_u64, LittleEndian::write_u64;
    i64: LittleEndian::read_i64, LittleEndian::write_i64;
    f32: LittleEndian::read_f32, LittleEndian::write_f32;
    f64: LittleEndian::read_f64, LittleEndian::write_f64;
}

/// Numeric conversion with plain `as`-cast semantics.
pub trait CastFrom<T> {
    /// Convert `value` into `Self` with a single cast.
    fn cast_from(value: T) -> Self;
}

macro_rules! impl_cast_from {
    ($($dst:ty),+) => {
        $(
            impl_cast_from!(@from $dst: u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);
        )+
    };
    (@from $dst:ty: $($src:ty),+) => {
        $(impl CastFrom<$src> for $dst {
            #[inline]
            fn cast_from(value: $src) -> Self {
                value as $dst
            }
        })+
    };
}

impl_cast_from!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

/// Free-function form of [`CastFrom`], inferring the destination from the
/// call site and the source from the argument.
pub fn cast<S, T: CastFrom<S>>(value: S) -> T {
    T::cast_from(value)
}

/// Cell types an operator can evaluate in, with conversions from every
/// source cell type and the arithmetic the operator table needs.
///
/// Integer arithmetic wraps on overflow; integer division or remainder by
/// zero panics, terminating the process (a program bug, not a VM bug).
pub trait Numeric:
    Cell
    + CastFrom<u8>
    + CastFrom<i8>
    + CastFrom<u16>
    + CastFrom<i16>
    + CastFrom<u32>
    + CastFrom<i32>
    + CastFrom<u64>
    + CastFrom<i64>
    + CastFrom<f32>
    + CastFrom<f64>
{
    fn add(self, rhs: Self) -> Self;
    fn sub(self, rhs: Self) -> Self;
    fn mul(self, rhs: Self) -> Self;
    fn div(self, rhs: Self) -> Self;
    fn rem(self, rhs: Self) -> Self;
    fn neg(self) -> Self;
}

macro_rules! impl_numeric_int {
    ($($t:ty),+) => {
        $(impl Numeric for $t {
            fn add(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }

            fn sub(self, rhs: Self) -> Self {
                self.wrapping_sub(rhs)
            }

            fn mul(self, rhs: Self) -> Self {
                self.wrapping_mul(rhs)
            }

            fn div(self, rhs: Self) -> Self {
                self.wrapping_div(rhs)
            }

            fn rem(self, rhs: Self) -> Self {
                self.wrapping_rem(rhs)
            }

            fn neg(self) -> Self {
                self.wrapping_neg()
            }
        })+
    };
}

macro_rules! impl_numeric_float {
    ($($t:ty),+) => {
        $(impl Numeric for $t {
            fn add(self, rhs: Self) -> Self {
                self + rhs
            }

            fn sub(self, rhs: Self) -> Self {
                self - rhs
            }

            fn mul(self, rhs: Self) -> Self {
                self * rhs
            }

            fn div(self, rhs: Self) -> Self {
                self / rhs
            }

            // fmod semantics: remainder with a round-to-zero quotient.
            fn rem(self, rhs: Self) -> Self {
                self % rhs
            }

            fn neg(self) -> Self {
                -self
            }
        })+
    };
}

impl_numeric_int!(u8, i8, u16, i16, u32, i32, u64, i64);
impl_numeric_float!(f32, f64);

/// Integer cell types admitted as bitwise-operator destinations.
///
/// Shift distances are masked to the type width. `shr` is logical for
/// unsigned types and arithmetic for signed ones.
pub trait Bits: Numeric {
    fn not(self) -> Self;
    fn and(self, rhs: Self) -> Self;
    fn or(self, rhs: Self) -> Self;
    fn xor(self, rhs: Self) -> Self;
    fn shl(self, count: Self) -> Self;
    fn shr(self, count: Self) -> Self;
}

macro_rules! impl_bits {
    ($($t:ty),+) => {
        $(impl Bits for $t {
            fn not(self) -> Self {
                !self
            }

            fn and(self, rhs: Self) -> Self {
                self & rhs
            }

            fn or(self, rhs: Self) -> Self {
                self | rhs
            }

            fn xor(self, rhs: Self) -> Self {
                self ^ rhs
            }

            fn shl(self, count: Self) -> Self {
                self.wrapping_shl(count as u32)
            }

            fn shr(self, count: Self) -> Self {
                self.wrapping_shr(count as u32)
            }
        })+
    };
}

impl_bits!(u8, i8, u16, i16, u32, i32, u64, i64);
