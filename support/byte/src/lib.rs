//! An opaque 8-bit scalar for raw memory manipulation.
//!
//! [`Byte`] is a `u8` that has forgotten it is a number. It supports the bitwise
//! operators (`<<`, `>>`, `&`, `|`, `^`, `!` and their assigning forms) and an
//! explicit conversion back to any integer type, but no arithmetic and no
//! ordering:
//!
//! ```
//! use spanview_byte::Byte;
//!
//! let mut b = Byte::new(23);
//! b <<= 2;
//! assert_eq!(b, Byte::new(92));
//! assert_eq!((b >> 4u8).to_integer::<i32>(), 5);
//! assert_eq!(!Byte::new(23), Byte::new(232));
//! ```
//!
//! Arithmetic does not compile:
//!
//! ```compile_fail
//! use spanview_byte::Byte;
//! let _ = Byte::new(1) + Byte::new(2);
//! ```
//!
//! Neither does ordering:
//!
//! ```compile_fail
//! use spanview_byte::Byte;
//! let _ = Byte::new(1) < Byte::new(2);
//! ```
//!
//! # Shifts
//!
//! The shift amount may be any primitive integer. The result is always masked
//! to 8 bits, so shifting by 8 or more yields zero. A negative shift amount is
//! a programming error and panics.

#![no_std]

use core::fmt;
use core::ops::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Shl, ShlAssign, Shr,
    ShrAssign,
};

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

/// A single byte of raw storage.
///
/// See [crate-level docs](crate) for the operator set.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[derive(FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(transparent)]
pub struct Byte(u8);

static_assertions::assert_eq_size!(Byte, u8);
static_assertions::assert_eq_align!(Byte, u8);
static_assertions::assert_impl_all!(Byte: Copy, Eq, core::hash::Hash, Send, Sync);
static_assertions::assert_not_impl_any!(Byte: PartialOrd, core::ops::Add<Byte>, core::ops::Sub<Byte>);

impl Byte {
    pub const fn new(value: u8) -> Self {
        Byte(value)
    }

    /// Converts the byte to `I` with an `as` cast.
    ///
    /// Every integer type wide enough for an unsigned byte gets the value
    /// unchanged; `i8` gets the two's complement reinterpretation.
    ///
    /// ```
    /// use spanview_byte::Byte;
    ///
    /// assert_eq!(Byte::new(23).to_integer::<u64>(), 23);
    /// assert_eq!(Byte::new(232).to_integer::<i8>(), -24);
    /// ```
    #[inline]
    pub fn to_integer<I: FromByte>(self) -> I {
        I::from_byte(self.0)
    }
}

impl From<u8> for Byte {
    fn from(value: u8) -> Self {
        Byte(value)
    }
}

impl From<Byte> for u8 {
    fn from(value: Byte) -> Self {
        value.0
    }
}

// --- Conversions ---

mod private {
    pub trait Sealed {}
}

/// Integer types a [`Byte`] converts into. Sealed.
pub trait FromByte: private::Sealed {
    #[doc(hidden)]
    fn from_byte(value: u8) -> Self;
}

/// Integer types usable as a shift amount on [`Byte`]. Sealed.
pub trait ShiftAmount: private::Sealed + Copy {
    /// The shift amount, saturated to `u32::MAX`.
    ///
    /// # Panics
    ///
    /// Panics if the amount is negative.
    #[doc(hidden)]
    fn amount(self) -> u32;
}

#[cold]
#[inline(never)]
#[track_caller]
fn negative_shift(amount: i128) -> ! {
    tracing::error!(amount = %amount, "negative shift amount on Byte");
    panic!("shift amount must not be negative, got {amount}")
}

macro_rules! impl_integer {
    (unsigned: $($t:ty),*) => {$(
        impl private::Sealed for $t {}

        impl FromByte for $t {
            #[inline(always)]
            fn from_byte(value: u8) -> Self {
                value as $t
            }
        }

        impl ShiftAmount for $t {
            #[inline(always)]
            fn amount(self) -> u32 {
                u32::try_from(self).unwrap_or(u32::MAX)
            }
        }
    )*};
    (signed: $($t:ty),*) => {$(
        impl private::Sealed for $t {}

        impl FromByte for $t {
            #[inline(always)]
            fn from_byte(value: u8) -> Self {
                value as $t
            }
        }

        impl ShiftAmount for $t {
            #[inline(always)]
            #[track_caller]
            fn amount(self) -> u32 {
                if self < 0 {
                    negative_shift(self as i128);
                }
                u32::try_from(self).unwrap_or(u32::MAX)
            }
        }
    )*};
}

impl_integer!(unsigned: u8, u16, u32, u64, u128, usize);
impl_integer!(signed: i8, i16, i32, i64, i128, isize);

// --- Shifts ---

impl<I: ShiftAmount> Shl<I> for Byte {
    type Output = Byte;

    #[inline]
    #[track_caller]
    fn shl(self, shift: I) -> Byte {
        // Widen so shifts in 8..32 drop the high bits instead of overflowing.
        let wide = u32::from(self.0).checked_shl(shift.amount()).unwrap_or(0);
        Byte(wide as u8)
    }
}

impl<I: ShiftAmount> Shr<I> for Byte {
    type Output = Byte;

    #[inline]
    #[track_caller]
    fn shr(self, shift: I) -> Byte {
        Byte(self.0.checked_shr(shift.amount()).unwrap_or(0))
    }
}

impl<I: ShiftAmount> ShlAssign<I> for Byte {
    #[inline]
    #[track_caller]
    fn shl_assign(&mut self, shift: I) {
        *self = *self << shift;
    }
}

impl<I: ShiftAmount> ShrAssign<I> for Byte {
    #[inline]
    #[track_caller]
    fn shr_assign(&mut self, shift: I) {
        *self = *self >> shift;
    }
}

// --- Bitwise ---

macro_rules! impl_bitwise {
    ($($trait:ident $method:ident $assign_trait:ident $assign_method:ident $op:tt),*) => {$(
        impl $trait for Byte {
            type Output = Byte;

            #[inline(always)]
            fn $method(self, rhs: Byte) -> Byte {
                Byte(self.0 $op rhs.0)
            }
        }

        impl $assign_trait for Byte {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: Byte) {
                self.0 = self.0 $op rhs.0;
            }
        }
    )*};
}

impl_bitwise!(
    BitAnd bitand BitAndAssign bitand_assign &,
    BitOr bitor BitOrAssign bitor_assign |,
    BitXor bitxor BitXorAssign bitxor_assign ^
);

impl Not for Byte {
    type Output = Byte;

    #[inline(always)]
    fn not(self) -> Byte {
        Byte(!self.0)
    }
}

// --- Formatting ---

impl fmt::Debug for Byte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Byte({:#04x})", self.0)
    }
}

impl fmt::LowerHex for Byte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::UpperHex for Byte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

impl fmt::Binary for Byte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Binary::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    extern crate alloc;

    use alloc::format;
    use pretty_assertions::assert_eq;

    use super::Byte;

    // ===================
    // Construction
    // ===================

    #[test]
    fn new_and_default() {
        assert_eq!(Byte::new(23), Byte::from(23u8));
        assert_eq!(Byte::default(), Byte::new(0));
        assert_eq!(u8::from(Byte::new(23)), 23);
    }

    // ===================
    // Shifts
    // ===================

    #[test]
    fn shl_assign() {
        let mut b = Byte::new(23);
        b <<= 2;
        assert_eq!(b, Byte::new(92));
    }

    #[test]
    fn shl() {
        assert_eq!(Byte::new(23) << 2, Byte::new(92));
    }

    #[test]
    fn shr_assign() {
        let mut b = Byte::new(23);
        b >>= 2;
        assert_eq!(b, Byte::new(5));
    }

    #[test]
    fn shr() {
        assert_eq!(Byte::new(23) >> 2, Byte::new(5));
    }

    #[test]
    fn shl_masks_to_eight_bits() {
        assert_eq!(Byte::new(0b1100_0001) << 1u8, Byte::new(0b1000_0010));
        assert_eq!(Byte::new(0xff) << 7i64, Byte::new(0x80));
        assert_eq!(Byte::new(0xff) << 8usize, Byte::new(0));
        assert_eq!(Byte::new(0xff) << 31u32, Byte::new(0));
        assert_eq!(Byte::new(0xff) << 200u128, Byte::new(0));
    }

    #[test]
    fn shr_past_width_is_zero() {
        assert_eq!(Byte::new(0x80) >> 7i8, Byte::new(1));
        assert_eq!(Byte::new(0xff) >> 8u16, Byte::new(0));
        assert_eq!(Byte::new(0xff) >> u64::MAX, Byte::new(0));
    }

    #[test]
    #[should_panic(expected = "must not be negative")]
    fn negative_shift_panics() {
        let _ = Byte::new(1) << -1i32;
    }

    // ===================
    // Bitwise
    // ===================

    #[test]
    fn or() {
        let mut b = Byte::new(23);
        b |= Byte::new(42);
        assert_eq!(b, Byte::new(63));
        assert_eq!(Byte::new(23) | Byte::new(42), Byte::new(63));
    }

    #[test]
    fn and() {
        let mut b = Byte::new(23);
        b &= Byte::new(42);
        assert_eq!(b, Byte::new(2));
        assert_eq!(Byte::new(23) & Byte::new(42), Byte::new(2));
    }

    #[test]
    fn xor() {
        let mut b = Byte::new(23);
        b ^= Byte::new(42);
        assert_eq!(b, Byte::new(61));
        assert_eq!(Byte::new(23) ^ Byte::new(42), Byte::new(61));
    }

    #[test]
    fn not() {
        assert_eq!(!Byte::new(23), Byte::new(232));
    }

    // ===================
    // to_integer
    // ===================

    #[test]
    fn to_integer() {
        let b = Byte::new(23);
        assert_eq!(b.to_integer::<i32>(), 23);
        assert_eq!(b.to_integer::<u8>(), 23);
        assert_eq!(b.to_integer::<u128>(), 23);
        assert_eq!(b.to_integer::<isize>(), 23);
    }

    #[test]
    fn to_integer_narrowing() {
        assert_eq!(Byte::new(232).to_integer::<i8>(), -24);
        assert_eq!(Byte::new(232).to_integer::<i16>(), 232);
    }

    // ===================
    // Formatting
    // ===================

    #[test]
    fn formatting() {
        let b = Byte::new(0x2a);
        assert_eq!(format!("{b:?}"), "Byte(0x2a)");
        assert_eq!(format!("{b:x}"), "2a");
        assert_eq!(format!("{b:X}"), "2A");
        assert_eq!(format!("{b:08b}"), "00101010");
    }
}
