// ============================================================================
// Storage Integers
// Signed integer widths usable as fixed-point storage, each paired with a
// double-width intermediate for multiplication and division
// ============================================================================

use std::fmt;
use std::hash::Hash;
use std::ops::{Add, Div, Mul, Neg, Rem, Shl, Sub};

mod sealed {
    pub trait Sealed {}
}

/// A signed integer that can hold the raw value of a `FixedPoint`.
///
/// Implemented for `i8`, `i16`, `i32` and `i64`. Each storage type names a
/// `Wide` integer with twice its width; products of two storage values and
/// storage values shifted by the fractional bits always fit the wide type,
/// so intermediate results never wrap before the final narrowing.
///
/// The trait is sealed: the double-width guarantee is what keeps the
/// arithmetic in `FixedPoint` exact, and it is only checked for the
/// primitive pairs listed here.
pub trait Storage:
    sealed::Sealed
    + Copy
    + Ord
    + Hash
    + fmt::Debug
    + fmt::Display
    + Send
    + Sync
    + 'static
    + From<i8>
    + Into<i64>
    + Div<Output = Self>
    + Rem<Output = Self>
{
    /// Double-width intermediate type.
    type Wide: Copy
        + Ord
        + fmt::Debug
        + Add<Output = Self::Wide>
        + Sub<Output = Self::Wide>
        + Mul<Output = Self::Wide>
        + Div<Output = Self::Wide>
        + Rem<Output = Self::Wide>
        + Neg<Output = Self::Wide>
        + Shl<u32, Output = Self::Wide>;

    /// Width of the storage integer in bits.
    const BITS: u32;
    const ZERO: Self;
    const ONE: Self;
    const MIN: Self;
    const MAX: Self;

    /// Lossless conversion into the wide type.
    fn widen(self) -> Self::Wide;

    /// Narrow a wide value back to storage, `None` if it does not fit.
    fn narrow(wide: Self::Wide) -> Option<Self>;

    /// Narrow an `i64`, `None` if it does not fit.
    fn from_i64(value: i64) -> Option<Self>;

    /// `2^exp`. Callers guarantee `exp <= BITS - 2`.
    fn pow2(exp: u32) -> Self;

    fn checked_add(self, rhs: Self) -> Option<Self>;
    fn checked_sub(self, rhs: Self) -> Option<Self>;
    fn checked_mul(self, rhs: Self) -> Option<Self>;
    fn checked_neg(self) -> Option<Self>;
}

macro_rules! impl_storage {
    ($($t:ty => $wide:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl Storage for $t {
                type Wide = $wide;

                const BITS: u32 = <$t>::BITS;
                const ZERO: Self = 0;
                const ONE: Self = 1;
                const MIN: Self = <$t>::MIN;
                const MAX: Self = <$t>::MAX;

                #[inline]
                fn widen(self) -> $wide {
                    <$wide>::from(self)
                }

                #[inline]
                fn narrow(wide: $wide) -> Option<Self> {
                    <$t>::try_from(wide).ok()
                }

                #[inline]
                fn from_i64(value: i64) -> Option<Self> {
                    <$t>::try_from(value).ok()
                }

                #[inline]
                fn pow2(exp: u32) -> Self {
                    (1 as $t) << exp
                }

                #[inline]
                fn checked_add(self, rhs: Self) -> Option<Self> {
                    <$t>::checked_add(self, rhs)
                }

                #[inline]
                fn checked_sub(self, rhs: Self) -> Option<Self> {
                    <$t>::checked_sub(self, rhs)
                }

                #[inline]
                fn checked_mul(self, rhs: Self) -> Option<Self> {
                    <$t>::checked_mul(self, rhs)
                }

                #[inline]
                fn checked_neg(self) -> Option<Self> {
                    <$t>::checked_neg(self)
                }
            }
        )*
    };
}

impl_storage! {
    i8 => i16,
    i16 => i32,
    i32 => i64,
    i64 => i128,
}

/// Divide `numerator` by `denominator` in the wide type, rounding half away
/// from zero.
///
/// `denominator` must be non-zero and, like `numerator`, come from storage
/// values (widened, or shifted by at most `BITS - 2`), so `2 * remainder`
/// and the absolute values below cannot overflow the wide type.
#[inline]
pub(crate) fn div_round<R: Storage>(numerator: R::Wide, denominator: R::Wide) -> R::Wide {
    let zero = R::ZERO.widen();
    let one = R::ONE.widen();
    let abs = |v: R::Wide| if v < zero { -v } else { v };

    let quotient = numerator / denominator;
    let remainder = numerator % denominator;

    if abs(remainder + remainder) >= abs(denominator) {
        if (numerator < zero) == (denominator < zero) {
            quotient + one
        } else {
            quotient - one
        }
    } else {
        quotient
    }
}

/// `round(numerator × 2^shift / denominator)` narrowed to storage, rounding
/// half away from zero, or `None` if the quotient does not fit `R`.
///
/// The scaled numerator is never formed: the quotient is built one bit at a
/// time by restoring division, so only `2 * |denominator|` and
/// `2 * (R::MAX + 1)` have to fit the wide type. `denominator` must be
/// non-zero.
pub(crate) fn div_round_scaled<R: Storage>(
    numerator: R::Wide,
    shift: u32,
    denominator: R::Wide,
) -> Option<R> {
    let zero = R::ZERO.widen();
    let one = R::ONE.widen();
    let abs = |v: R::Wide| if v < zero { -v } else { v };

    let negative = (numerator < zero) != (denominator < zero);
    let divisor = abs(denominator);
    // Largest magnitude that can still narrow (|MIN|)
    let limit = R::MAX.widen() + one;

    let mut quotient = abs(numerator) / divisor;
    let mut remainder = abs(numerator) % divisor;
    if quotient > limit {
        return None;
    }

    for _ in 0..shift {
        quotient = quotient + quotient;
        remainder = remainder + remainder;
        if remainder >= divisor {
            remainder = remainder - divisor;
            quotient = quotient + one;
        }
        if quotient > limit {
            return None;
        }
    }

    if remainder + remainder >= divisor {
        quotient = quotient + one;
    }

    R::narrow(if negative { -quotient } else { quotient })
}
