// ============================================================================
// Fixed-Point Number
// Binary fixed-point arithmetic with compile-time storage width and split
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::storage::{div_round, div_round_scaled, Storage};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fixed-point number with compile-time storage width and precision.
///
/// Internally stores `value × 2^FRAC` in the storage integer `R`.
///
/// # Type Parameters
/// - `R`: Signed storage integer (`i8`, `i16`, `i32`, `i64`).
/// - `FRAC`: Number of fractional bits. Must satisfy `FRAC <= R::BITS - 2`,
///   which keeps `1.0` representable; this is checked at compile time.
///
/// # Value Range
/// With `I16F16` (`i32` storage, 16 fractional bits):
/// - Minimum: -32768.0
/// - Maximum: +32767.9999847412109375
/// - Precision: 2^-16 (~0.0000153)
///
/// # Rounding
/// Every operation that discards bits (ratio construction, multiplication,
/// division, decimal conversion) rounds half away from zero.
///
/// # Overflow
/// All arithmetic is checked and returns [`NumericError::Overflow`] when the
/// result leaves the storage range. Nothing wraps.
///
/// # Example
/// ```
/// use fixed_calculus::numeric::I16F16;
///
/// let a = I16F16::from_ratio(12, 10)?;   // ~1.2
/// let x = I16F16::from_ratio(1, 2)?;     // 0.5
/// let y = a.checked_mul(x)?;             // ~0.6
/// assert_eq!(y.integer_part(), 0);
/// # Ok::<(), fixed_calculus::numeric::NumericError>(())
/// ```
///
/// A split without room for the sign and integer bit is rejected when the
/// type is used:
/// ```compile_fail
/// use fixed_calculus::numeric::FixedPoint;
///
/// let _ = FixedPoint::<i8, 16>::from_ratio(1, 2);
/// ```
#[derive(Clone, Copy)]
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct FixedPoint<R: Storage, const FRAC: u32>(R);

impl<R: Storage, const FRAC: u32> FixedPoint<R, FRAC> {
    const VALID_SPLIT: () = assert!(
        FRAC + 2 <= R::BITS,
        "fractional bits must leave room for the sign bit and one integer bit"
    );

    /// Zero value
    pub const ZERO: Self = Self::from_raw(R::ZERO);

    /// Maximum representable value
    pub const MAX: Self = Self::from_raw(R::MAX);

    /// Minimum representable value
    pub const MIN: Self = Self::from_raw(R::MIN);

    /// Smallest positive value (one unit in the last place)
    pub const EPSILON: Self = Self::from_raw(R::ONE);

    /// Number of fractional bits
    pub const FRACTIONAL_BITS: u32 = FRAC;

    // ========================================================================
    // Construction
    // ========================================================================

    /// One (1.0)
    #[inline]
    pub fn one() -> Self {
        let () = Self::VALID_SPLIT;
        Self(R::pow2(FRAC))
    }

    /// Scale factor `2^FRAC` in the wide intermediate type.
    #[inline]
    fn scale() -> R::Wide {
        Self::one().0.widen()
    }

    /// Create from raw internal representation.
    #[inline]
    pub const fn from_raw(raw: R) -> Self {
        let () = Self::VALID_SPLIT;
        Self(raw)
    }

    /// Create from an integer value.
    ///
    /// # Errors
    /// Returns `Overflow` if the value is too large to represent.
    #[inline]
    pub fn from_integer(value: R) -> NumericResult<Self> {
        value
            .checked_mul(Self::one().0)
            .map(Self)
            .ok_or(NumericError::Overflow)
    }

    /// Create the value nearest to `numerator / denominator`.
    ///
    /// Computes `round(numerator × 2^FRAC / denominator)` in the wide type.
    ///
    /// # Errors
    /// - `DivisionByZero` if `denominator` is zero
    /// - `Overflow` if the quotient does not fit the storage type
    ///
    /// # Example
    /// ```
    /// use fixed_calculus::numeric::I16F16;
    ///
    /// let quarter = I16F16::from_ratio(1, 4)?;
    /// assert_eq!(quarter.raw_value(), 16_384);
    /// # Ok::<(), fixed_calculus::numeric::NumericError>(())
    /// ```
    pub fn from_ratio(numerator: R, denominator: R) -> NumericResult<Self> {
        if denominator == R::ZERO {
            return Err(NumericError::DivisionByZero);
        }
        let scaled = numerator.widen() << FRAC;
        Self::narrow(div_round::<R>(scaled, denominator.widen()))
    }

    /// The value nearest to `numerator / denominator` for two quantities held
    /// at raw scale in the wide type.
    ///
    /// Only the quotient has to fit the storage type. The operands may exceed
    /// it as long as twice the denominator fits the wide type.
    pub(crate) fn from_wide_ratio(numerator: R::Wide, denominator: R::Wide) -> NumericResult<Self> {
        let () = Self::VALID_SPLIT;
        if denominator == R::ZERO.widen() {
            return Err(NumericError::DivisionByZero);
        }
        div_round_scaled::<R>(numerator, FRAC, denominator)
            .map(Self)
            .ok_or(NumericError::Overflow)
    }

    #[inline]
    fn narrow(wide: R::Wide) -> NumericResult<Self> {
        let () = Self::VALID_SPLIT;
        R::narrow(wide).map(Self).ok_or(NumericError::Overflow)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get the raw internal value (`value × 2^FRAC`).
    #[inline]
    pub fn raw_value(self) -> R {
        self.0
    }

    /// Get the integer part (truncated toward zero).
    #[inline]
    pub fn integer_part(self) -> R {
        self.0 / Self::one().0
    }

    /// Round to the nearest integer, halves away from zero.
    ///
    /// # Errors
    /// Returns `Overflow` if the rounded value does not fit `R`.
    #[inline]
    pub fn round_to_integer(self) -> NumericResult<R> {
        R::narrow(div_round::<R>(self.0.widen(), Self::scale())).ok_or(NumericError::Overflow)
    }

    /// Get the fractional bits as a positive raw count of `2^-FRAC` units.
    #[inline]
    pub fn fractional_part(self) -> u64 {
        let frac: i64 = (self.0 % Self::one().0).into();
        frac.unsigned_abs()
    }

    /// Check if value is zero.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == R::ZERO
    }

    /// Check if value is positive.
    #[inline]
    pub fn is_positive(self) -> bool {
        self.0 > R::ZERO
    }

    /// Check if value is negative.
    #[inline]
    pub fn is_negative(self) -> bool {
        self.0 < R::ZERO
    }

    /// Get absolute value.
    ///
    /// # Errors
    /// Returns `Overflow` for `MIN`, whose magnitude has no positive counterpart.
    #[inline]
    pub fn abs(self) -> NumericResult<Self> {
        if self.is_negative() {
            self.checked_neg()
        } else {
            Ok(self)
        }
    }

    /// Checked negation.
    #[inline]
    pub fn checked_neg(self) -> NumericResult<Self> {
        self.0.checked_neg().map(Self).ok_or(NumericError::Overflow)
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Checked addition.
    ///
    /// # Errors
    /// Returns `Overflow` if the result is out of range.
    #[inline]
    pub fn checked_add(self, rhs: Self) -> NumericResult<Self> {
        self.0.checked_add(rhs.0).map(Self).ok_or(NumericError::Overflow)
    }

    /// Checked subtraction.
    ///
    /// # Errors
    /// Returns `Overflow` if the result is out of range.
    #[inline]
    pub fn checked_sub(self, rhs: Self) -> NumericResult<Self> {
        self.0.checked_sub(rhs.0).map(Self).ok_or(NumericError::Overflow)
    }

    /// Checked multiplication.
    ///
    /// The raw product is formed in the wide type, divided by `2^FRAC` with
    /// half-away-from-zero rounding, then narrowed.
    ///
    /// # Errors
    /// Returns `Overflow` if the result is out of range.
    #[inline]
    pub fn checked_mul(self, rhs: Self) -> NumericResult<Self> {
        let product = self.0.widen() * rhs.0.widen();
        Self::narrow(div_round::<R>(product, Self::scale()))
    }

    /// Checked division.
    ///
    /// The dividend is shifted left by `FRAC` in the wide type before the
    /// rounding division, so no precision is lost ahead of the quotient.
    ///
    /// # Errors
    /// - `DivisionByZero` if `rhs` is zero
    /// - `Overflow` if the result is out of range
    #[inline]
    pub fn checked_div(self, rhs: Self) -> NumericResult<Self> {
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        let dividend = self.0.widen() << FRAC;
        Self::narrow(div_round::<R>(dividend, rhs.0.widen()))
    }

    /// Multiply by an integer (no scaling needed).
    ///
    /// More efficient than `checked_mul` when multiplying by a whole number.
    #[inline]
    pub fn checked_mul_int(self, rhs: R) -> NumericResult<Self> {
        self.0
            .checked_mul(rhs)
            .map(Self)
            .ok_or(NumericError::Overflow)
    }

    /// Divide by an integer, rounding half away from zero.
    ///
    /// # Errors
    /// - `DivisionByZero` if `rhs` is zero
    /// - `Overflow` for `MIN / -1`
    #[inline]
    pub fn checked_div_int(self, rhs: R) -> NumericResult<Self> {
        if rhs == R::ZERO {
            return Err(NumericError::DivisionByZero);
        }
        Self::narrow(div_round::<R>(self.0.widen(), rhs.widen()))
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl<R: Storage, const FRAC: u32> Default for FixedPoint<R, FRAC> {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl<R: Storage, const FRAC: u32> PartialEq for FixedPoint<R, FRAC> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<R: Storage, const FRAC: u32> Eq for FixedPoint<R, FRAC> {}

impl<R: Storage, const FRAC: u32> PartialOrd for FixedPoint<R, FRAC> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<R: Storage, const FRAC: u32> Ord for FixedPoint<R, FRAC> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<R: Storage, const FRAC: u32> Hash for FixedPoint<R, FRAC> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl<R: Storage, const FRAC: u32> fmt::Debug for FixedPoint<R, FRAC> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FixedPoint<{}, {}>({}, raw={})",
            std::any::type_name::<R>(),
            FRAC,
            self,
            self.0
        )
    }
}

impl<R: Storage, const FRAC: u32> fmt::Display for FixedPoint<R, FRAC> {
    /// Prints the decimal expansion of the value; `{:.N}` limits the digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_decimal(), f)
    }
}

// ============================================================================
// Conversion from rust_decimal (for API boundaries)
// ============================================================================

impl<R: Storage, const FRAC: u32> FixedPoint<R, FRAC> {
    /// Convert from rust_decimal::Decimal.
    ///
    /// The decimal value is scaled by `2^FRAC` and rounded half away from
    /// zero to the nearest representable raw value.
    ///
    /// # Errors
    /// Returns `Overflow` if the value is too large to represent.
    pub fn from_decimal(d: Decimal) -> NumericResult<Self> {
        let scale: i64 = Self::one().0.into();
        let scaled = d.checked_mul(Decimal::from(scale)).ok_or(NumericError::Overflow)?;
        let raw = scaled
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .ok_or(NumericError::Overflow)?;
        R::from_i64(raw).map(Self).ok_or(NumericError::Overflow)
    }

    /// Convert to rust_decimal::Decimal.
    ///
    /// Exact while `raw × 5^FRAC` fits the 96-bit decimal mantissa (every
    /// `I16F16` value); wider types are rounded to 28 significant digits.
    pub fn to_decimal(self) -> Decimal {
        let raw: i64 = self.0.into();
        let scale: i64 = Self::one().0.into();
        (Decimal::from(raw) / Decimal::from(scale)).normalize()
    }
}

// ============================================================================
// String Parsing
// ============================================================================

impl<R: Storage, const FRAC: u32> FromStr for FixedPoint<R, FRAC> {
    type Err = NumericError;

    /// Parse from a decimal string, rounding to the nearest raw value.
    ///
    /// # Examples
    /// - "4.6" -> raw 301466 for `I16F16`
    /// - "-0.5" -> raw -32768 for `I16F16`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let d = Decimal::from_str(s.trim()).map_err(|_| NumericError::InvalidInput)?;
        Self::from_decimal(d)
    }
}

// ============================================================================
// Type Aliases for Common Use Cases
// ============================================================================

/// 8-bit storage, 4 fractional bits
pub type I4F4 = FixedPoint<i8, 4>;

/// 16-bit storage, 8 fractional bits
pub type I8F8 = FixedPoint<i16, 8>;

/// 32-bit storage split in half, range ±32768 with 2^-16 precision
pub type I16F16 = FixedPoint<i32, 16>;

/// 64-bit storage split in half
pub type I32F32 = FixedPoint<i64, 32>;

// ============================================================================
// Tests
// ============================================================================
