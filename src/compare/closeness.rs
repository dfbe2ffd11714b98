// ============================================================================
// Closeness Comparison
// Tolerance checks between fixed-point values, computed without floats
// ============================================================================

use crate::numeric::{FixedPoint, NumericError, NumericResult, Storage};

/// Returns `true` when `|a - b| <= tolerance`.
///
/// The boundary is inclusive. A difference too large for the representation
/// is larger than any representable tolerance and yields `false`.
///
/// # Errors
/// Returns `InvalidArgument` if `tolerance` is negative.
///
/// # Example
/// ```
/// use fixed_calculus::compare::is_close;
/// use fixed_calculus::numeric::I16F16;
///
/// let a = I16F16::from_ratio(46, 10)?;
/// let b = I16F16::from_ratio(4_601, 1_000)?;
/// let tol = I16F16::from_ratio(1, 1_000)?;
/// assert!(is_close(a, b, tol)?);
/// # Ok::<(), fixed_calculus::numeric::NumericError>(())
/// ```
pub fn is_close<R: Storage, const FRAC: u32>(
    a: FixedPoint<R, FRAC>,
    b: FixedPoint<R, FRAC>,
    tolerance: FixedPoint<R, FRAC>,
) -> NumericResult<bool> {
    Closeness::new(tolerance).map(|closeness| closeness.check(a, b))
}

/// Returns `true` when `|1 - a/b| < tolerance`.
///
/// Relative counterpart of [`is_close`]; the boundary is exclusive. A ratio
/// that overflows the representation yields `false`.
///
/// The ratio keeps its sign: `a` and `-a` are never close, unlike a check
/// on `|1 - |a/b||`.
///
/// # Errors
/// - `InvalidArgument` if `tolerance` is negative
/// - `DivisionByZero` if `b` is zero
pub fn is_close_fraction<R: Storage, const FRAC: u32>(
    a: FixedPoint<R, FRAC>,
    b: FixedPoint<R, FRAC>,
    tolerance: FixedPoint<R, FRAC>,
) -> NumericResult<bool> {
    if tolerance.is_negative() {
        return Err(NumericError::InvalidArgument);
    }

    let ratio = match a.checked_div(b) {
        Ok(ratio) => ratio,
        Err(NumericError::Overflow) => return Ok(false),
        Err(err) => return Err(err),
    };

    Ok(match distance(FixedPoint::one(), ratio) {
        Some(closeness) => closeness < tolerance,
        None => false,
    })
}

/// A validated, non-negative absolute tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Closeness<R: Storage, const FRAC: u32> {
    tolerance: FixedPoint<R, FRAC>,
}

impl<R: Storage, const FRAC: u32> Closeness<R, FRAC> {
    /// # Errors
    /// Returns `InvalidArgument` if `tolerance` is negative.
    pub fn new(tolerance: FixedPoint<R, FRAC>) -> NumericResult<Self> {
        if tolerance.is_negative() {
            return Err(NumericError::InvalidArgument);
        }
        Ok(Self { tolerance })
    }

    pub fn tolerance(&self) -> FixedPoint<R, FRAC> {
        self.tolerance
    }

    /// Check `|a - b| <= tolerance`.
    pub fn check(&self, a: FixedPoint<R, FRAC>, b: FixedPoint<R, FRAC>) -> bool {
        match distance(a, b) {
            Some(diff) => diff <= self.tolerance,
            None => false,
        }
    }
}

/// `|a - b|`, or `None` when it exceeds `MAX`.
fn distance<R: Storage, const FRAC: u32>(
    a: FixedPoint<R, FRAC>,
    b: FixedPoint<R, FRAC>,
) -> Option<FixedPoint<R, FRAC>> {
    a.checked_sub(b).and_then(FixedPoint::abs).ok()
}
