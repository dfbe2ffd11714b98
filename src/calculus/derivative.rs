// ============================================================================
// Numerical Derivative
// Finite-difference differentiation carried out in fixed-point arithmetic
// ============================================================================

use super::stencil::Stencil;
use crate::numeric::{FixedPoint, NumericError, NumericResult, Storage};

/// Approximate `f'(x)` with the five-point central stencil
/// `(-f(x+2dx) + 8f(x+dx) - 8f(x-dx) + f(x-2dx)) / (12·dx)`.
///
/// `f` may be any closure or function mapping one fixed-point value to
/// another; its errors are returned unchanged.
///
/// # Errors
/// - `DivisionByZero` if `dx` is zero
/// - `InvalidArgument` if `dx` is negative
/// - `Overflow` if a sample point or the result leaves the representable
///   range
///
/// # Example
/// ```
/// use fixed_calculus::calculus::derivative;
/// use fixed_calculus::numeric::I16F16;
///
/// // f(x) = x², f'(3) = 6
/// let x = I16F16::from_integer(3)?;
/// let dx = I16F16::from_ratio(1, 8)?;
/// let slope = derivative(x, dx, |x| x.checked_mul(x))?;
/// assert_eq!(slope, I16F16::from_integer(6)?);
/// # Ok::<(), fixed_calculus::numeric::NumericError>(())
/// ```
pub fn derivative<R, const FRAC: u32, F>(
    x: FixedPoint<R, FRAC>,
    dx: FixedPoint<R, FRAC>,
    f: F,
) -> NumericResult<FixedPoint<R, FRAC>>
where
    R: Storage,
    F: FnMut(FixedPoint<R, FRAC>) -> NumericResult<FixedPoint<R, FRAC>>,
{
    derivative_with(Stencil::default(), x, dx, f)
}

/// Approximate `f'(x)` with the given stencil.
///
/// See [`derivative`] for the error conditions. No function evaluation
/// happens when `dx` is rejected.
pub fn derivative_with<R, const FRAC: u32, F>(
    stencil: Stencil,
    x: FixedPoint<R, FRAC>,
    dx: FixedPoint<R, FRAC>,
    f: F,
) -> NumericResult<FixedPoint<R, FRAC>>
where
    R: Storage,
    F: FnMut(FixedPoint<R, FRAC>) -> NumericResult<FixedPoint<R, FRAC>>,
{
    validate_step(dx)?;
    tracing::trace!(stencil = stencil.name(), %x, %dx, "evaluating derivative");

    evaluate(stencil, x, dx, f).inspect_err(|err| {
        tracing::debug!(stencil = stencil.name(), %x, %dx, %err, "derivative evaluation failed");
    })
}

/// Reject step sizes that cannot serve as a divisor.
pub(crate) fn validate_step<R: Storage, const FRAC: u32>(
    dx: FixedPoint<R, FRAC>,
) -> NumericResult<()> {
    if dx.is_zero() {
        tracing::debug!("rejecting zero derivative step");
        return Err(NumericError::DivisionByZero);
    }
    if dx.is_negative() {
        tracing::debug!(%dx, "rejecting negative derivative step");
        return Err(NumericError::InvalidArgument);
    }
    Ok(())
}

fn evaluate<R, const FRAC: u32, F>(
    stencil: Stencil,
    x: FixedPoint<R, FRAC>,
    dx: FixedPoint<R, FRAC>,
    mut f: F,
) -> NumericResult<FixedPoint<R, FRAC>>
where
    R: Storage,
    F: FnMut(FixedPoint<R, FRAC>) -> NumericResult<FixedPoint<R, FRAC>>,
{
    // Weighted differences and the divisor stay in the wide type; only the
    // quotient has to fit the storage type.
    let mut weighted_sum = R::ZERO.widen();

    for (k, &weight) in (1_i8..).zip(stencil.weights()) {
        let offset = dx.checked_mul_int(R::from(k))?;
        let forward = f(x.checked_add(offset)?)?;
        let backward = f(x.checked_sub(offset)?)?;
        let difference = forward.raw_value().widen() - backward.raw_value().widen();
        weighted_sum = weighted_sum + difference * R::from(weight).widen();
    }

    let divisor = dx.raw_value().widen() * R::from(stencil.denominator()).widen();
    FixedPoint::from_wide_ratio(weighted_sum, divisor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::is_close;
    use crate::numeric::{I16F16, I32F32, I4F4, I8F8};

    type Q = I16F16;

    fn q(num: i32, den: i32) -> Q {
        Q::from_ratio(num, den).unwrap()
    }

    /// a·x² + b·x + c in Horner form, using coefficients owned by the caller.
    fn quadratic<R: Storage, const FRAC: u32>(
        a: FixedPoint<R, FRAC>,
        b: FixedPoint<R, FRAC>,
        c: FixedPoint<R, FRAC>,
    ) -> impl Fn(FixedPoint<R, FRAC>) -> NumericResult<FixedPoint<R, FRAC>> {
        move |x| a.checked_mul(x)?.checked_add(b)?.checked_mul(x)?.checked_add(c)
    }

    fn cube(x: Q) -> NumericResult<Q> {
        x.checked_mul(x)?.checked_mul(x)
    }

    fn fifth_power(x: Q) -> NumericResult<Q> {
        let x2 = x.checked_mul(x)?;
        x2.checked_mul(x2)?.checked_mul(x)
    }

    #[test]
    fn test_quadratic_end_to_end() {
        let f = quadratic(q(12, 10), q(34, 10), q(56, 10));
        let result = derivative(q(1, 2), q(1, 4), f).unwrap();

        assert!(is_close(result, q(46, 10), q(1, 1_000)).unwrap());
        // Bit-exact regression value for the documented rounding rule
        assert_eq!(result.raw_value(), 301_464);
    }

    #[test]
    fn test_quadratic_all_stencils() {
        for stencil in [
            Stencil::CentralThreePoint,
            Stencil::CentralFivePoint,
            Stencil::CentralSevenPoint,
        ] {
            let f = quadratic(q(12, 10), q(34, 10), q(56, 10));
            let result = derivative_with(stencil, q(1, 2), q(1, 4), f).unwrap();
            assert!(
                is_close(result, q(46, 10), q(1, 1_000)).unwrap(),
                "{}: {}",
                stencil.name(),
                result
            );
        }
    }

    #[test]
    fn test_quadratic_wide_storage() {
        type W = I32F32;
        let c = |n: i64, d: i64| W::from_ratio(n, d).unwrap();
        let f = quadratic(c(12, 10), c(34, 10), c(56, 10));
        let result = derivative(c(1, 2), c(1, 4), f).unwrap();
        assert!(is_close(result, c(46, 10), c(1, 1_000_000)).unwrap());
    }

    #[test]
    fn test_linear_is_exact() {
        // f(x) = 3x - 2
        let three = Q::from_integer(3).unwrap();
        let two = Q::from_integer(2).unwrap();
        let result = derivative(q(-7, 3), q(1, 16), |x| three.checked_mul(x)?.checked_sub(two));
        assert_eq!(result.unwrap(), three);
    }

    #[test]
    fn test_stencil_order() {
        let x = Q::one();
        let dx = q(1, 4);

        // Cubic: five and seven points are exact, three points carry dx² error
        assert_eq!(derivative_with(Stencil::CentralThreePoint, x, dx, cube).unwrap(), q(49, 16));
        assert_eq!(derivative_with(Stencil::CentralFivePoint, x, dx, cube).unwrap(), q(3, 1));
        assert_eq!(derivative_with(Stencil::CentralSevenPoint, x, dx, cube).unwrap(), q(3, 1));

        // Quintic: only seven points are exact, five points miss by 4·dx⁴
        assert_eq!(
            derivative_with(Stencil::CentralFivePoint, x, dx, fifth_power).unwrap(),
            q(319, 64)
        );
        assert_eq!(
            derivative_with(Stencil::CentralSevenPoint, x, dx, fifth_power).unwrap(),
            q(5, 1)
        );
    }

    #[test]
    fn test_zero_step() {
        let mut calls = 0;
        let result = derivative(Q::one(), Q::ZERO, |x| {
            calls += 1;
            Ok(x)
        });
        assert_eq!(result, Err(NumericError::DivisionByZero));
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_negative_step() {
        let mut calls = 0;
        let result = derivative(Q::one(), q(-1, 4), |x| {
            calls += 1;
            Ok(x)
        });
        assert_eq!(result, Err(NumericError::InvalidArgument));
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_evaluation_count_and_points() {
        let mut points = Vec::new();
        let result = derivative(Q::one(), q(1, 2), |x| {
            points.push(x);
            Ok(x)
        });
        assert_eq!(result.unwrap(), Q::one());
        assert_eq!(points.len(), Stencil::CentralFivePoint.evaluations());

        points.sort();
        assert_eq!(points, vec![Q::ZERO, q(1, 2), q(3, 2), Q::from_integer(2).unwrap()]);
    }

    #[test]
    fn test_callable_error_propagates() {
        let limit = Q::from_integer(1).unwrap();
        let result = derivative(Q::one(), q(1, 4), |x| {
            if x > limit {
                Err(NumericError::InvalidInput)
            } else {
                Ok(x)
            }
        });
        assert_eq!(result, Err(NumericError::InvalidInput));
    }

    #[test]
    fn test_overflow_propagates() {
        // Sample point x + 2dx leaves the range
        let near_max = Q::from_integer(32_767).unwrap();
        assert_eq!(
            derivative(near_max, Q::one(), |x| Ok(x)),
            Err(NumericError::Overflow)
        );

        // Function values overflow inside the callable
        let big = Q::from_integer(1_000).unwrap();
        assert_eq!(
            derivative(big, Q::one(), |x| x.checked_mul(x)),
            Err(NumericError::Overflow)
        );

        // Slope of a step function is too steep for the storage type
        type N = I8F8;
        let step = |x: N| Ok(if x.is_positive() { N::MAX } else { N::MIN });
        assert_eq!(derivative(N::ZERO, N::one(), step), Err(NumericError::Overflow));
    }

    #[test]
    fn test_large_step_only_needs_result_in_range() {
        // 12·dx and 8·d1 exceed the I16F16 range, the slopes do not
        assert_eq!(
            derivative(Q::ZERO, Q::from_integer(4_000).unwrap(), |_| Ok(Q::ZERO)),
            Ok(Q::ZERO)
        );
        assert_eq!(
            derivative(Q::ZERO, Q::from_integer(3_000).unwrap(), |x| Ok(x)),
            Ok(Q::one())
        );
    }

    #[test]
    fn test_narrow_storage() {
        type T = I4F4;
        for stencil in [
            Stencil::CentralThreePoint,
            Stencil::CentralFivePoint,
            Stencil::CentralSevenPoint,
        ] {
            assert_eq!(
                derivative_with(stencil, T::ZERO, T::one(), |x| Ok(x)),
                Ok(T::one()),
                "{}",
                stencil.name()
            );
        }

        // f(x) = x², f'(2) = 4; 8·(f(4) - f(0)) alone is past the I8F8 range
        type N = I8F8;
        let two = N::from_integer(2).unwrap();
        assert_eq!(
            derivative(two, two, |x| x.checked_mul(x)),
            Ok(N::from_integer(4).unwrap())
        );
    }

    #[test]
    fn test_concurrent_invocations() {
        let results = crossbeam::thread::scope(|scope| {
            let handles: Vec<_> = (1..=8)
                .map(|i| {
                    scope.spawn(move |_| {
                        // f(x) = i·x², f'(1) = 2i
                        let coeff = Q::from_integer(i).unwrap();
                        let f = move |x: Q| coeff.checked_mul(x)?.checked_mul(x);
                        (i, derivative(Q::one(), q(1, 8), f).unwrap())
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .collect::<Vec<_>>()
        })
        .unwrap();

        for (i, slope) in results {
            assert_eq!(slope, Q::from_integer(2 * i).unwrap());
        }
    }
}
