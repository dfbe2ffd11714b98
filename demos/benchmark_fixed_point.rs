// ============================================================================
// Fixed-Point Benchmark Example
// Derivative of a quadratic validated against its analytic value
// ============================================================================

use fixed_calculus::prelude::*;

type Fixed = I16F16;

fn main() -> Result<(), NumericError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    println!("=== Fixed-Point Derivative Example ===\n");

    // Coefficients owned by the caller and captured by the closure
    let a = Fixed::from_integer(12)?.checked_div_int(10)?;
    let b = Fixed::from_integer(34)?.checked_div_int(10)?;
    let c = Fixed::from_integer(56)?.checked_div_int(10)?;
    println!("f(x) = {a}·x² + {b}·x + {c}\n");

    let x = Fixed::one().checked_div_int(2)?;
    let dx = Fixed::one().checked_div_int(4)?;

    let control = Fixed::from_integer(46)?.checked_div_int(10)?;
    let tolerance = Fixed::one().checked_div_int(1_000)?;

    for stencil in [
        Stencil::CentralThreePoint,
        Stencil::CentralFivePoint,
        Stencil::CentralSevenPoint,
    ] {
        let result = derivative_with(stencil, x, dx, |x| {
            a.checked_mul(x)?.checked_add(b)?.checked_mul(x)?.checked_add(c)
        })?;
        let ok = is_close(result, control, tolerance)?;
        println!(
            "{:<10} order {}  f'({x}) = {result:?}  close to {control:.4}: {ok}",
            stencil.name(),
            stencil.order()
        );
    }

    // Failures are reported, not wrapped
    println!("\nzero step:  {:?}", derivative(x, Fixed::ZERO, Ok));
    println!("overflow:   {:?}", Fixed::MAX.checked_add(Fixed::EPSILON));

    Ok(())
}
