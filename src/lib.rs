// ============================================================================
// Fixed Calculus Library
// Deterministic fixed-point arithmetic and numerical differentiation
// ============================================================================

//! # Fixed Calculus
//!
//! Floating-point-free numerics for constrained or reproducibility-sensitive
//! targets.
//!
//! ## Features
//!
//! - **Generic fixed-point numbers** over `i8`/`i16`/`i32`/`i64` storage with a
//!   compile-time fractional split
//! - **Checked arithmetic everywhere**: overflow and division by zero are
//!   reported, never wrapped
//! - **Double-width intermediates** for multiplication and division, rounded
//!   half away from zero
//! - **Central finite-difference derivatives** (three-, five- and seven-point)
//!   computed entirely in fixed point
//! - **Closeness predicates** for validating results against a tolerance
//!
//! ## Example
//!
//! ```rust
//! use fixed_calculus::prelude::*;
//!
//! let a = I16F16::from_ratio(12, 10)?;
//! let b = I16F16::from_ratio(34, 10)?;
//! let c = I16F16::from_ratio(56, 10)?;
//!
//! // f(x) = a·x² + b·x + c, f'(0.5) = 4.6
//! let slope = derivative(
//!     I16F16::from_ratio(1, 2)?,
//!     I16F16::from_ratio(1, 4)?,
//!     |x| a.checked_mul(x)?.checked_add(b)?.checked_mul(x)?.checked_add(c),
//! )?;
//!
//! let control = I16F16::from_ratio(46, 10)?;
//! let tolerance = I16F16::from_ratio(1, 1_000)?;
//! assert!(is_close(slope, control, tolerance)?);
//! # Ok::<(), NumericError>(())
//! ```

pub mod calculus;
pub mod compare;
pub mod numeric;

// Re-exports for convenience
pub use calculus::{derivative, derivative_with, DerivativeConfig, Stencil};
pub use compare::{is_close, is_close_fraction, Closeness};
pub use numeric::{FixedPoint, NumericError, NumericResult, Storage, I16F16, I32F32, I4F4, I8F8};

pub mod prelude {
    pub use crate::calculus::{derivative, derivative_with, DerivativeConfig, Stencil};
    pub use crate::compare::{is_close, is_close_fraction, Closeness};
    pub use crate::numeric::{
        FixedPoint, NumericError, NumericResult, Storage, I16F16, I32F32, I4F4, I8F8,
    };
}
