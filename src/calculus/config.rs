// ============================================================================
// Derivative Configuration
// Step size and stencil selection for repeated differentiation
// ============================================================================

use super::derivative::{derivative_with, validate_step};
use super::stencil::Stencil;
use crate::numeric::{FixedPoint, NumericResult, Storage};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settings for differentiating many functions or points with one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DerivativeConfig<R: Storage, const FRAC: u32> {
    /// Distance between neighbouring samples; must be strictly positive
    pub step: FixedPoint<R, FRAC>,

    /// Finite-difference stencil
    pub stencil: Stencil,
}

impl<R: Storage, const FRAC: u32> DerivativeConfig<R, FRAC> {
    /// Create a configuration using the default five-point stencil
    pub fn new(step: FixedPoint<R, FRAC>) -> Self {
        Self {
            step,
            stencil: Stencil::default(),
        }
    }

    /// Sixth-order configuration: seven-point stencil
    pub fn high_order(step: FixedPoint<R, FRAC>) -> Self {
        Self::new(step).with_stencil(Stencil::CentralSevenPoint)
    }

    /// Builder method: Set the stencil
    pub fn with_stencil(mut self, stencil: Stencil) -> Self {
        self.stencil = stencil;
        self
    }

    /// Builder method: Set the step
    pub fn with_step(mut self, step: FixedPoint<R, FRAC>) -> Self {
        self.step = step;
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    /// - `DivisionByZero` for a zero step
    /// - `InvalidArgument` for a negative step
    pub fn validate(&self) -> NumericResult<()> {
        validate_step(self.step)
    }

    /// Approximate `f'(x)` with this configuration.
    pub fn derivative<F>(&self, x: FixedPoint<R, FRAC>, f: F) -> NumericResult<FixedPoint<R, FRAC>>
    where
        F: FnMut(FixedPoint<R, FRAC>) -> NumericResult<FixedPoint<R, FRAC>>,
    {
        derivative_with(self.stencil, x, self.step, f)
    }
}
