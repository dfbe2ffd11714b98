// ============================================================================
// Calculus Module
// Numerical differentiation on top of fixed-point arithmetic
// ============================================================================
//
// This module provides:
// - derivative / derivative_with: Central finite-difference derivative
// - Stencil: Three-, five- and seven-point coefficient tables
// - DerivativeConfig: Reusable step + stencil settings
//
// The routines are pure and allocation-free. No adaptive step refinement is
// performed: accuracy is fixed by the caller's step and the stencil order.

mod config;
mod derivative;
mod stencil;

pub use config::DerivativeConfig;
pub use derivative::{derivative, derivative_with};
pub use stencil::Stencil;
