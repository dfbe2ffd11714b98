// ============================================================================
// Numeric Module
// Deterministic fixed-point arithmetic without floating-point instructions
// ============================================================================
//
// This module provides:
// - FixedPoint<R, FRAC>: Binary fixed-point number over a storage integer
// - Storage: Sealed trait pairing each storage integer with a wide type
// - NumericError: Error types for arithmetic operations
// - I4F4/I8F8/I16F16/I32F32 type aliases for common splits
//
// Design principles:
// - No floating-point operations
// - All arithmetic returns Result (no panics, no silent wraparound)
// - Multiply/divide go through a double-width intermediate
// - Compile-time storage width and precision via generics

mod errors;
mod fixed_point;
mod storage;

pub use errors::{NumericError, NumericResult};
pub use fixed_point::{FixedPoint, I16F16, I32F32, I4F4, I8F8};
pub use storage::Storage;
