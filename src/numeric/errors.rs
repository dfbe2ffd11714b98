// ============================================================================
// Numeric Errors
// Failure outcomes shared by fixed-point arithmetic, closeness checks and
// numerical differentiation
// ============================================================================

use std::fmt;

/// Errors that can occur during fixed-point arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Result does not fit the storage integer (either end of the range)
    Overflow,
    /// Attempted division by zero (including a zero derivative step)
    DivisionByZero,
    /// A precondition on an argument was violated
    InvalidArgument,
    /// Input text could not be parsed as a number
    InvalidInput,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Overflow => {
                write!(f, "arithmetic overflow: result outside the representable range")
            },
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::InvalidArgument => {
                write!(f, "invalid argument: precondition violated")
            },
            NumericError::InvalidInput => write!(f, "invalid input: could not parse value"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
