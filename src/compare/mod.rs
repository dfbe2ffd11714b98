// ============================================================================
// Compare Module
// Closeness predicates used to validate fixed-point results
// ============================================================================

mod closeness;

pub use closeness::{is_close, is_close_fraction, Closeness};
