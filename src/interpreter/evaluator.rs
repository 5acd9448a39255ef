/// Binary operator evaluation logic.
///
/// Applies addition, subtraction, multiplication, true division, remainder
/// and exponentiation, with zero-divisor and real-result checks.
pub mod binary;

/// Core evaluation logic.
///
/// Contains the `Evaluator`, its depth limit, and the recursive walk over
/// expression trees.
pub mod core;

/// Unary operator evaluation logic.
///
/// Implements negation and unary plus.
pub mod unary;

pub use core::{EvalResult, Evaluator, evaluate};
