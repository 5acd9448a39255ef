/// Binary-level parsing.
///
/// Handles boolean operators, `not`, comparison chains, and the
/// precedence-climbing loop for bitwise and arithmetic infix operators.
pub mod binary;

/// Core parsing entry points.
///
/// Contains the public `parse` pipeline, the nesting guard, and the
/// lowest-precedence grammar levels: tuples, lambdas, and conditional
/// expressions.
pub mod core;

/// Unary, power, trailer and atom parsing.
///
/// Handles prefix operators, right-associative `**`, calls, subscripts,
/// attribute access, literals, names and bracketed displays.
pub mod unary;

/// Utility functions for the parser.
///
/// Provides comma-separated list parsing, token expectations, and the other
/// small helpers shared by the grammar levels.
pub mod utils;

pub use core::{MAX_NESTING_DEPTH, ParseResult, check_balanced, normalize, parse, parse_syntax};
