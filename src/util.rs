/// Numeric literal and value helpers.
///
/// This module decodes the integer and floating-point literal forms accepted
/// by the lexer (digit separators, radix prefixes, bare exponents) and
/// provides the integrality check used by exponentiation.
pub mod num;
