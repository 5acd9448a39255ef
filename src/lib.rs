//! # safecalc
//!
//! safecalc is an interactive calculator for arithmetic expressions written
//! in Rust. Input is parsed with a general expression grammar, reduced to a
//! small arithmetic tree by a whitelist pass, and evaluated without ever
//! executing anything the user typed.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::thread;

use crate::{
    error::{CalcError, EvalError},
    interpreter::{evaluator::evaluate, parser::parse},
};

/// Defines the arithmetic expression tree.
///
/// This module declares `ExpressionNode` and `OperatorKind`, the only shapes
/// the evaluator accepts, together with the printer that renders a tree back
/// into infix source text.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// Every failure that can happen while turning a line into a number is one
/// variant of `ParseError` or `EvalError`; `CalcError` wraps both.
pub mod error;
/// Lexer, parser, whitelist pass and evaluator.
///
/// # Responsibilities
/// - Tokenizes and parses input into a general `SyntaxNode` tree.
/// - Reduces that tree to an `ExpressionNode` or rejects it.
/// - Computes the value of an `ExpressionNode`.
pub mod interpreter;
/// The read-evaluate-print loop.
///
/// Generic over its input and output so it can be driven by a terminal or by
/// tests.
pub mod repl;
/// The general expression grammar produced by the first parsing phase.
pub mod syntax;
/// Numeric literal helpers shared by the parser and evaluator.
pub mod util;

/// Stack reserved for each [`calculate`] call.
///
/// The parser spends about a dozen frames on every parenthesis level, so an
/// expression just inside [`interpreter::parser::MAX_NESTING_DEPTH`] needs
/// more stack than a default spawned thread has.
pub const CALCULATION_STACK_SIZE: usize = 64 * 1024 * 1024;

/// Parses and evaluates one expression.
///
/// The accepted language is real-number arithmetic with `+`, `-`, `*`, `/`,
/// `%`, `^` (or `**`), unary signs and parentheses. Anything else is
/// rejected before evaluation.
///
/// The work runs on a scoped thread with [`CALCULATION_STACK_SIZE`] bytes of
/// stack, so nesting up to the limit is safe from any calling thread.
///
/// # Examples
/// ```
/// use safecalc::{
///     calculate,
///     error::{CalcError, EvalError, ParseError},
/// };
///
/// assert_eq!(calculate("2^3 + 1"), Ok(9.0));
/// assert_eq!(calculate("7 / 2"), Ok(3.5));
/// assert_eq!(calculate("1 / 0"), Err(CalcError::Eval(EvalError::DivisionByZero)));
/// assert!(matches!(calculate("__import__('os')"),
///                  Err(CalcError::Parse(ParseError::UnsupportedExpression { .. }))));
/// ```
pub fn calculate(source: &str) -> Result<f64, CalcError> {
    thread::scope(|scope| -> Result<f64, CalcError> {
        let worker = thread::Builder::new().name("calculate".to_string())
                                           .stack_size(CALCULATION_STACK_SIZE)
                                           .spawn_scoped(scope, || calculate_on_current_stack(source))
                                           .map_err(|e| EvalError::Internal { details: format!("could not start calculation: {e}") })?;
        worker.join()
              .unwrap_or_else(|_| Err(EvalError::Internal { details: "calculation panicked".to_string() }.into()))
    })
}

fn calculate_on_current_stack(source: &str) -> Result<f64, CalcError> {
    let tree = parse(source)?;
    Ok(evaluate(&tree)?)
}
