use thiserror::Error;

/// Evaluation errors.
///
/// Contains all error types that can be raised while walking an expression
/// tree: division by zero, results without a finite real value, excessive
/// nesting, and operator/arity mismatches that indicate a whitelist bypass.
pub mod eval_error;
/// Parsing errors.
///
/// Defines all error types that can occur before evaluation: unbalanced
/// parentheses, lexing and grammar failures, constructs rejected by the
/// whitelist pass, and excessive nesting.
pub mod parse_error;

pub use eval_error::EvalError;
pub use parse_error::ParseError;

/// Any failure produced while turning one line of input into a number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    /// The line was rejected before evaluation.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The tree was rejected during evaluation.
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl CalcError {
    /// Returns `true` when the expression exceeded a nesting limit in either
    /// phase.
    #[must_use]
    pub const fn is_too_deeply_nested(&self) -> bool {
        matches!(self,
                 Self::Parse(ParseError::TooDeeplyNested { .. })
                 | Self::Eval(EvalError::TooDeeplyNested { .. }))
    }
}
