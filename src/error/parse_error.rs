use thiserror::Error;

use crate::interpreter::lexer::Token;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur before evaluation starts: the
/// parenthesis check, lexing, parsing, and the whitelist pass.
pub enum ParseError {
    /// The number of `(` and `)` characters differs.
    #[error("Unmatched parentheses: found {opening} '(' and {closing} ')'.")]
    UnbalancedParentheses {
        /// Count of opening parentheses.
        opening: usize,
        /// Count of closing parentheses.
        closing: usize,
    },
    /// The input is not a valid expression.
    #[error("Invalid syntax near {text}.")]
    Syntax {
        /// The offending source text, or `end of input`.
        text: String,
    },
    /// The input parsed, but contains a construct outside the arithmetic
    /// whitelist.
    #[error("Invalid or unsupported expression: {construct}")]
    UnsupportedExpression {
        /// Description of the rejected construct.
        construct: String,
    },
    /// The expression nests deeper than the parser allows.
    #[error("Expression is too deeply nested (limit is {limit}).")]
    TooDeeplyNested {
        /// The nesting limit that was exceeded.
        limit: usize,
    },
}

impl ParseError {
    /// Builds a syntax error pointing at an unexpected token.
    #[must_use]
    pub fn unexpected(token: &Token) -> Self {
        Self::Syntax { text: format!("'{token}'") }
    }

    /// Builds a syntax error for input that stopped too early.
    #[must_use]
    pub fn end_of_input() -> Self {
        Self::Syntax { text: "end of input".to_string() }
    }

    /// Builds a whitelist rejection.
    pub fn unsupported(construct: impl Into<String>) -> Self {
        Self::UnsupportedExpression { construct: construct.into() }
    }
}
