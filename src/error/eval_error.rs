use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while evaluating an expression tree.
pub enum EvalError {
    /// Division, remainder or a negative power of zero.
    #[error("Division by zero.")]
    DivisionByZero,
    /// The operation has no finite real-number result.
    #[error("{details}")]
    Computation {
        /// Details about the failed computation.
        details: String,
    },
    /// The tree nests deeper than the evaluator allows.
    #[error("Expression is too deeply nested (limit is {limit}).")]
    TooDeeplyNested {
        /// The nesting limit that was exceeded.
        limit: usize,
    },
    /// A node that the whitelist pass should have rejected reached the
    /// evaluator.
    #[error("Internal error: {details}")]
    Internal {
        /// Details about the malformed node.
        details: String,
    },
}

impl EvalError {
    /// Builds a computation error from a message.
    pub fn computation(details: impl Into<String>) -> Self {
        Self::Computation { details: details.into() }
    }
}
