use log::debug;

use crate::{
    ast::ExpressionNode,
    error::EvalError,
    interpreter::parser::MAX_NESTING_DEPTH,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// `EvalError` describing the failure.
pub type EvalResult<T> = Result<T, EvalError>;

/// Walks expression trees and computes their value.
///
/// The evaluator holds no state besides its recursion limit, so one value can
/// evaluate any number of trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluator {
    max_depth: usize,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(MAX_NESTING_DEPTH)
    }
}

impl Evaluator {
    /// Creates an evaluator that refuses trees nested deeper than
    /// `max_depth`.
    #[must_use]
    pub const fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// The nesting limit of this evaluator.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Evaluates an expression tree and returns its value.
    ///
    /// This is the main entry point for evaluation. Both operands of a binary
    /// node are evaluated, left first, before the operator is applied. Every
    /// successful result is finite.
    ///
    /// # Errors
    /// - `DivisionByZero` for `x / 0`, `x % 0` and `0 ^ -n`.
    /// - `Computation` when a result has no finite real value.
    /// - `TooDeeplyNested` when the tree is deeper than [`Self::max_depth`].
    /// - `Internal` when a node pairs an operator with the wrong number of
    ///   operands.
    ///
    /// # Example
    /// ```
    /// use safecalc::{
    ///     ast::{ExpressionNode, OperatorKind},
    ///     error::EvalError,
    ///     interpreter::evaluator::Evaluator,
    /// };
    ///
    /// let evaluator = Evaluator::new(1);
    /// let shallow = ExpressionNode::unary(OperatorKind::Neg, ExpressionNode::number(2.0));
    /// assert_eq!(evaluator.eval(&shallow), Ok(-2.0));
    ///
    /// let deep = ExpressionNode::unary(OperatorKind::Neg, shallow);
    /// assert_eq!(evaluator.eval(&deep), Err(EvalError::TooDeeplyNested { limit: 1 }));
    /// ```
    pub fn eval(&self, node: &ExpressionNode) -> EvalResult<f64> {
        self.eval_at(node, 0)
    }

    fn eval_at(&self, node: &ExpressionNode, depth: usize) -> EvalResult<f64> {
        if depth > self.max_depth {
            return Err(EvalError::TooDeeplyNested { limit: self.max_depth });
        }

        match node {
            ExpressionNode::NumberLiteral { value } => Self::eval_literal(*value),
            ExpressionNode::BinaryOp { operator,
                                       left,
                                       right, } => {
                if !operator.is_binary() {
                    return Err(EvalError::Internal { details: format!("'{operator}' is not a binary operator") });
                }
                let left = self.eval_at(left, depth + 1)?;
                let right = self.eval_at(right, depth + 1)?;
                Self::eval_binary(*operator, left, right)
            },
            ExpressionNode::UnaryOp { operator, operand } => {
                if !operator.is_unary() {
                    return Err(EvalError::Internal { details: format!("'{operator}' is not a unary operator") });
                }
                let value = self.eval_at(operand, depth + 1)?;
                Self::eval_unary(*operator, value)
            },
        }
    }

    fn eval_literal(value: f64) -> EvalResult<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvalError::computation(format!("Literal {value} is not a finite number")))
        }
    }
}

/// Evaluates `node` with the default nesting limit.
///
/// # Example
/// ```
/// use safecalc::interpreter::{evaluator::evaluate, parser::parse};
///
/// assert_eq!(evaluate(&parse("-3 + 4 * (2 - 1)").unwrap()), Ok(1.0));
/// assert_eq!(evaluate(&parse("2 * (3 + 4) ^ 2").unwrap()), Ok(98.0));
/// ```
pub fn evaluate(node: &ExpressionNode) -> EvalResult<f64> {
    let result = Evaluator::default().eval(node);
    match &result {
        Ok(value) => debug!("{node} evaluated to {value}"),
        Err(e) => debug!("{node} failed to evaluate: {e}"),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::OperatorKind;

    fn number(value: f64) -> ExpressionNode {
        ExpressionNode::number(value)
    }

    #[test]
    fn arity_mismatches_are_internal_errors() {
        let node = ExpressionNode::binary(OperatorKind::Neg, number(1.0), number(2.0));
        assert!(matches!(evaluate(&node), Err(EvalError::Internal { .. })));

        let node = ExpressionNode::unary(OperatorKind::Mul, number(1.0));
        assert!(matches!(evaluate(&node), Err(EvalError::Internal { .. })));
    }

    #[test]
    fn left_operand_fails_first() {
        let node = ExpressionNode::binary(OperatorKind::Add,
                                          ExpressionNode::binary(OperatorKind::Div,
                                                                 number(1.0),
                                                                 number(0.0)),
                                          number(f64::INFINITY));
        assert_eq!(evaluate(&node), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn non_finite_literals_are_refused() {
        assert!(matches!(evaluate(&number(f64::NAN)), Err(EvalError::Computation { .. })));
    }

    #[test]
    fn depth_limit_is_per_evaluator() {
        let mut node = number(1.0);
        for _ in 0..10 {
            node = ExpressionNode::unary(OperatorKind::Neg, node);
        }
        assert_eq!(Evaluator::new(10).eval(&node), Ok(1.0));
        assert_eq!(Evaluator::new(9).eval(&node),
                   Err(EvalError::TooDeeplyNested { limit: 9 }));
        assert_eq!(Evaluator::default().max_depth(), MAX_NESTING_DEPTH);
    }
}
