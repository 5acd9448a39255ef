use crate::{
    ast::OperatorKind,
    error::EvalError,
    interpreter::evaluator::core::{EvalResult, Evaluator},
};

impl Evaluator {
    /// Applies a unary operator to an evaluated operand.
    ///
    /// Supported operators:
    /// - `Neg`: numeric negation.
    /// - `Pos`: identity.
    ///
    /// Any binary operator in a unary node is an internal error: the parser
    /// never builds such a node.
    ///
    /// # Example
    /// ```
    /// use safecalc::{ast::OperatorKind, interpreter::evaluator::Evaluator};
    ///
    /// assert_eq!(Evaluator::eval_unary(OperatorKind::Neg, 5.0), Ok(-5.0));
    /// assert_eq!(Evaluator::eval_unary(OperatorKind::Pos, 5.0), Ok(5.0));
    /// ```
    pub fn eval_unary(op: OperatorKind, value: f64) -> EvalResult<f64> {
        match op {
            OperatorKind::Neg => Ok(-value),
            OperatorKind::Pos => Ok(value),
            OperatorKind::Add
            | OperatorKind::Sub
            | OperatorKind::Mul
            | OperatorKind::Div
            | OperatorKind::Mod
            | OperatorKind::Pow => {
                Err(EvalError::Internal { details: format!("binary operator '{op}' applied to one operand") })
            },
        }
    }
}
