use crate::{
    ast::OperatorKind,
    error::EvalError,
    interpreter::evaluator::core::{EvalResult, Evaluator},
    util::num::is_integral,
};

impl Evaluator {
    /// Applies a binary operator to two evaluated operands.
    ///
    /// Division and remainder by zero (either sign) fail with
    /// `DivisionByZero`. The remainder is the truncated remainder, so it has
    /// the sign of the dividend. A non-finite result is reported as a
    /// computation error.
    ///
    /// # Parameters
    /// - `op`: The arithmetic operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Example
    /// ```
    /// use safecalc::{ast::OperatorKind, error::EvalError, interpreter::evaluator::Evaluator};
    ///
    /// assert_eq!(Evaluator::eval_binary(OperatorKind::Div, 7.0, 2.0), Ok(3.5));
    /// assert_eq!(Evaluator::eval_binary(OperatorKind::Mod, -7.0, 3.0), Ok(-1.0));
    /// assert_eq!(Evaluator::eval_binary(OperatorKind::Div, 1.0, 0.0),
    ///            Err(EvalError::DivisionByZero));
    /// ```
    pub fn eval_binary(op: OperatorKind, left: f64, right: f64) -> EvalResult<f64> {
        use OperatorKind::{Add, Div, Mod, Mul, Neg, Pos, Pow, Sub};

        let result = match op {
            Add => left + right,
            Sub => left - right,
            Mul => left * right,
            Div | Mod => {
                if right == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                if op == Div { left / right } else { left % right }
            },
            Pow => return Self::eval_pow(left, right),
            Neg | Pos => {
                return Err(EvalError::Internal { details: format!("unary operator '{op}' applied to two operands") });
            },
        };
        finite(result)
    }

    /// Evaluates an exponentiation.
    ///
    /// Fractional and negative exponents are allowed. Raising zero to a
    /// negative power is a division by zero. A negative base with a
    /// fractional exponent has no real result and is rejected instead of
    /// being promoted to a complex number.
    ///
    /// # Example
    /// ```
    /// use safecalc::{error::EvalError, interpreter::evaluator::Evaluator};
    ///
    /// assert_eq!(Evaluator::eval_pow(2.0, -1.0), Ok(0.5));
    /// assert_eq!(Evaluator::eval_pow(-8.0, 3.0), Ok(-512.0));
    /// assert_eq!(Evaluator::eval_pow(0.0, -1.0), Err(EvalError::DivisionByZero));
    /// assert!(matches!(Evaluator::eval_pow(-8.0, 0.5), Err(EvalError::Computation { .. })));
    /// ```
    pub fn eval_pow(base: f64, exponent: f64) -> EvalResult<f64> {
        if base == 0.0 && exponent < 0.0 {
            return Err(EvalError::DivisionByZero);
        }
        if base < 0.0 && !is_integral(exponent) {
            return Err(EvalError::computation(format!("{base} cannot be raised to the fractional power {exponent}: the result is not a real number")));
        }
        finite(base.powf(exponent))
    }
}

fn finite(value: f64) -> EvalResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::computation("Numerical result out of range"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remainder_by_negative_zero() {
        assert_eq!(Evaluator::eval_binary(OperatorKind::Mod, 1.0, -0.0),
                   Err(EvalError::DivisionByZero));
    }

    #[test]
    fn overflow_is_a_computation_error() {
        assert_eq!(Evaluator::eval_binary(OperatorKind::Mul, 1e308, 10.0),
                   Err(EvalError::computation("Numerical result out of range")));
        assert_eq!(Evaluator::eval_pow(10.0, 400.0),
                   Err(EvalError::computation("Numerical result out of range")));
    }

    #[test]
    fn unary_operators_are_internal_errors_here() {
        assert!(matches!(Evaluator::eval_binary(OperatorKind::Neg, 1.0, 2.0),
                         Err(EvalError::Internal { .. })));
    }

    #[test]
    fn fractional_powers_of_positive_bases() {
        assert_eq!(Evaluator::eval_pow(9.0, 0.5), Ok(3.0));
        assert_eq!(Evaluator::eval_pow(0.0, 0.0), Ok(1.0));
    }
}
