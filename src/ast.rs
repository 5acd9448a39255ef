use std::fmt;

/// The complete set of operators the evaluator knows how to apply.
///
/// Binary nodes use `Add`, `Sub`, `Mul`, `Div`, `Mod` and `Pow`; unary nodes
/// use `Neg` and `Pos`. Nothing outside this set can be represented in an
/// [`ExpressionNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    /// Addition, `a + b`.
    Add,
    /// Subtraction, `a - b`.
    Sub,
    /// Multiplication, `a * b`.
    Mul,
    /// True division, `a / b`.
    Div,
    /// Remainder, `a % b`.
    Mod,
    /// Exponentiation, `a ^ b` or `a ** b`.
    Pow,
    /// Negation, `-a`.
    Neg,
    /// Unary plus, `+a`.
    Pos,
}

impl OperatorKind {
    /// Returns `true` for operators that take two operands.
    ///
    /// ## Example
    /// ```
    /// use safecalc::ast::OperatorKind;
    ///
    /// assert!(OperatorKind::Pow.is_binary());
    /// assert!(!OperatorKind::Neg.is_binary());
    /// ```
    #[must_use]
    pub const fn is_binary(self) -> bool {
        matches!(self, Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Mod | Self::Pow)
    }

    /// Returns `true` for operators that take a single operand.
    #[must_use]
    pub const fn is_unary(self) -> bool {
        matches!(self, Self::Neg | Self::Pos)
    }

    /// The operator as printed by the calculator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add | Self::Pos => "+",
            Self::Sub | Self::Neg => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "^",
        }
    }

    const fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div | Self::Mod => 2,
            Self::Neg | Self::Pos => 3,
            Self::Pow => 4,
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// An arithmetic expression tree that has passed the whitelist.
///
/// Each tree is built for one line of input, evaluated once and dropped.
/// Children are owned exclusively by their parent.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionNode {
    /// A numeric constant.
    NumberLiteral {
        /// The constant value.
        value: f64,
    },
    /// An operation with two operands.
    BinaryOp {
        /// The operator to apply.
        operator: OperatorKind,
        /// Left operand.
        left:     Box<Self>,
        /// Right operand.
        right:    Box<Self>,
    },
    /// An operation with one operand.
    UnaryOp {
        /// The operator to apply.
        operator: OperatorKind,
        /// The operand.
        operand:  Box<Self>,
    },
}

impl ExpressionNode {
    /// Creates a literal node.
    #[must_use]
    pub const fn number(value: f64) -> Self {
        Self::NumberLiteral { value }
    }

    /// Creates a binary node.
    ///
    /// ## Example
    /// ```
    /// use safecalc::ast::{ExpressionNode, OperatorKind};
    ///
    /// let sum = ExpressionNode::binary(OperatorKind::Add,
    ///                                  ExpressionNode::number(1.0),
    ///                                  ExpressionNode::number(2.0));
    /// assert_eq!(sum.to_string(), "1 + 2");
    /// ```
    #[must_use]
    pub fn binary(operator: OperatorKind, left: Self, right: Self) -> Self {
        Self::BinaryOp { operator,
                         left: Box::new(left),
                         right: Box::new(right) }
    }

    /// Creates a unary node.
    #[must_use]
    pub fn unary(operator: OperatorKind, operand: Self) -> Self {
        Self::UnaryOp { operator,
                        operand: Box::new(operand) }
    }

    /// Binding strength of the node when printed. Negative literals print
    /// with a leading minus and bind like a unary operation.
    fn precedence(&self) -> u8 {
        match self {
            Self::NumberLiteral { value } if value.is_sign_negative() => 3,
            Self::NumberLiteral { .. } => 5,
            Self::BinaryOp { operator, .. } | Self::UnaryOp { operator, .. } => {
                operator.precedence()
            },
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>,
                 node: &ExpressionNode,
                 need_parens: bool)
                 -> fmt::Result {
    if need_parens {
        write!(f, "({node})")
    } else {
        write!(f, "{node}")
    }
}

/// Prints the expression with `^` for powers and only the parentheses that
/// are needed to parse it back into the same tree.
impl fmt::Display for ExpressionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NumberLiteral { value } => write!(f, "{value}"),
            Self::UnaryOp { operator, operand } => {
                write!(f, "{operator}")?;
                write_operand(f, operand, operand.precedence() < 3)
            },
            Self::BinaryOp { operator: OperatorKind::Pow,
                             left,
                             right, } => {
                write_operand(f, left, left.precedence() <= 4)?;
                write!(f, " ^ ")?;
                write_operand(f, right, right.precedence() < 3)
            },
            Self::BinaryOp { operator,
                             left,
                             right, } => {
                let precedence = operator.precedence();
                write_operand(f, left, left.precedence() < precedence)?;
                write!(f, " {operator} ")?;
                write_operand(f, right, right.precedence() <= precedence)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ExpressionNode as E, OperatorKind::*};

    #[test]
    fn prints_minimal_parentheses() {
        let expr = E::binary(Mul,
                             E::number(2.0),
                             E::binary(Pow,
                                       E::binary(Add, E::number(3.0), E::number(4.0)),
                                       E::number(2.0)));
        assert_eq!(expr.to_string(), "2 * (3 + 4) ^ 2");
    }

    #[test]
    fn power_is_printed_right_associative() {
        let right = E::binary(Pow, E::number(2.0), E::binary(Pow, E::number(3.0), E::number(2.0)));
        let left = E::binary(Pow, E::binary(Pow, E::number(2.0), E::number(3.0)), E::number(2.0));
        assert_eq!(right.to_string(), "2 ^ 3 ^ 2");
        assert_eq!(left.to_string(), "(2 ^ 3) ^ 2");
    }

    #[test]
    fn unary_operands() {
        assert_eq!(E::unary(Neg, E::binary(Pow, E::number(2.0), E::number(2.0))).to_string(),
                   "-2 ^ 2");
        assert_eq!(E::binary(Pow, E::unary(Neg, E::number(2.0)), E::number(2.0)).to_string(),
                   "(-2) ^ 2");
        assert_eq!(E::binary(Pow, E::number(2.0), E::unary(Neg, E::number(1.0))).to_string(),
                   "2 ^ -1");
        assert_eq!(E::unary(Neg, E::binary(Sub, E::number(1.0), E::number(2.0))).to_string(),
                   "-(1 - 2)");
    }

    #[test]
    fn left_associative_chains() {
        let chain = E::binary(Sub, E::binary(Sub, E::number(8.0), E::number(3.0)), E::number(1.0));
        let grouped = E::binary(Sub, E::number(8.0), E::binary(Sub, E::number(3.0), E::number(1.0)));
        assert_eq!(chain.to_string(), "8 - 3 - 1");
        assert_eq!(grouped.to_string(), "8 - (3 - 1)");
    }

    #[test]
    fn fractional_literals() {
        assert_eq!(E::binary(Div, E::number(0.5), E::number(0.25)).to_string(), "0.5 / 0.25");
    }
}
