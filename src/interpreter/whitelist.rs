use log::debug;

use crate::{
    ast::{ExpressionNode, OperatorKind},
    error::ParseError,
    interpreter::parser::{MAX_NESTING_DEPTH, ParseResult},
    syntax::{InfixOperator, NumericLiteral, PrefixOperator, SyntaxNode},
};

/// Converts a general syntax tree into an arithmetic expression tree.
///
/// Every node is checked against a fixed whitelist before its children are
/// visited. Only these are admitted:
/// - integer and float literals with a finite value,
/// - unary `+` and `-`,
/// - binary `+`, `-`, `*`, `/`, `%` and `**`.
///
/// Everything else (names, calls, attribute access, subscripts, strings,
/// comparisons, boolean and bitwise operators, collections, complex
/// literals) is rejected with the construct's description. Nothing is
/// evaluated here.
///
/// # Errors
/// - `UnsupportedExpression` naming the first rejected construct.
/// - `TooDeeplyNested` past [`MAX_NESTING_DEPTH`].
///
/// # Example
/// ```
/// use safecalc::{
///     error::ParseError,
///     interpreter::{parser::parse_syntax, whitelist::whitelist},
/// };
///
/// let tree = whitelist(parse_syntax("1 + 2").unwrap()).unwrap();
/// assert_eq!(tree.to_string(), "1 + 2");
///
/// let rejected = whitelist(parse_syntax("open('x')").unwrap());
/// assert_eq!(rejected,
///            Err(ParseError::UnsupportedExpression { construct: "function call".into() }));
/// ```
pub fn whitelist(node: SyntaxNode) -> ParseResult<ExpressionNode> {
    admit(node, 0)
}

fn admit(node: SyntaxNode, depth: usize) -> ParseResult<ExpressionNode> {
    if depth >= MAX_NESTING_DEPTH {
        return Err(ParseError::TooDeeplyNested { limit: MAX_NESTING_DEPTH });
    }

    match node {
        SyntaxNode::Number(NumericLiteral::Integer(value) | NumericLiteral::Float(value)) => {
            if value.is_finite() {
                Ok(ExpressionNode::number(value))
            } else {
                Err(reject("numeric literal too large to represent".to_string()))
            }
        },
        SyntaxNode::Prefix { op, operand } => {
            let Some(operator) = unary_operator(op) else {
                return Err(reject(format!("unary operator '{op}'")));
            };
            Ok(ExpressionNode::UnaryOp { operator,
                                         operand: Box::new(admit(*operand, depth + 1)?) })
        },
        SyntaxNode::Infix { left, op, right } => {
            let Some(operator) = binary_operator(op) else {
                return Err(reject(format!("operator '{}'", op.symbol())));
            };
            let left = admit(*left, depth + 1)?;
            let right = admit(*right, depth + 1)?;
            Ok(ExpressionNode::BinaryOp { operator,
                                          left: Box::new(left),
                                          right: Box::new(right) })
        },
        other => Err(reject(other.describe())),
    }
}

fn reject(construct: String) -> ParseError {
    debug!("whitelist rejected {construct}");
    ParseError::UnsupportedExpression { construct }
}

/// Maps an admitted prefix operator to its evaluator operator.
#[must_use]
pub const fn unary_operator(op: PrefixOperator) -> Option<OperatorKind> {
    match op {
        PrefixOperator::Plus => Some(OperatorKind::Pos),
        PrefixOperator::Minus => Some(OperatorKind::Neg),
        PrefixOperator::Invert | PrefixOperator::Not => None,
    }
}

/// Maps an admitted infix operator to its evaluator operator.
#[must_use]
pub const fn binary_operator(op: InfixOperator) -> Option<OperatorKind> {
    match op {
        InfixOperator::Add => Some(OperatorKind::Add),
        InfixOperator::Sub => Some(OperatorKind::Sub),
        InfixOperator::Mul => Some(OperatorKind::Mul),
        InfixOperator::Div => Some(OperatorKind::Div),
        InfixOperator::Mod => Some(OperatorKind::Mod),
        InfixOperator::Pow => Some(OperatorKind::Pow),
        InfixOperator::FloorDiv
        | InfixOperator::MatMul
        | InfixOperator::BitAnd
        | InfixOperator::BitOr
        | InfixOperator::BitXor
        | InfixOperator::LeftShift
        | InfixOperator::RightShift => None,
    }
}
