use std::iter::Peekable;

use crate::{
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, descend},
            unary::parse_factor,
        },
    },
    syntax::{BooleanOperator, ComparisonOperator, InfixOperator, PrefixOperator, SyntaxNode},
};

/// Parses `or` chains.
///
/// Operands of a chain are collected into a single
/// [`SyntaxNode::Boolean`] node.
///
/// Grammar: `disjunction := conjunction ("or" conjunction)*`
pub fn parse_disjunction<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<SyntaxNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut operands = vec![parse_conjunction(tokens, depth)?];
    while let Some((Token::Or, _)) = tokens.peek() {
        tokens.next();
        operands.push(parse_conjunction(tokens, depth)?);
    }
    Ok(collect_boolean(BooleanOperator::Or, operands))
}

/// Parses `and` chains.
///
/// Grammar: `conjunction := inversion ("and" inversion)*`
pub fn parse_conjunction<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<SyntaxNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut operands = vec![parse_inversion(tokens, depth)?];
    while let Some((Token::And, _)) = tokens.peek() {
        tokens.next();
        operands.push(parse_inversion(tokens, depth)?);
    }
    Ok(collect_boolean(BooleanOperator::And, operands))
}

fn collect_boolean(op: BooleanOperator, mut operands: Vec<SyntaxNode>) -> SyntaxNode {
    if operands.len() == 1 {
        operands.remove(0)
    } else {
        SyntaxNode::Boolean { op, operands }
    }
}

/// Parses logical negation.
///
/// `not` binds looser than comparisons, so `not a < b` is `not (a < b)`.
///
/// Grammar: `inversion := "not" inversion | comparison`
pub fn parse_inversion<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<SyntaxNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Not, _)) = tokens.peek() {
        tokens.next();
        let operand = parse_inversion(tokens, descend(depth)?)?;
        return Ok(SyntaxNode::Prefix { op:      PrefixOperator::Not,
                                       operand: Box::new(operand), });
    }
    parse_comparison(tokens, depth)
}

/// Parses relational, equality, membership and identity operators.
///
/// Comparisons chain: `a < b <= c` produces one
/// [`SyntaxNode::Comparison`] with two operator/operand pairs.
///
/// Grammar: `comparison := bitwise_or (comparison_op bitwise_or)*`
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<SyntaxNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let left = parse_binary(tokens, 1, depth)?;

    let mut comparisons = Vec::new();
    while let Some(op) = take_comparison_operator(tokens) {
        comparisons.push((op, parse_binary(tokens, 1, depth)?));
    }

    if comparisons.is_empty() {
        Ok(left)
    } else {
        Ok(SyntaxNode::Comparison { left: Box::new(left),
                                    comparisons })
    }
}

/// Consumes the next comparison operator, if there is one.
///
/// `not in` and `is not` span two tokens; a lone `not` is left in place.
fn take_comparison_operator<'a, I>(tokens: &mut Peekable<I>) -> Option<ComparisonOperator>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let op = match tokens.peek()? {
        (Token::EqualEqual, _) => ComparisonOperator::Equal,
        (Token::BangEqual, _) => ComparisonOperator::NotEqual,
        (Token::Less, _) => ComparisonOperator::Less,
        (Token::LessEqual, _) => ComparisonOperator::LessEqual,
        (Token::Greater, _) => ComparisonOperator::Greater,
        (Token::GreaterEqual, _) => ComparisonOperator::GreaterEqual,
        (Token::In, _) => ComparisonOperator::In,
        (Token::Is, _) => {
            tokens.next();
            if let Some((Token::Not, _)) = tokens.peek() {
                tokens.next();
                return Some(ComparisonOperator::IsNot);
            }
            return Some(ComparisonOperator::Is);
        },
        (Token::Not, _) => {
            let mut lookahead = tokens.clone();
            lookahead.next();
            if !matches!(lookahead.peek(), Some((Token::In, _))) {
                return None;
            }
            tokens.next();
            ComparisonOperator::NotIn
        },
        _ => return None,
    };
    tokens.next();
    Some(op)
}

/// Parses bitwise and arithmetic infix operators by precedence climbing.
///
/// Every operator handled here is left-associative. An operator is only
/// consumed if it binds at least as tightly as `min_precedence`; its right
/// operand is parsed one level tighter. The precedence table lives in
/// [`InfixOperator::precedence`]:
///
/// ```text
///     |  <  ^  <  &  <  << >>  <  + -  <  * @ / // %
/// ```
///
/// Each operator folded into the left operand deepens the tree by one level,
/// so long chains count against the nesting limit just like parentheses.
pub fn parse_binary<'a, I>(tokens: &mut Peekable<I>,
                           min_precedence: u8,
                           depth: usize)
                           -> ParseResult<SyntaxNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_factor(tokens, depth)?;
    let mut depth = depth;

    while let Some((token, _)) = tokens.peek()
          && let Some(op) = token_to_infix_operator(token)
          && op.precedence() >= min_precedence
    {
        tokens.next();
        depth = descend(depth)?;
        let right = parse_binary(tokens, op.precedence() + 1, depth)?;
        left = SyntaxNode::Infix { left: Box::new(left),
                                   op,
                                   right: Box::new(right) };
    }
    Ok(left)
}

/// Maps a token to the infix operator it denotes.
///
/// `**` is not listed: it is right-associative, binds tighter than unary
/// minus on its left, and is parsed by [`crate::interpreter::parser::unary`].
///
/// # Example
/// ```
/// use safecalc::{
///     interpreter::{lexer::Token, parser::binary::token_to_infix_operator},
///     syntax::InfixOperator,
/// };
///
/// assert_eq!(token_to_infix_operator(&Token::DoubleSlash),
///            Some(InfixOperator::FloorDiv));
/// assert_eq!(token_to_infix_operator(&Token::DoubleStar), None);
/// ```
#[must_use]
pub const fn token_to_infix_operator(token: &Token) -> Option<InfixOperator> {
    match token {
        Token::Plus => Some(InfixOperator::Add),
        Token::Minus => Some(InfixOperator::Sub),
        Token::Star => Some(InfixOperator::Mul),
        Token::Slash => Some(InfixOperator::Div),
        Token::DoubleSlash => Some(InfixOperator::FloorDiv),
        Token::Percent => Some(InfixOperator::Mod),
        Token::At => Some(InfixOperator::MatMul),
        Token::Ampersand => Some(InfixOperator::BitAnd),
        Token::Pipe => Some(InfixOperator::BitOr),
        Token::Caret => Some(InfixOperator::BitXor),
        Token::LeftShift => Some(InfixOperator::LeftShift),
        Token::RightShift => Some(InfixOperator::RightShift),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        interpreter::parser::parse_syntax,
        syntax::{
            BooleanOperator, ComparisonOperator, InfixOperator, NumericLiteral, PrefixOperator,
            SyntaxNode,
        },
    };

    fn infix(left: SyntaxNode, op: InfixOperator, right: SyntaxNode) -> SyntaxNode {
        SyntaxNode::Infix { left: Box::new(left),
                            op,
                            right: Box::new(right) }
    }

    fn number(value: f64) -> SyntaxNode {
        SyntaxNode::Number(NumericLiteral::Integer(value))
    }

    fn name(name: &str) -> SyntaxNode {
        SyntaxNode::Name(name.to_string())
    }

    #[test]
    fn multiplicative_binds_tighter_than_additive() {
        assert_eq!(parse_syntax("1 + 2 * 3").unwrap(),
                   infix(number(1.0),
                         InfixOperator::Add,
                         infix(number(2.0), InfixOperator::Mul, number(3.0))));
    }

    #[test]
    fn same_level_is_left_associative() {
        assert_eq!(parse_syntax("8 - 3 - 1").unwrap(),
                   infix(infix(number(8.0), InfixOperator::Sub, number(3.0)),
                         InfixOperator::Sub,
                         number(1.0)));
        assert_eq!(parse_syntax("7 // 2 % 3").unwrap(),
                   infix(infix(number(7.0), InfixOperator::FloorDiv, number(2.0)),
                         InfixOperator::Mod,
                         number(3.0)));
    }

    #[test]
    fn bitwise_levels() {
        assert_eq!(parse_syntax("1 | 2 & 3 << 4").unwrap(),
                   infix(number(1.0),
                         InfixOperator::BitOr,
                         infix(number(2.0),
                               InfixOperator::BitAnd,
                               infix(number(3.0), InfixOperator::LeftShift, number(4.0)))));
    }

    #[test]
    fn comparisons_chain() {
        assert_eq!(parse_syntax("a < b <= c").unwrap(),
                   SyntaxNode::Comparison { left:        Box::new(name("a")),
                                            comparisons: vec![(ComparisonOperator::Less,
                                                               name("b")),
                                                              (ComparisonOperator::LessEqual,
                                                               name("c"))], });
    }

    #[test]
    fn two_token_comparisons() {
        let SyntaxNode::Comparison { comparisons, .. } = parse_syntax("a not in b is not c").unwrap()
        else {
            panic!("expected a comparison");
        };
        let ops: Vec<_> = comparisons.iter().map(|(op, _)| *op).collect();
        assert_eq!(ops, vec![ComparisonOperator::NotIn, ComparisonOperator::IsNot]);
    }

    #[test]
    fn boolean_chains_are_flattened() {
        assert_eq!(parse_syntax("a or b or not c").unwrap(),
                   SyntaxNode::Boolean { op:       BooleanOperator::Or,
                                         operands: vec![name("a"),
                                                        name("b"),
                                                        SyntaxNode::Prefix { op:      PrefixOperator::Not,
                                                                             operand: Box::new(name("c")), }], });
    }
}
