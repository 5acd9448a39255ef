use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, descend, parse_expression},
            utils::{parse_brace_display, parse_comma_separated, parse_subscript},
        },
    },
    syntax::{InfixOperator, KeywordConstant, NumericLiteral, PrefixOperator, SyntaxNode},
    util::num::{parse_float_literal, parse_integer_literal},
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `+`  (unary plus)
/// - `-`  (numeric negation)
/// - `~`  (bitwise inversion)
///
/// Prefix operators are right-associative, so `-~x` is `-(~x)`. They bind
/// looser than `**`, so `-2 ** 2` is `-(2 ** 2)`.
///
/// Grammar:
/// ```text
///     factor := ("+" | "-" | "~") factor
///             | power
/// ```
pub fn parse_factor<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<SyntaxNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let op = match tokens.peek() {
        Some((Token::Plus, _)) => PrefixOperator::Plus,
        Some((Token::Minus, _)) => PrefixOperator::Minus,
        Some((Token::Tilde, _)) => PrefixOperator::Invert,
        _ => return parse_power(tokens, depth),
    };
    tokens.next();

    let operand = parse_factor(tokens, descend(depth)?)?;
    Ok(SyntaxNode::Prefix { op,
                            operand: Box::new(operand) })
}

/// Parses exponentiation.
///
/// `**` is right-associative because its right operand is a full `factor`,
/// which may itself contain `**`: `a ** b ** c` parses as `a ** (b ** c)`,
/// and `2 ** -1` is accepted.
///
/// Grammar: `power := primary ["**" factor]`
pub fn parse_power<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<SyntaxNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let base = parse_primary(tokens, depth)?;

    if let Some((Token::DoubleStar, _)) = tokens.peek() {
        tokens.next();
        let exponent = parse_factor(tokens, descend(depth)?)?;
        return Ok(SyntaxNode::Infix { left:  Box::new(base),
                                      op:    InfixOperator::Pow,
                                      right: Box::new(exponent), });
    }
    Ok(base)
}

/// Parses an atom followed by any number of trailers.
///
/// Trailers are:
/// 1. **Calls** `f(a, b)`
/// 2. **Subscripts and slices** `x[i]`, `x[a:b:c]`, `x[i, j]`
/// 3. **Attribute access** `x.name`
///
/// Grammar:
/// ```text
///     primary := atom trailer*
///     trailer := "(" [arguments] ")" | "[" subscript "]" | "." IDENT
/// ```
pub fn parse_primary<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<SyntaxNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut node = parse_atom(tokens, depth)?;
    let mut depth = depth;

    loop {
        match tokens.peek() {
            Some((Token::LParen, _)) => {
                tokens.next();
                depth = descend(depth)?;
                let (arguments, _) =
                    parse_comma_separated(tokens, depth, parse_expression, &Token::RParen)?;
                node = SyntaxNode::Call { function: Box::new(node),
                                          arguments };
            },
            Some((Token::LBracket, _)) => {
                tokens.next();
                depth = descend(depth)?;
                let index = parse_subscript(tokens, depth)?;
                node = SyntaxNode::Subscript { value: Box::new(node),
                                               index: Box::new(index), };
            },
            Some((Token::Dot, _)) => {
                tokens.next();
                depth = descend(depth)?;
                let name = match tokens.next() {
                    Some((Token::Identifier(name), _)) => name.clone(),
                    Some((token, _)) => return Err(ParseError::unexpected(token)),
                    None => return Err(ParseError::end_of_input()),
                };
                node = SyntaxNode::Attribute { value: Box::new(node),
                                               name };
            },
            _ => break,
        }
    }
    Ok(node)
}

/// Parses an atomic expression.
///
/// Atoms are:
/// - numeric literals in every supported form
/// - string and bytes literals, with adjacent literals concatenated
/// - names and the keyword constants `True`, `False`, `None`
/// - parenthesized expressions and tuples
/// - list, set and dict displays
///
/// Grammar (simplified):
/// ```text
///     atom := NUMBER | STRING+ | IDENT
///           | "(" [expression ("," expression)* [","]] ")"
///           | "[" [expression ("," expression)* [","]] "]"
///           | "{" ... "}"
/// ```
pub fn parse_atom<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<SyntaxNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (token, _) = tokens.next().ok_or_else(ParseError::end_of_input)?;

    match token {
        Token::Integer(text) => {
            let value = parse_integer_literal(text).ok_or_else(|| ParseError::unexpected(token))?;
            Ok(SyntaxNode::Number(NumericLiteral::Integer(value)))
        },
        Token::Float(text) => {
            let value = parse_float_literal(text).ok_or_else(|| ParseError::unexpected(token))?;
            Ok(SyntaxNode::Number(NumericLiteral::Float(value)))
        },
        Token::Imaginary(text) => Ok(SyntaxNode::Number(NumericLiteral::Imaginary(text.clone()))),
        Token::Str(text) => Ok(parse_string(tokens, text)),
        Token::Identifier(name) => Ok(match name.as_str() {
                                          "True" => SyntaxNode::Constant(KeywordConstant::True),
                                          "False" => SyntaxNode::Constant(KeywordConstant::False),
                                          "None" => SyntaxNode::Constant(KeywordConstant::None),
                                          _ => SyntaxNode::Name(name.clone()),
                                      }),
        Token::LParen => parse_grouping(tokens, depth),
        Token::LBracket => {
            let (elements, _) =
                parse_comma_separated(tokens, depth, parse_expression, &Token::RBracket)?;
            Ok(SyntaxNode::List(elements))
        },
        Token::LBrace => parse_brace_display(tokens, depth),
        other => Err(ParseError::unexpected(other)),
    }
}

/// Parses the rest of a parenthesized form after `(`.
///
/// `()` is the empty tuple, `(x)` is just `x`, and `(x,)` or `(x, y)` are
/// tuples.
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<SyntaxNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (mut elements, saw_comma) =
        parse_comma_separated(tokens, depth, parse_expression, &Token::RParen)?;

    if elements.len() == 1 && !saw_comma {
        Ok(elements.remove(0))
    } else {
        Ok(SyntaxNode::Tuple(elements))
    }
}

/// Joins adjacent string literals (`'a' 'b'`) into one node.
fn parse_string<'a, I>(tokens: &mut Peekable<I>, first: &str) -> SyntaxNode
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let bytes = first.chars()
                     .take_while(|c| c.is_ascii_alphabetic())
                     .any(|c| c.eq_ignore_ascii_case(&'b'));
    let mut text = first.to_string();

    while let Some((Token::Str(next), _)) = tokens.peek() {
        text.push(' ');
        text.push_str(next);
        tokens.next();
    }
    SyntaxNode::Str { text, bytes }
}
