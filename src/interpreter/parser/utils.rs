use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, parse_expression},
    },
    syntax::SyntaxNode,
};

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by tuples, list displays, set and dict displays,
/// call arguments and subscripts. It repeatedly calls `parse_item` to parse
/// one element, expecting either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list, and a
/// trailing comma before the closing token is allowed.
///
/// Grammar (simplified): `list := [item ("," item)* [","]]`
///
/// # Parameters
/// - `tokens`: Token iterator positioned after the opening token.
/// - `depth`: Current nesting depth, handed to `parse_item`.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list (e.g., `]` or `)`).
///
/// # Returns
/// The parsed items, and whether any comma was seen. The flag tells `(x)`
/// apart from `(x,)`.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - an unexpected token is encountered,
/// - the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    depth: usize,
    parse_item: impl Fn(&mut Peekable<I>, usize) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<(Vec<T>, bool)>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut items = Vec::new();
    let mut saw_comma = false;

    loop {
        match tokens.peek() {
            Some((tok, _)) if tok == closing => {
                tokens.next();
                return Ok((items, saw_comma));
            },
            None => return Err(ParseError::end_of_input()),
            _ => {},
        }

        items.push(parse_item(tokens, depth)?);

        match tokens.next() {
            Some((Token::Comma, _)) => saw_comma = true,
            Some((tok, _)) if tok == closing => return Ok((items, saw_comma)),
            Some((tok, _)) => return Err(ParseError::unexpected(tok)),
            None => return Err(ParseError::end_of_input()),
        }
    }
}

/// Consumes the next token, failing unless it equals `expected`.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                   expected: &Token)
                                                   -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((token, _)) if token == expected => Ok(()),
        Some((token, _)) => Err(ParseError::unexpected(token)),
        None => Err(ParseError::end_of_input()),
    }
}

/// Returns `true` if `token` can be the first token of an expression.
///
/// # Example
/// ```
/// use safecalc::interpreter::{lexer::Token, parser::utils::can_start_expression};
///
/// assert!(can_start_expression(&Token::Minus));
/// assert!(!can_start_expression(&Token::RParen));
/// ```
#[must_use]
pub const fn can_start_expression(token: &Token) -> bool {
    matches!(token,
             Token::Integer(_)
             | Token::Float(_)
             | Token::Imaginary(_)
             | Token::Str(_)
             | Token::Identifier(_)
             | Token::LParen
             | Token::LBracket
             | Token::LBrace
             | Token::Plus
             | Token::Minus
             | Token::Tilde
             | Token::Not
             | Token::Lambda)
}

/// Parses the inside of a subscript after `[`, including the closing `]`.
///
/// A single index is returned as-is; several comma-separated indices form a
/// tuple. `x[]` is a syntax error.
///
/// Grammar: `subscript := item ("," item)* [","] "]"`
pub(in crate::interpreter::parser) fn parse_subscript<'a, I>(tokens: &mut Peekable<I>,
                                                            depth: usize)
                                                            -> ParseResult<SyntaxNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (mut items, saw_comma) =
        parse_comma_separated(tokens, depth, parse_subscript_item, &Token::RBracket)?;

    match items.len() {
        0 => Err(ParseError::unexpected(&Token::RBracket)),
        1 if !saw_comma => Ok(items.remove(0)),
        _ => Ok(SyntaxNode::Tuple(items)),
    }
}

/// Parses one subscript item: an expression or a slice.
///
/// Grammar: `item := expression | [expression] ":" [expression] [":" [expression]]`
fn parse_subscript_item<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<SyntaxNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let lower = parse_optional_expression(tokens, depth)?;

    if !matches!(tokens.peek(), Some((Token::Colon, _))) {
        return match (lower, tokens.peek()) {
            (Some(node), _) => Ok(*node),
            (None, Some((token, _))) => Err(ParseError::unexpected(token)),
            (None, None) => Err(ParseError::end_of_input()),
        };
    }
    tokens.next();

    let upper = parse_optional_expression(tokens, depth)?;
    let step = if let Some((Token::Colon, _)) = tokens.peek() {
        tokens.next();
        parse_optional_expression(tokens, depth)?
    } else {
        None
    };

    Ok(SyntaxNode::Slice { lower, upper, step })
}

fn parse_optional_expression<'a, I>(tokens: &mut Peekable<I>,
                                    depth: usize)
                                    -> ParseResult<Option<Box<SyntaxNode>>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if tokens.peek().is_some_and(|(token, _)| can_start_expression(token)) {
        Ok(Some(Box::new(parse_expression(tokens, depth)?)))
    } else {
        Ok(None)
    }
}

/// Parses a set or dict display after `{`, including the closing `}`.
///
/// `{}` is an empty dict. The first element decides the kind: if it is
/// followed by `:` the display is a dict, otherwise a set.
///
/// Grammar:
/// ```text
///     brace_display := "}"
///                    | expression ("," expression)* [","] "}"
///                    | expression ":" expression ("," expression ":" expression)* [","] "}"
/// ```
pub(in crate::interpreter::parser) fn parse_brace_display<'a, I>(tokens: &mut Peekable<I>,
                                                                depth: usize)
                                                                -> ParseResult<SyntaxNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::RBrace, _)) = tokens.peek() {
        tokens.next();
        return Ok(SyntaxNode::Dict(Vec::new()));
    }

    let first = parse_expression(tokens, depth)?;

    if let Some((Token::Colon, _)) = tokens.peek() {
        tokens.next();
        let value = parse_expression(tokens, depth)?;
        let mut entries = vec![(first, value)];
        if finish_or_continue(tokens)? {
            let (rest, _) =
                parse_comma_separated(tokens, depth, parse_dict_entry, &Token::RBrace)?;
            entries.extend(rest);
        }
        return Ok(SyntaxNode::Dict(entries));
    }

    let mut elements = vec![first];
    if finish_or_continue(tokens)? {
        let (rest, _) = parse_comma_separated(tokens, depth, parse_expression, &Token::RBrace)?;
        elements.extend(rest);
    }
    Ok(SyntaxNode::Set(elements))
}

/// After the first display element: consumes `}` and returns `false`, or
/// consumes `,` and returns `true`.
fn finish_or_continue<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<bool>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::RBrace, _)) => Ok(false),
        Some((Token::Comma, _)) => Ok(true),
        Some((token, _)) => Err(ParseError::unexpected(token)),
        None => Err(ParseError::end_of_input()),
    }
}

fn parse_dict_entry<'a, I>(tokens: &mut Peekable<I>,
                           depth: usize)
                           -> ParseResult<(SyntaxNode, SyntaxNode)>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let key = parse_expression(tokens, depth)?;
    expect(tokens, &Token::Colon)?;
    let value = parse_expression(tokens, depth)?;
    Ok((key, value))
}

#[cfg(test)]
mod tests {
    use crate::{
        error::ParseError,
        interpreter::parser::parse_syntax,
        syntax::{NumericLiteral, SyntaxNode},
    };

    fn number(value: f64) -> SyntaxNode {
        SyntaxNode::Number(NumericLiteral::Integer(value))
    }

    #[test]
    fn displays() {
        assert_eq!(parse_syntax("[1, 2,]").unwrap(),
                   SyntaxNode::List(vec![number(1.0), number(2.0)]));
        assert_eq!(parse_syntax("{1, 2}").unwrap(),
                   SyntaxNode::Set(vec![number(1.0), number(2.0)]));
        assert_eq!(parse_syntax("{1: 2}").unwrap(),
                   SyntaxNode::Dict(vec![(number(1.0), number(2.0))]));
        assert_eq!(parse_syntax("{}").unwrap(), SyntaxNode::Dict(vec![]));
    }

    #[test]
    fn slices() {
        let SyntaxNode::Subscript { index, .. } = parse_syntax("x[::2]").unwrap() else {
            panic!("expected a subscript");
        };
        assert_eq!(*index,
                   SyntaxNode::Slice { lower: None,
                                       upper: None,
                                       step:  Some(Box::new(number(2.0))), });
    }

    #[test]
    fn malformed_lists() {
        assert_eq!(parse_syntax("[1,,2]"),
                   Err(ParseError::Syntax { text: "','".to_string() }));
        assert_eq!(parse_syntax("x[]"),
                   Err(ParseError::Syntax { text: "']'".to_string() }));
        assert_eq!(parse_syntax("[1, 2"), Err(ParseError::end_of_input()));
    }
}
