use std::iter::Peekable;

use log::debug;

use crate::{
    ast::ExpressionNode,
    error::ParseError,
    interpreter::{
        lexer::{Token, tokenize},
        parser::{
            binary::parse_disjunction,
            utils::{can_start_expression, expect},
        },
        whitelist::whitelist,
    },
    syntax::SyntaxNode,
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Deepest nesting accepted by the parser, the whitelist pass and the
/// default evaluator.
pub const MAX_NESTING_DEPTH: usize = 512;

/// Parses one line of input into a whitelisted expression tree.
///
/// The pipeline is:
/// 1. reject input whose `(` and `)` counts differ,
/// 2. rewrite every `^` to `**`,
/// 3. parse the general expression grammar into a [`SyntaxNode`],
/// 4. run the whitelist pass, which admits only arithmetic.
///
/// # Errors
/// - `UnbalancedParentheses` before any parsing happens.
/// - `Syntax` for lexing or grammar failures.
/// - `UnsupportedExpression` for anything that is not plain arithmetic.
/// - `TooDeeplyNested` past [`MAX_NESTING_DEPTH`].
///
/// # Example
/// ```
/// use safecalc::{error::ParseError, interpreter::parser::parse};
///
/// assert_eq!(parse("2^3+1").unwrap(), parse("2**3+1").unwrap());
/// assert!(matches!(parse("(1+2"), Err(ParseError::UnbalancedParentheses { .. })));
/// assert!(matches!(parse("__import__('os')"),
///                  Err(ParseError::UnsupportedExpression { .. })));
/// ```
pub fn parse(text: &str) -> ParseResult<ExpressionNode> {
    check_balanced(text)?;
    let syntax = parse_syntax(&normalize(text))?;
    let tree = whitelist(syntax)?;
    debug!("parsed {text:?} as {tree}");
    Ok(tree)
}

/// Fails unless `text` contains as many `(` as `)`.
///
/// Only the counts are compared; ordering problems such as `)(` are left to
/// the grammar.
pub fn check_balanced(text: &str) -> ParseResult<()> {
    let opening = text.matches('(').count();
    let closing = text.matches(')').count();
    if opening == closing {
        Ok(())
    } else {
        Err(ParseError::UnbalancedParentheses { opening, closing })
    }
}

/// Rewrites the calculator's `^` power operator to the grammar's `**`.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.replace('^', "**")
}

/// Parses `source` with the general expression grammar, without applying
/// the whitelist.
///
/// The returned tree may contain names, calls, comparisons and every other
/// construct the grammar knows about. It must go through
/// [`whitelist`] before it can be evaluated.
///
/// # Example
/// ```
/// use safecalc::{interpreter::parser::parse_syntax, syntax::SyntaxNode};
///
/// let tree = parse_syntax("len(x)").unwrap();
/// assert!(matches!(tree, SyntaxNode::Call { .. }));
/// ```
pub fn parse_syntax(source: &str) -> ParseResult<SyntaxNode> {
    let tokens = tokenize(source)?;
    let mut iter = tokens.iter().peekable();

    let node = parse_expression_list(&mut iter, 0)?;

    if let Some((token, _)) = iter.next() {
        return Err(ParseError::unexpected(token));
    }
    Ok(node)
}

/// Steps one level deeper into the tree, failing past [`MAX_NESTING_DEPTH`].
pub(in crate::interpreter::parser) fn descend(depth: usize) -> ParseResult<usize> {
    if depth >= MAX_NESTING_DEPTH {
        Err(ParseError::TooDeeplyNested { limit: MAX_NESTING_DEPTH })
    } else {
        Ok(depth + 1)
    }
}

/// Parses a top-level expression list.
///
/// A bare comma-separated list is a tuple, as is a single expression
/// followed by a trailing comma.
///
/// Grammar: `expression_list := expression ("," expression)* [","]`
pub fn parse_expression_list<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<SyntaxNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let first = parse_expression(tokens, depth)?;
    if !matches!(tokens.peek(), Some((Token::Comma, _))) {
        return Ok(first);
    }

    let mut elements = vec![first];
    while let Some((Token::Comma, _)) = tokens.peek() {
        tokens.next();
        if !tokens.peek().is_some_and(|(token, _)| can_start_expression(token)) {
            break;
        }
        elements.push(parse_expression(tokens, depth)?);
    }
    Ok(SyntaxNode::Tuple(elements))
}

/// Parses a full expression.
///
/// This is the entry point for every nested expression: parenthesized
/// groups, call arguments, subscripts and display elements all come through
/// here, so this is where nesting depth is counted.
///
/// Grammar:
/// ```text
///     expression := "lambda" params ":" expression
///                 | disjunction ["if" disjunction "else" expression]
/// ```
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<SyntaxNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let depth = descend(depth)?;

    if let Some((Token::Lambda, _)) = tokens.peek() {
        tokens.next();
        return parse_lambda(tokens, depth);
    }

    let body = parse_disjunction(tokens, depth)?;

    if let Some((Token::If, _)) = tokens.peek() {
        tokens.next();
        let test = parse_disjunction(tokens, depth)?;
        expect(tokens, &Token::Else)?;
        let orelse = parse_expression(tokens, depth)?;
        return Ok(SyntaxNode::Conditional { body:   Box::new(body),
                                            test:   Box::new(test),
                                            orelse: Box::new(orelse), });
    }

    Ok(body)
}

/// Parses the rest of a `lambda` after the keyword.
///
/// Grammar: `lambda := "lambda" [IDENT ("," IDENT)*] ":" expression`
fn parse_lambda<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<SyntaxNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut params = Vec::new();
    loop {
        match tokens.next() {
            Some((Token::Colon, _)) => break,
            Some((Token::Identifier(name), _)) => {
                params.push(name.clone());
                match tokens.next() {
                    Some((Token::Comma, _)) => {},
                    Some((Token::Colon, _)) => break,
                    Some((token, _)) => return Err(ParseError::unexpected(token)),
                    None => return Err(ParseError::end_of_input()),
                }
            },
            Some((token, _)) => return Err(ParseError::unexpected(token)),
            None => return Err(ParseError::end_of_input()),
        }
    }

    let body = parse_expression(tokens, depth)?;
    Ok(SyntaxNode::Lambda { params,
                            body: Box::new(body) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{InfixOperator, NumericLiteral};

    fn number(value: f64) -> SyntaxNode {
        SyntaxNode::Number(NumericLiteral::Integer(value))
    }

    #[test]
    fn bare_commas_make_tuples() {
        assert_eq!(parse_syntax("1, 2").unwrap(),
                   SyntaxNode::Tuple(vec![number(1.0), number(2.0)]));
        assert_eq!(parse_syntax("1,").unwrap(), SyntaxNode::Tuple(vec![number(1.0)]));
    }

    #[test]
    fn conditional_and_lambda() {
        assert!(matches!(parse_syntax("1 if x else 2").unwrap(),
                         SyntaxNode::Conditional { .. }));
        assert!(matches!(parse_syntax("lambda: 1").unwrap(), SyntaxNode::Lambda { .. }));
        assert!(matches!(parse_syntax("lambda a, b: a").unwrap(),
                         SyntaxNode::Lambda { params, .. } if params == ["a", "b"]));
    }

    #[test]
    fn trailing_tokens_are_rejected() {
        assert_eq!(parse_syntax("1 2"),
                   Err(ParseError::Syntax { text: "'2'".to_string() }));
        assert_eq!(parse_syntax("1 +"), Err(ParseError::end_of_input()));
        assert_eq!(parse_syntax(""), Err(ParseError::end_of_input()));
    }

    #[test]
    fn caret_is_rewritten_before_parsing() {
        assert_eq!(normalize("2^3^2"), "2**3**2");
        assert!(matches!(parse_syntax("2^3").unwrap(),
                         SyntaxNode::Infix { op: InfixOperator::BitXor, .. }));
    }

    #[test]
    fn balance_counts_only() {
        assert!(check_balanced(")(").is_ok());
        assert_eq!(check_balanced("((1)"),
                   Err(ParseError::UnbalancedParentheses { opening: 2, closing: 1 }));
    }
}
