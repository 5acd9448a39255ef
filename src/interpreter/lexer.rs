use std::fmt;

use log::trace;
use logos::Logos;

use crate::{error::ParseError, interpreter::parser::core::ParseResult};

/// Represents a lexical token in the source input.
///
/// The lexer recognizes a general expression language, not just arithmetic:
/// names, strings, comparisons, bitwise operators and brackets are all
/// tokenized so that the parser can build a complete syntax tree and the
/// whitelist pass can reject them by name. Literal tokens keep their source
/// text; numeric values are decoded by the parser.
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
pub enum Token {
    /// Imaginary literal tokens, such as `2j` or `1.5e3J`.
    #[regex(r"([0-9][0-9_]*(\.[0-9_]*)?|\.[0-9][0-9_]*)([eE][+-]?[0-9][0-9_]*)?[jJ]",
            |lex| lex.slice().to_string())]
    Imaginary(String),
    /// Floating-point literal tokens, such as `3.14`, `.5`, `1.` or `2e-10`.
    #[regex(r"[0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9][0-9_]*)?", |lex| lex.slice().to_string())]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9][0-9_]*)?", |lex| lex.slice().to_string())]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9][0-9_]*", |lex| lex.slice().to_string())]
    Float(String),
    /// Integer literal tokens, such as `42`, `1_000`, `0xff`, `0o17` or
    /// `0b101`.
    #[regex(r"[0-9][0-9_]*", |lex| lex.slice().to_string())]
    #[regex(r"0[xX][0-9a-fA-F_]+", |lex| lex.slice().to_string())]
    #[regex(r"0[oO][0-7_]+", |lex| lex.slice().to_string())]
    #[regex(r"0[bB][01_]+", |lex| lex.slice().to_string())]
    Integer(String),
    /// String and bytes literals with an optional prefix, such as `'os'` or
    /// `b"\x00"`.
    #[regex(r#"[bBrRuUfF]?[bBrRuUfF]?"([^"\\\n]|\\[^\n])*""#, |lex| lex.slice().to_string())]
    #[regex(r"[bBrRuUfF]?[bBrRuUfF]?'([^'\\\n]|\\[^\n])*'", |lex| lex.slice().to_string())]
    Str(String),
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// `not`
    #[token("not")]
    Not,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `in`
    #[token("in")]
    In,
    /// `is`
    #[token("is")]
    Is,
    /// `lambda`
    #[token("lambda")]
    Lambda,
    /// Identifier tokens, such as `x`, `__import__` or `True`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `# Comments.`
    #[regex(r"#[^\n\r]*", logos::skip, allow_greedy = true)]
    Comment,
    /// `**`
    #[token("**")]
    DoubleStar,
    /// `//`
    #[token("//")]
    DoubleSlash,
    /// `<<`
    #[token("<<")]
    LeftShift,
    /// `>>`
    #[token(">>")]
    RightShift,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `@`
    #[token("@")]
    At,
    /// `&`
    #[token("&")]
    Ampersand,
    /// `|`
    #[token("|")]
    Pipe,
    /// `^`
    #[token("^")]
    Caret,
    /// `~`
    #[token("~")]
    Tilde,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
    /// `.`
    #[token(".")]
    Dot,
    /// Whitespace.
    #[regex(r"[ \t\f\r\n]+", logos::skip)]
    Ignored,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Imaginary(text)
            | Self::Float(text)
            | Self::Integer(text)
            | Self::Str(text)
            | Self::Identifier(text) => return f.write_str(text),
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::If => "if",
            Self::Else => "else",
            Self::In => "in",
            Self::Is => "is",
            Self::Lambda => "lambda",
            Self::Comment => "#",
            Self::DoubleStar => "**",
            Self::DoubleSlash => "//",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::At => "@",
            Self::Ampersand => "&",
            Self::Pipe => "|",
            Self::Caret => "^",
            Self::Tilde => "~",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::Comma => ",",
            Self::Colon => ":",
            Self::Dot => ".",
            Self::Ignored => " ",
        };
        f.write_str(symbol)
    }
}

/// Splits `source` into tokens paired with their byte offset.
///
/// Whitespace and `#` comments are dropped. The first character sequence
/// that matches no token aborts lexing with a syntax error that quotes it.
///
/// # Example
/// ```
/// use safecalc::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("2 ** 3").unwrap();
/// assert_eq!(tokens,
///            vec![(Token::Integer("2".to_string()), 0),
///                 (Token::DoubleStar, 2),
///                 (Token::Integer("3".to_string()), 5)]);
/// ```
pub fn tokenize(source: &str) -> ParseResult<Vec<(Token, usize)>> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        if let Ok(tok) = token {
            tokens.push((tok, lexer.span().start));
        } else {
            return Err(ParseError::Syntax { text: format!("'{}'", lexer.slice()) });
        }
    }

    trace!("tokenized {source:?} into {} tokens", tokens.len());
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).unwrap()
                        .into_iter()
                        .map(|(token, _)| token)
                        .collect()
    }

    #[test]
    fn numbers_in_every_form() {
        assert_eq!(kinds("42 1_000 0xff 0o17 0b101"),
                   vec![Token::Integer("42".into()),
                        Token::Integer("1_000".into()),
                        Token::Integer("0xff".into()),
                        Token::Integer("0o17".into()),
                        Token::Integer("0b101".into())]);
        assert_eq!(kinds("3.14 .5 1. 2e-10 2.5E3"),
                   vec![Token::Float("3.14".into()),
                        Token::Float(".5".into()),
                        Token::Float("1.".into()),
                        Token::Float("2e-10".into()),
                        Token::Float("2.5E3".into())]);
        assert_eq!(kinds("2j 1.5J"),
                   vec![Token::Imaginary("2j".into()), Token::Imaginary("1.5J".into())]);
    }

    #[test]
    fn keywords_win_over_identifiers() {
        assert_eq!(kinds("not x and y"),
                   vec![Token::Not,
                        Token::Identifier("x".into()),
                        Token::And,
                        Token::Identifier("y".into())]);
        assert_eq!(kinds("android"), vec![Token::Identifier("android".into())]);
    }

    #[test]
    fn strings_with_prefixes() {
        assert_eq!(kinds("__import__('os')"),
                   vec![Token::Identifier("__import__".into()),
                        Token::LParen,
                        Token::Str("'os'".into()),
                        Token::RParen]);
        assert_eq!(kinds(r#"b"\x00""#), vec![Token::Str(r#"b"\x00""#.into())]);
    }

    #[test]
    fn longest_operator_is_taken() {
        assert_eq!(kinds("2**3//4<<1"),
                   vec![Token::Integer("2".into()),
                        Token::DoubleStar,
                        Token::Integer("3".into()),
                        Token::DoubleSlash,
                        Token::Integer("4".into()),
                        Token::LeftShift,
                        Token::Integer("1".into())]);
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(kinds("1 + 2 # three"),
                   vec![Token::Integer("1".into()), Token::Plus, Token::Integer("2".into())]);
    }

    #[test]
    fn unknown_characters_are_syntax_errors() {
        assert_eq!(tokenize("1 $ 2"),
                   Err(ParseError::Syntax { text: "'$'".to_string() }));
        assert_eq!(tokenize("x = 1"),
                   Err(ParseError::Syntax { text: "'='".to_string() }));
    }
}
