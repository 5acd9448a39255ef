/// The evaluator module computes the value of a whitelisted expression tree.
///
/// # Responsibilities
/// - Applies the fixed set of arithmetic operators.
/// - Reports division by zero and results without a finite real value.
/// - Bounds recursion by a configurable nesting depth.
pub mod evaluator;
/// The lexer module tokenizes a line of input.
///
/// The lexer recognizes the full token set of a general expression language
/// so that everything the user typed reaches the parser and, if it is not
/// arithmetic, is rejected by name.
///
/// # Responsibilities
/// - Converts the input into tokens paired with their byte offset.
/// - Handles every numeric literal form, strings, names and operators.
/// - Reports characters that start no token as syntax errors.
pub mod lexer;
/// The parser module builds expression trees from tokens.
///
/// Parsing happens in two phases. A general precedence parser first builds a
/// [`crate::syntax::SyntaxNode`] tree for anything the expression language
/// can express; the whitelist pass then converts it into an
/// [`crate::ast::ExpressionNode`], rejecting every construct that is not
/// plain arithmetic.
///
/// # Responsibilities
/// - Checks parenthesis balance and rewrites `^` to `**`.
/// - Validates grammar and precedence, reporting the offending token.
/// - Guarantees that only whitelisted nodes reach the evaluator.
pub mod parser;
/// The whitelist pass.
///
/// Walks a general syntax tree and admits only numeric literals, unary `+`
/// and `-`, and the binary operators `+ - * / % **`.
pub mod whitelist;
