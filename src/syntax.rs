use std::fmt;

/// A numeric literal exactly as it appeared in the source.
///
/// Integers and floats are decoded into `f64` during parsing; imaginary
/// literals are kept so that the whitelist pass can name them when it
/// rejects them.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericLiteral {
    /// A decimal or radix integer literal.
    Integer(f64),
    /// A floating-point literal.
    Float(f64),
    /// An imaginary literal such as `2j`; the source text is kept.
    Imaginary(String),
}

/// The three keyword constants of the expression language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordConstant {
    /// `True`
    True,
    /// `False`
    False,
    /// `None`
    None,
}

/// Prefix operators recognized by the general grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOperator {
    /// `+x`
    Plus,
    /// `-x`
    Minus,
    /// `~x`
    Invert,
    /// `not x`
    Not,
}

/// Infix operators recognized by the general grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `//`
    FloorDiv,
    /// `%`
    Mod,
    /// `**`
    Pow,
    /// `@`
    MatMul,
    /// `&`
    BitAnd,
    /// `|`
    BitOr,
    /// `^`
    BitXor,
    /// `<<`
    LeftShift,
    /// `>>`
    RightShift,
}

impl InfixOperator {
    /// Binding strength used by the precedence-climbing parser. `**` is
    /// parsed separately and has no entry in this table.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::BitOr => 1,
            Self::BitXor => 2,
            Self::BitAnd => 3,
            Self::LeftShift | Self::RightShift => 4,
            Self::Add | Self::Sub => 5,
            Self::Mul | Self::Div | Self::FloorDiv | Self::Mod | Self::MatMul => 6,
            Self::Pow => 7,
        }
    }

    /// The operator as written in source.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::FloorDiv => "//",
            Self::Mod => "%",
            Self::Pow => "**",
            Self::MatMul => "@",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
        }
    }
}

/// Short-circuiting boolean operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOperator {
    /// `and`
    And,
    /// `or`
    Or,
}

/// Comparison operators; a comparison may chain several of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `in`
    In,
    /// `not in`
    NotIn,
    /// `is`
    Is,
    /// `is not`
    IsNot,
}

/// A node of the general syntax tree.
///
/// This tree is what a full expression grammar produces before anything is
/// checked. It deliberately models constructs that the calculator will never
/// evaluate (names, calls, attribute access, collections, comparisons) so
/// that the whitelist pass sees exactly what the user wrote.
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxNode {
    /// A numeric literal.
    Number(NumericLiteral),
    /// A string or bytes literal, kept as written.
    Str {
        /// Source text including quotes and prefix.
        text:  String,
        /// Whether the prefix marks a bytes literal.
        bytes: bool,
    },
    /// `True`, `False` or `None`.
    Constant(KeywordConstant),
    /// A bare name such as `x` or `__import__`.
    Name(String),
    /// A prefix operation.
    Prefix {
        /// The operator.
        op:      PrefixOperator,
        /// The operand.
        operand: Box<Self>,
    },
    /// An infix operation.
    Infix {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    InfixOperator,
        /// Right operand.
        right: Box<Self>,
    },
    /// A chain of `and` or `or` operands.
    Boolean {
        /// The operator joining every operand.
        op:       BooleanOperator,
        /// Two or more operands.
        operands: Vec<Self>,
    },
    /// A comparison chain such as `a < b <= c`.
    Comparison {
        /// The first operand.
        left:        Box<Self>,
        /// Each operator with the operand to its right.
        comparisons: Vec<(ComparisonOperator, Self)>,
    },
    /// `body if test else orelse`
    Conditional {
        /// Value when the test holds.
        body:   Box<Self>,
        /// The condition.
        test:   Box<Self>,
        /// Value otherwise.
        orelse: Box<Self>,
    },
    /// `lambda params: body`
    Lambda {
        /// Parameter names.
        params: Vec<String>,
        /// The body expression.
        body:   Box<Self>,
    },
    /// A call such as `f(x, y)`.
    Call {
        /// The called expression.
        function:  Box<Self>,
        /// Positional arguments.
        arguments: Vec<Self>,
    },
    /// Attribute access such as `x.y`.
    Attribute {
        /// The object expression.
        value: Box<Self>,
        /// The attribute name.
        name:  String,
    },
    /// Subscript such as `x[i]` or `x[a:b]`.
    Subscript {
        /// The indexed expression.
        value: Box<Self>,
        /// The index, which may be a [`SyntaxNode::Slice`].
        index: Box<Self>,
    },
    /// A slice `lower:upper:step`, only valid inside a subscript.
    Slice {
        /// Optional lower bound.
        lower: Option<Box<Self>>,
        /// Optional upper bound.
        upper: Option<Box<Self>>,
        /// Optional step.
        step:  Option<Box<Self>>,
    },
    /// A tuple, written with commas and optional parentheses.
    Tuple(Vec<Self>),
    /// A list display `[a, b]`.
    List(Vec<Self>),
    /// A set display `{a, b}`.
    Set(Vec<Self>),
    /// A dict display `{k: v}`.
    Dict(Vec<(Self, Self)>),
}

impl SyntaxNode {
    /// Describes the construct at the root of this node for error messages.
    ///
    /// ## Example
    /// ```
    /// use safecalc::syntax::SyntaxNode;
    ///
    /// let node = SyntaxNode::Name("x".to_string());
    /// assert_eq!(node.describe(), "name 'x'");
    /// ```
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Number(NumericLiteral::Imaginary(text)) => format!("complex literal '{text}'"),
            Self::Number(_) => "numeric literal".to_string(),
            Self::Str { bytes: true, .. } => "bytes literal".to_string(),
            Self::Str { .. } => "string literal".to_string(),
            Self::Constant(constant) => format!("constant '{constant}'"),
            Self::Name(name) => format!("name '{name}'"),
            Self::Prefix { op, .. } => format!("unary operator '{op}'"),
            Self::Infix { op, .. } => format!("operator '{}'", op.symbol()),
            Self::Boolean { op, .. } => format!("boolean operator '{op}'"),
            Self::Comparison { .. } => "comparison".to_string(),
            Self::Conditional { .. } => "conditional expression".to_string(),
            Self::Lambda { .. } => "lambda".to_string(),
            Self::Call { .. } => "function call".to_string(),
            Self::Attribute { name, .. } => format!("attribute access '.{name}'"),
            Self::Subscript { .. } => "subscript".to_string(),
            Self::Slice { .. } => "slice".to_string(),
            Self::Tuple(_) => "tuple".to_string(),
            Self::List(_) => "list".to_string(),
            Self::Set(_) => "set".to_string(),
            Self::Dict(_) => "dict".to_string(),
        }
    }
}

impl fmt::Display for KeywordConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
                        Self::True => "True",
                        Self::False => "False",
                        Self::None => "None",
                    })
    }
}

impl fmt::Display for PrefixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
                        Self::Plus => "+",
                        Self::Minus => "-",
                        Self::Invert => "~",
                        Self::Not => "not",
                    })
    }
}

impl fmt::Display for BooleanOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
                        Self::And => "and",
                        Self::Or => "or",
                    })
    }
}
